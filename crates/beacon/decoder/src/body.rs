use crate::{
    decode_payload,
    fields::{fixed, into_object, list_len, take_present, take_required},
    BlockDecodeError, ExecutionBlockDecoder,
};
use alloy_primitives::B256;
use beacon_primitives::{quantity, BeaconBlockBody, Eth1Data, RawObject, ValidationError};

/// Decodes a beacon block body.
///
/// Operation lists are reduced to their lengths. The execution payload is decoded with
/// `execution` if the body has a non-null `execution_payload`.
pub fn decode_body<D>(
    mut raw: RawObject,
    execution: &D,
) -> Result<BeaconBlockBody, BlockDecodeError>
where
    D: ExecutionBlockDecoder + ?Sized,
{
    let mut count = |key: &str, field: &'static str| list_len(field, take_present(&mut raw, key));
    let num_proposer_slashings = count("proposer_slashings", "body.proposer_slashings")?;
    let num_attester_slashings = count("attester_slashings", "body.attester_slashings")?;
    let num_attestations = count("attestations", "body.attestations")?;
    let num_deposits = count("deposits", "body.deposits")?;
    let num_voluntary_exits = count("voluntary_exits", "body.voluntary_exits")?;
    let num_bls_to_execution_changes =
        count("bls_to_execution_changes", "body.bls_to_execution_changes")?;
    let num_blob_kzg_commitments = count("blob_kzg_commitments", "body.blob_kzg_commitments")?;

    let randao_reveal = fixed::<96>(
        "body.randao_reveal",
        take_required(&mut raw, "randao_reveal", "body.randao_reveal")?,
    )?;
    let graffiti = take_present(&mut raw, "graffiti")
        .map(|graffiti| fixed::<32>("body.graffiti", graffiti))
        .transpose()?
        .unwrap_or(B256::ZERO);
    let eth1_data = into_object(
        "body.eth1_data",
        take_required(&mut raw, "eth1_data", "body.eth1_data")?,
    )
    .and_then(decode_eth1_data)?;

    let execution_payload = take_present(&mut raw, "execution_payload")
        .map(|payload| into_object("body.execution_payload", payload))
        .transpose()?
        .map(|payload| decode_payload(payload, execution))
        .transpose()?;

    Ok(BeaconBlockBody {
        randao_reveal,
        eth1_data,
        graffiti,
        num_proposer_slashings,
        num_attester_slashings,
        num_attestations,
        num_deposits,
        num_voluntary_exits,
        num_bls_to_execution_changes,
        num_blob_kzg_commitments,
        execution_payload,
    })
}

fn decode_eth1_data(mut raw: RawObject) -> Result<Eth1Data, ValidationError> {
    let deposit_root = fixed::<32>(
        "body.eth1_data.deposit_root",
        take_required(&mut raw, "deposit_root", "body.eth1_data.deposit_root")?,
    )?;
    let deposit_count = quantity::parse_u64(
        "body.eth1_data.deposit_count",
        &take_required(&mut raw, "deposit_count", "body.eth1_data.deposit_count")?,
    )?;
    let block_hash = fixed::<32>(
        "body.eth1_data.block_hash",
        take_required(&mut raw, "block_hash", "body.eth1_data.block_hash")?,
    )?;
    Ok(Eth1Data { deposit_root, deposit_count, block_hash })
}
