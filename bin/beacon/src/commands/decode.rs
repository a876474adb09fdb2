//! `beacon decode`

use super::{is_block_response, print_json};
use beacon_decoder::BeaconBlockDecoder;
use beacon_primitives::BeaconBlock;
use clap::Parser;
use eyre::WrapErr;
use serde_json::Value;
use std::{io::Read, path::PathBuf};
use tracing::debug;

/// Decodes a block message, or a full block response, into a normalized block.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// JSON file to decode, `-` for stdin.
    #[arg(value_name = "FILE")]
    pub(crate) file: PathBuf,
}

impl Command {
    pub(crate) fn execute(self) -> eyre::Result<()> {
        let contents = self.read_input()?;
        let block = decode(&contents)?;
        print_json(&block)
    }

    fn read_input(&self) -> eyre::Result<String> {
        if self.file.as_os_str() == "-" {
            let mut contents = String::new();
            std::io::stdin().read_to_string(&mut contents).wrap_err("failed to read stdin")?;
            return Ok(contents)
        }
        std::fs::read_to_string(&self.file)
            .wrap_err_with(|| format!("failed to read `{}`", self.file.display()))
    }
}

/// Decodes `contents`, detecting whether it is a response envelope or a bare message.
pub(crate) fn decode(contents: &str) -> eyre::Result<BeaconBlock> {
    let value: Value = serde_json::from_str(contents).wrap_err("input is not valid JSON")?;
    let decoder = BeaconBlockDecoder::ethereum();
    let block = if is_block_response(&value) {
        debug!(target: "beacon::cli", "Decoding block response");
        decoder.decode_block_response(value)?
    } else {
        debug!(target: "beacon::cli", "Decoding block message");
        decoder.decode_value(value)?
    };
    Ok(block)
}
