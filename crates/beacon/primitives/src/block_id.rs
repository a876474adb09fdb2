use alloy_eips::{BlockHashOrNumber, BlockNumberOrTag};
use alloy_primitives::{Bytes, B256};
use core::{convert::Infallible, fmt, str::FromStr};

/// A block identifier as callers spell it: a number, a hash or a named tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockId {
    /// Slot or block number.
    Number(u64),
    /// Block root / hash bytes.
    Hash(Bytes),
    /// Named tag (`latest`, `head`, ...) or any other textual id such as a `0x` root.
    Tag(String),
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Hash(hash) => write!(f, "{hash}"),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}

impl FromStr for BlockId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>().map_or_else(|_| Self::Tag(s.to_owned()), Self::Number))
    }
}

impl From<u64> for BlockId {
    fn from(number: u64) -> Self {
        Self::Number(number)
    }
}

impl From<B256> for BlockId {
    fn from(hash: B256) -> Self {
        Self::Hash(Bytes::copy_from_slice(hash.as_slice()))
    }
}

impl From<Bytes> for BlockId {
    fn from(hash: Bytes) -> Self {
        Self::Hash(hash)
    }
}

impl From<&str> for BlockId {
    fn from(tag: &str) -> Self {
        Self::Tag(tag.to_owned())
    }
}

impl From<String> for BlockId {
    fn from(tag: String) -> Self {
        Self::Tag(tag)
    }
}

impl From<BlockNumberOrTag> for BlockId {
    fn from(id: BlockNumberOrTag) -> Self {
        match id {
            BlockNumberOrTag::Number(number) => Self::Number(number),
            BlockNumberOrTag::Earliest => Self::from("earliest"),
            BlockNumberOrTag::Latest => Self::from("latest"),
            BlockNumberOrTag::Pending => Self::from("pending"),
            BlockNumberOrTag::Safe => Self::from("safe"),
            BlockNumberOrTag::Finalized => Self::from("finalized"),
        }
    }
}

impl From<BlockHashOrNumber> for BlockId {
    fn from(id: BlockHashOrNumber) -> Self {
        match id {
            BlockHashOrNumber::Hash(hash) => hash.into(),
            BlockHashOrNumber::Number(number) => number.into(),
        }
    }
}

/// A block identifier in Beacon API vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BeaconBlockId {
    /// The genesis block.
    Genesis,
    /// The canonical head.
    Head,
    /// The latest finalized block.
    Finalized,
    /// Any identifier the Beacon API understands as-is.
    Other(BlockId),
}

impl fmt::Display for BeaconBlockId {
    /// Renders the id as used in `/eth/v2/beacon/blocks/{block_id}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genesis => f.write_str("genesis"),
            Self::Head => f.write_str("head"),
            Self::Finalized => f.write_str("finalized"),
            Self::Other(id) => id.fmt(f),
        }
    }
}

/// Translates an execution-style block identifier into the Beacon API vocabulary.
///
/// `earliest` maps to `genesis`, `latest` to `head` and `pending` to `finalized`. Every other
/// identifier is passed through unchanged.
pub fn to_beacon_identifier(id: BlockId) -> BeaconBlockId {
    let mapped = match &id {
        BlockId::Tag(tag) => match tag.as_str() {
            "earliest" => Some(BeaconBlockId::Genesis),
            "latest" => Some(BeaconBlockId::Head),
            "pending" => Some(BeaconBlockId::Finalized),
            _ => None,
        },
        BlockId::Number(_) | BlockId::Hash(_) => None,
    };
    mapped.unwrap_or(BeaconBlockId::Other(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::bytes;
    use test_case::test_case;

    #[test_case("earliest", BeaconBlockId::Genesis ; "earliest")]
    #[test_case("latest", BeaconBlockId::Head ; "latest")]
    #[test_case("pending", BeaconBlockId::Finalized ; "pending")]
    fn maps_execution_tags(tag: &str, expected: BeaconBlockId) {
        assert_eq!(to_beacon_identifier(BlockId::from(tag)), expected);
    }

    #[test_case(BlockId::Number(10) ; "number")]
    #[test_case(BlockId::from("0xA") ; "hex text")]
    #[test_case(BlockId::Hash(bytes!("0a")) ; "hex bytes")]
    #[test_case(BlockId::from("head") ; "beacon tag")]
    #[test_case(BlockId::from("finalized") ; "finalized tag")]
    fn passes_other_ids_through(id: BlockId) {
        assert_eq!(to_beacon_identifier(id.clone()), BeaconBlockId::Other(id));
    }

    #[test]
    fn renders_path_segment() {
        assert_eq!(to_beacon_identifier("earliest".into()).to_string(), "genesis");
        assert_eq!(to_beacon_identifier(1u64.into()).to_string(), "1");
        assert_eq!(to_beacon_identifier(BlockId::Hash(bytes!("0a"))).to_string(), "0x0a");
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("15".parse::<BlockId>(), Ok(BlockId::Number(15)));
        assert_eq!("latest".parse::<BlockId>(), Ok(BlockId::from("latest")));
        assert_eq!("0x01".parse::<BlockId>(), Ok(BlockId::from("0x01")));
    }

    #[test]
    fn converts_from_eips_ids() {
        assert_eq!(
            to_beacon_identifier(BlockNumberOrTag::Latest.into()),
            BeaconBlockId::Head
        );
        assert_eq!(BlockId::from(BlockNumberOrTag::Number(7)), BlockId::Number(7));
        assert_eq!(BlockId::from(BlockHashOrNumber::Number(3)), BlockId::Number(3));
        assert_eq!(
            BlockId::from(BlockHashOrNumber::Hash(B256::ZERO)),
            BlockId::Hash(Bytes::from(vec![0u8; 32]))
        );
    }
}
