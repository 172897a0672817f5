//! Block references: the "which block did the caller mean" types.
//!
//! RPC callers identify blocks by number, by the `latest`/`pending` tags, by
//! hash, or by a combined number-or-hash form that can additionally demand
//! the hash be canonical. Each shape gets its own variant so resolution can
//! dispatch structurally instead of probing for fields.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A block height or one of the virtual tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockNumber {
    /// The current chain head.
    Latest,
    /// The block currently being built. A stateless client keeps no pending
    /// block, so this resolves to the same header as [`BlockNumber::Latest`].
    Pending,
    /// A concrete block height.
    Height(u64),
}

impl BlockNumber {
    /// The concrete height, if this is not a virtual tag.
    pub fn as_height(&self) -> Option<u64> {
        match self {
            BlockNumber::Height(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<u64> for BlockNumber {
    fn from(height: u64) -> Self {
        BlockNumber::Height(height)
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockNumber::Latest => write!(f, "latest"),
            BlockNumber::Pending => write!(f, "pending"),
            BlockNumber::Height(n) => write!(f, "{n}"),
        }
    }
}

/// Combined number-or-hash reference.
///
/// Either field may be set; setting neither is an invalid reference and is
/// rejected at resolution time. `require_canonical` only applies to the hash
/// form: when set, a resolved header must match the chain's recorded
/// canonical hash at its height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberOrHash {
    /// Block number, when referencing by height or tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<BlockNumber>,
    /// Block hash, when referencing by hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<B256>,
    /// Require the resolved block to be on the canonical chain.
    #[serde(default)]
    pub require_canonical: bool,
}

impl NumberOrHash {
    /// Reference by number or tag.
    pub fn from_number(number: impl Into<BlockNumber>) -> Self {
        Self {
            number: Some(number.into()),
            hash: None,
            require_canonical: false,
        }
    }

    /// Reference by hash, accepting non-canonical (fork) blocks.
    pub fn from_hash(hash: B256) -> Self {
        Self {
            number: None,
            hash: Some(hash),
            require_canonical: false,
        }
    }

    /// Reference by hash, requiring the block to be canonical.
    pub fn from_canonical_hash(hash: B256) -> Self {
        Self {
            number: None,
            hash: Some(hash),
            require_canonical: true,
        }
    }
}

impl fmt::Display for NumberOrHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.number, self.hash) {
            (Some(number), _) => write!(f, "{number}"),
            (None, Some(hash)) => write!(f, "{hash}"),
            (None, None) => write!(f, "<empty>"),
        }
    }
}

/// A block reference as supplied by an RPC caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockRef {
    /// By number or virtual tag.
    Number(BlockNumber),
    /// By hash.
    Hash(B256),
    /// Combined form with optional canonicality requirement.
    NumberOrHash(NumberOrHash),
}

impl BlockRef {
    /// Shorthand for the chain head.
    pub fn latest() -> Self {
        BlockRef::Number(BlockNumber::Latest)
    }

    /// Reference a concrete height.
    pub fn height(number: u64) -> Self {
        BlockRef::Number(BlockNumber::Height(number))
    }

    /// Reference a block by hash.
    pub fn hash(hash: B256) -> Self {
        BlockRef::Hash(hash)
    }

    /// Reference a block by hash, requiring it to be canonical.
    pub fn canonical_hash(hash: B256) -> Self {
        BlockRef::NumberOrHash(NumberOrHash::from_canonical_hash(hash))
    }
}

impl From<BlockNumber> for BlockRef {
    fn from(number: BlockNumber) -> Self {
        BlockRef::Number(number)
    }
}

impl From<NumberOrHash> for BlockRef {
    fn from(reference: NumberOrHash) -> Self {
        BlockRef::NumberOrHash(reference)
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockRef::Number(number) => write!(f, "{number}"),
            BlockRef::Hash(hash) => write!(f, "{hash}"),
            BlockRef::NumberOrHash(reference) => write!(f, "{reference}"),
        }
    }
}
