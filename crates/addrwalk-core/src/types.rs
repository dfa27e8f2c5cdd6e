//! Records returned by the remote address API.
//!
//! Fields mirror the remote JSON representation one-to-one. Values are kept
//! in base units (satoshis) as `Amount`; nothing here validates blockchain
//! semantics beyond what the service reports.

use bitcoin::{Amount, Txid};
use serde::{Deserialize, Deserializer, Serialize};

// ==============================================================================
// Block Height
// ==============================================================================

/// A block height as reported by the remote service, wrapped for type safety.
///
/// Signed because unconfirmed transactions are reported with height `-1`.
/// `#[serde(transparent)]` keeps the JSON representation a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHeight(pub i64);

impl From<i64> for BlockHeight {
    fn from(h: i64) -> Self {
        Self(h)
    }
}

impl From<BlockHeight> for i64 {
    fn from(h: BlockHeight) -> Self {
        h.0
    }
}

impl std::ops::Deref for BlockHeight {
    type Target = i64;
    fn deref(&self) -> &i64 {
        &self.0
    }
}

impl std::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==============================================================================
// Paged Items
// ==============================================================================

/// An item that can appear in a paged address listing.
///
/// The page key of the last item of a page becomes the `before` cursor of
/// the next request.
pub trait PageItem: serde::de::DeserializeOwned + Send {
    fn page_key(&self) -> BlockHeight;
}

// ==============================================================================
// Transactions
// ==============================================================================

/// A transaction touching an address, from `/addrs/{address}/full` or
/// `/txs/{hash}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: Txid,
    #[serde(default = "unconfirmed_height")]
    pub block_height: BlockHeight,
    #[serde(default)]
    pub double_spend: bool,
    #[serde(default)]
    pub confirmations: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: Vec<TxInput>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outputs: Vec<TxOutput>,
}

impl PageItem for Transaction {
    fn page_key(&self) -> BlockHeight {
        self.block_height
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// Absent for coinbase inputs.
    #[serde(default)]
    pub prev_hash: Option<Txid>,
    /// `-1` for coinbase inputs.
    #[serde(default)]
    pub output_index: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    #[serde(with = "bitcoin::amount::serde::as_sat")]
    pub value: Amount,
    /// Null for outputs without a standard address (e.g. `OP_RETURN`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub addresses: Vec<String>,
}

// ==============================================================================
// Unspent Outputs
// ==============================================================================

/// An unspent output reference from `/addrs/{address}?unspentOnly=true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnspentOutput {
    pub tx_hash: Txid,
    pub tx_output_n: u32,
    #[serde(with = "bitcoin::amount::serde::as_sat")]
    pub value: Amount,
    #[serde(default)]
    pub confirmations: u64,
    #[serde(default = "unconfirmed_height")]
    pub block_height: BlockHeight,
}

impl PageItem for UnspentOutput {
    fn page_key(&self) -> BlockHeight {
        self.block_height
    }
}

fn unconfirmed_height() -> BlockHeight {
    BlockHeight(-1)
}

/// The remote service emits `null` for empty lists in a few places.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
