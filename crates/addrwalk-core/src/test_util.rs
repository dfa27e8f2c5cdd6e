//! Shared test helpers for `addrwalk-core` unit tests.
//!
//! Builders for the JSON bodies the remote API returns, so pagination and
//! client tests share one source of truth for dummy pages.

use bitcoin::hashes::Hash;
use bitcoin::Txid;

// ==============================================================================
// Txid Helpers
// ==============================================================================

/// Create a deterministic `Txid` from a single distinguishing byte.
pub fn txid_from_byte(b: u8) -> Txid {
    let mut bytes = [0u8; 32];
    bytes[0] = b;
    Txid::from_byte_array(bytes)
}

// ==============================================================================
// Response Bodies
// ==============================================================================

/// A minimal transaction record at `height`, hashed from `b`.
pub fn tx_json(b: u8, height: i64) -> serde_json::Value {
    serde_json::json!({
        "hash": txid_from_byte(b).to_string(),
        "block_height": height,
        "double_spend": false,
        "confirmations": 1,
        "inputs": [
            {
                "prev_hash": txid_from_byte(b.wrapping_add(100)).to_string(),
                "output_index": 0,
                "addresses": ["1sender"]
            }
        ],
        "outputs": [{ "value": 10_000, "addresses": ["1abc"] }]
    })
}

/// A `/addrs/{address}/full` page of `(hash byte, height)` transactions.
pub fn tx_page(txs: &[(u8, i64)], has_more: bool) -> serde_json::Value {
    let txs: Vec<_> = txs.iter().map(|&(b, h)| tx_json(b, h)).collect();
    serde_json::json!({ "address": "1abc", "txs": txs, "hasMore": has_more })
}

/// An unspent output reference at `height`.
pub fn utxo_json(b: u8, vout: u32, sats: u64, height: i64) -> serde_json::Value {
    serde_json::json!({
        "tx_hash": txid_from_byte(b).to_string(),
        "tx_output_n": vout,
        "value": sats,
        "confirmations": 3,
        "block_height": height
    })
}

/// A `/addrs/{address}?unspentOnly=true` page.
pub fn utxo_page(txrefs: Vec<serde_json::Value>, has_more: bool) -> serde_json::Value {
    serde_json::json!({ "address": "1abc", "txrefs": txrefs, "hasMore": has_more })
}
