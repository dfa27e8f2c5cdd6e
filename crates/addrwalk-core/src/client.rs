//! The address API client.
//!
//! One configurable client covers every endpoint: paged transaction history,
//! paged unspent outputs, single transaction lookup and address balance.
//! Network selection (mainnet, testnet, mirrors) is purely a base-URL choice.

use std::sync::Arc;
use std::time::Duration;

use bitcoin::{Amount, Txid};
use serde::Deserialize;
use tracing::debug;

use crate::amount::format_coins;
use crate::error::CoreError;
use crate::pagination::{PageRequest, PaginatedFetcher};
use crate::requester::protocol::{check_remote_error, decode};
use crate::requester::{parse_base_url, HttpRequester, QueryParams, ReqwestRequester};
use crate::types::{Transaction, UnspentOutput};

/// Bitcoin mainnet endpoint of the public API.
pub const DEFAULT_BASE_URL: &str = "https://api.blockcypher.com/v1/btc/main";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ==============================================================================
// Configuration
// ==============================================================================

/// Construction-time settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// API token, sent as `token=<key>` on every request when set.
    pub token: Option<String>,
    pub timeout: Duration,
    /// Optional cap on outbound requests per second.
    pub requests_per_second: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            requests_per_second: None,
        }
    }
}

/// Per-call options for the paged address listings.
///
/// `confirmations: None` omits the parameter entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressQuery {
    /// Initial `after` cursor (block height); 0 lists from the beginning.
    pub after: u64,
    /// Minimum confirmations an item needs to be listed.
    pub confirmations: Option<u64>,
}

impl AddressQuery {
    pub fn after(mut self, after: u64) -> Self {
        self.after = after;
        self
    }

    pub fn min_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = Some(confirmations);
        self
    }

    /// Include or exclude unconfirmed items (0 or 1 required confirmations).
    pub fn include_pending(self, include: bool) -> Self {
        self.min_confirmations(if include { 0 } else { 1 })
    }
}

// ==============================================================================
// Client
// ==============================================================================

/// Client for the remote address API.
///
/// Holds no per-call state and is `Send + Sync`, so one instance can be
/// shared across tasks.
pub struct ApiClient {
    requester: Arc<dyn HttpRequester>,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client backed by [`ReqwestRequester`].
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let requester = ReqwestRequester::new(config.timeout, config.requests_per_second)?;
        Self::with_requester(&config.base_url, config.token, Arc::new(requester))
    }

    /// Build a client on top of a caller-supplied requester.
    pub fn with_requester(
        base_url: &str,
        token: Option<String>,
        requester: Arc<dyn HttpRequester>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            requester,
            base_url: parse_base_url(base_url)?,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every transaction touching `address`, newest first as the service
    /// orders them, across all pages.
    pub async fn list_transactions(
        &self,
        address: &str,
        query: AddressQuery,
    ) -> Result<Vec<Transaction>, CoreError> {
        let request = PageRequest::new(format!("{}/addrs/{address}/full", self.base_url), "txs")
            .param("after", query.after)
            .params(self.token_param())
            .params(confirmations_param(query));

        let txs = PaginatedFetcher::new(self.requester.as_ref())
            .fetch_all(&request)
            .await?;
        debug!(address, tx_count = txs.len(), "listed transactions");
        Ok(txs)
    }

    /// Every unspent output of `address`, across all pages.
    pub async fn list_unspent(
        &self,
        address: &str,
        query: AddressQuery,
    ) -> Result<Vec<UnspentOutput>, CoreError> {
        let request = PageRequest::new(format!("{}/addrs/{address}", self.base_url), "txrefs")
            .param("after", query.after)
            .param("unspentOnly", true)
            .params(self.token_param())
            .params(confirmations_param(query));

        let utxos = PaginatedFetcher::new(self.requester.as_ref())
            .fetch_all(&request)
            .await?;
        debug!(address, utxo_count = utxos.len(), "listed unspent outputs");
        Ok(utxos)
    }

    /// Look up one transaction. Issues exactly one request.
    pub async fn get_transaction(&self, hash: &Txid) -> Result<Transaction, CoreError> {
        let raw = self
            .requester
            .get_json(&format!("{}/txs/{hash}", self.base_url), &self.token_param())
            .await?;
        check_remote_error(&raw)?;
        decode(raw, "transaction")
    }

    /// Confirmed balance of `address` in base units (the remote `balance`
    /// field; unconfirmed funds are only reflected in `final_balance`).
    pub async fn get_balance_base_units(&self, address: &str) -> Result<Amount, CoreError> {
        #[derive(Deserialize)]
        struct BalanceResponse {
            balance: u64,
        }

        let raw = self
            .requester
            .get_json(
                &format!("{}/addrs/{address}/balance", self.base_url),
                &self.token_param(),
            )
            .await?;
        check_remote_error(&raw)?;
        let response: BalanceResponse = decode(raw, "balance")?;
        Ok(Amount::from_sat(response.balance))
    }

    /// Balance of `address` as a coin-denominated decimal string, e.g. `"1.5"`.
    pub async fn get_balance(&self, address: &str) -> Result<String, CoreError> {
        self.get_balance_base_units(address)
            .await
            .map(format_coins)
    }

    fn token_param(&self) -> QueryParams {
        self.token
            .iter()
            .map(|token| ("token".to_owned(), token.clone()))
            .collect()
    }
}

fn confirmations_param(query: AddressQuery) -> QueryParams {
    query
        .confirmations
        .iter()
        .map(|confirmations| ("confirmations".to_owned(), confirmations.to_string()))
        .collect()
}
