use clap::{Parser, Subcommand};

/// addrwalk: address history, unspent outputs and balances from a
/// blockchain data HTTP API.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// API base URL, including coin and network (e.g. `.../v1/btc/test3`).
    #[arg(
        long,
        global = true,
        default_value = addrwalk_core::client::DEFAULT_BASE_URL,
        env = "ADDRWALK_BASE_URL"
    )]
    pub base_url: String,

    /// API token (optional; unauthenticated requests are rate-limited harder).
    #[arg(long, global = true, env = "ADDRWALK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// HTTP request timeout in seconds.
    #[arg(long, global = true, default_value = "30", env = "ADDRWALK_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// Maximum outbound requests per second.
    #[arg(long, global = true, env = "ADDRWALK_REQUESTS_PER_SECOND")]
    pub requests_per_second: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every transaction touching an address.
    Txs {
        address: String,

        /// Only list items above this block height.
        #[arg(long, default_value = "0")]
        after: u64,

        /// Include unconfirmed transactions.
        #[arg(long)]
        include_pending: bool,
    },

    /// List every unspent output of an address.
    Utxos {
        address: String,

        /// Only list items above this block height.
        #[arg(long, default_value = "0")]
        after: u64,

        /// Minimum confirmations per output.
        #[arg(long)]
        confirmations: Option<u64>,
    },

    /// Look up a single transaction by hash.
    Tx { hash: bitcoin::Txid },

    /// Show an address balance.
    Balance {
        address: String,

        /// Print the integer amount in base units instead of coins.
        #[arg(long)]
        raw: bool,
    },
}
