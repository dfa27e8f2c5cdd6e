mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;
use serde::Serialize;

use addrwalk_core::{AddressQuery, ApiClient, ClientConfig};

use cli::Command;

#[derive(Serialize)]
struct BalanceOutput<'a> {
    address: &'a str,
    balance: String,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    // Stdout carries the JSON result; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let client = ApiClient::new(ClientConfig {
        base_url: args.base_url.clone(),
        token: args.token.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
        requests_per_second: args.requests_per_second,
    })
    .context("configure API client")?;

    if args.token.is_none() {
        tracing::warn!("no API token configured; the remote service applies its anonymous rate limits");
    }
    tracing::info!(base_url = client.base_url(), "using API endpoint");

    let output = match &args.command {
        Command::Txs {
            address,
            after,
            include_pending,
        } => {
            let query = AddressQuery::default()
                .after(*after)
                .include_pending(*include_pending);
            let txs = client
                .list_transactions(address, query)
                .await
                .wrap_err_with(|| format!("list transactions for {address}"))?;
            tracing::info!(address = %address, count = txs.len(), "transactions retrieved");
            serde_json::to_string_pretty(&txs)?
        }
        Command::Utxos {
            address,
            after,
            confirmations,
        } => {
            let mut query = AddressQuery::default().after(*after);
            if let Some(confirmations) = confirmations {
                query = query.min_confirmations(*confirmations);
            }
            let utxos = client
                .list_unspent(address, query)
                .await
                .wrap_err_with(|| format!("list unspent outputs for {address}"))?;
            tracing::info!(address = %address, count = utxos.len(), "unspent outputs retrieved");
            serde_json::to_string_pretty(&utxos)?
        }
        Command::Tx { hash } => {
            let tx = client
                .get_transaction(hash)
                .await
                .wrap_err_with(|| format!("look up transaction {hash}"))?;
            serde_json::to_string_pretty(&tx)?
        }
        Command::Balance { address, raw } => {
            let balance = if *raw {
                client
                    .get_balance_base_units(address)
                    .await
                    .map(|amount| amount.to_sat().to_string())
            } else {
                client.get_balance(address).await
            }
            .wrap_err_with(|| format!("fetch balance for {address}"))?;
            serde_json::to_string_pretty(&BalanceOutput { address, balance })?
        }
    };

    println!("{output}");
    Ok(())
}
