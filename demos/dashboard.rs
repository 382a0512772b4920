//! Dashboard example
//!
//! Fetches the dashboard bundle from the daemon named by the
//! `GRIDCOIN_RPC_*` environment variables and prints it as JSON. Any extra
//! arguments are run afterwards as one console command.
//!
//! Run with: cargo run --example dashboard
//! Or:       cargo run --example dashboard -- getblockbynumber 1000

use gridrpc::core::ObservabilityConfig;
use gridrpc::{ClientBuilder, RpcConfig};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RpcConfig::from_env()?;
    println!("Daemon: {}", config.url());

    // Local logs only; no collector needed
    let otel_config = ObservabilityConfig::new("gridrpc-dashboard")
        .with_traces(false)
        .with_metrics(false);

    let client = ClientBuilder::new(config)
        .with_observability(otel_config)
        .build()?;

    let dashboard = client.fetch_dashboard_bundle().await;
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    let failed = dashboard.failed_keys();
    if !failed.is_empty() {
        tracing::warn!(?failed, "Some dashboard panels are unavailable");
    }

    let mut args = std::env::args().skip(1);
    if let Some(method) = args.next() {
        let params = Value::String(args.collect::<Vec<_>>().join(" "));
        let outcome = client.execute_ad_hoc(&method, &params).await;
        println!("\n> {} {}", method, params.as_str().unwrap_or_default());
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    gridrpc::core::shutdown_observability();
    Ok(())
}
