//! Reconciliation agent for a proxy node.
//!
//! Keeps the node's live user set and traffic counters synchronized
//! with the panel database: each cycle flushes per-user traffic into
//! the store, then diffs the store's eligible accounts against the
//! node and applies the changes over the management API.

use anyhow::Result;
use tokio::sync::watch;

use watchman_agent::agent::{InboundManager, ReconcileEngine};
use watchman_agent::config::CliArgs;
use watchman_agent::logger::{self, log};
use watchman_agent::store::Store;
use watchman_agent::xray::{self, HandlerServiceClient, Protocol, StatsServiceClient};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse_args();
    cli.validate()?;

    logger::init_logger(&cli.log_mode);

    log::info!(
        api = %cli.api_address,
        node = cli.node,
        "Starting reconciliation agent"
    );

    // The proxy may come up after us; keep dialing inside the window.
    let channel = xray::connect(&cli.api_address, cli.connect_timeout, cli.rpc_timeout).await?;

    let stats = StatsServiceClient::new(channel.clone());

    let mut managers: Vec<Box<dyn InboundManager>> = Vec::new();
    if !cli.vmess_inbound_tag.is_empty() {
        let manager = HandlerServiceClient::new(
            channel.clone(),
            cli.vmess_inbound_tag.clone(),
            Protocol::Vmess,
        );
        if let Some(port) = cli.provision_port {
            manager.add_vmess_inbound(port, "0.0.0.0").await?;
        }
        managers.push(Box::new(manager));
    }
    if !cli.vless_inbound_tag.is_empty() {
        managers.push(Box::new(HandlerServiceClient::new(
            channel.clone(),
            cli.vless_inbound_tag.clone(),
            Protocol::Vless,
        )));
    }
    if !cli.ss_inbound_tag.is_empty() {
        managers.push(Box::new(HandlerServiceClient::new(
            channel,
            cli.ss_inbound_tag.clone(),
            Protocol::Shadowsocks,
        )));
    }
    log::info!(inbounds = managers.len(), "Inbound managers ready");

    let store = Store::connect(&cli.db_url).await?;

    let mut engine = ReconcileEngine::new(
        store,
        Box::new(stats),
        managers,
        cli.node as i64,
        cli.node_class,
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigint = signal(SignalKind::interrupt()).expect("Failed to setup SIGINT");
            let mut sigterm = signal(SignalKind::terminate()).expect("Failed to setup SIGTERM");

            tokio::select! {
                _ = sigint.recv() => {
                    log::info!("SIGINT received, shutting down...");
                }
                _ = sigterm.recv() => {
                    log::info!("SIGTERM received, shutting down...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await.ok();
            log::info!("Shutdown signal received...");
        }

        let _ = shutdown_tx.send(true);
    });

    watchman_agent::agent::scheduler::run(&mut engine, cli.check_interval, shutdown_rx).await;

    log::info!("Agent stopped");
    Ok(())
}
