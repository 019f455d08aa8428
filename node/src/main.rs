//! Neo N3 full node entry point.
//!
//! Wires together the ledger, P2P network, mempool, and (when enabled)
//! consensus components, then runs them until a shutdown signal arrives.

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use neo_config::NetworkType;
use neo_core::shutdown::{ShutdownCoordinator, SignalHandler};
use neo_ledger::{Blockchain, MempoolConfig, MemoryPool};
use neo_network::{NetworkConfig, P2pNode};
use neo_plugins::{ApplicationLogsPlugin, PluginRegistry};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Network {
    Mainnet,
    Testnet,
    Private,
}

impl From<Network> for NetworkType {
    fn from(value: Network) -> Self {
        match value {
            Network::Mainnet => NetworkType::MainNet,
            Network::Testnet => NetworkType::TestNet,
            Network::Private => NetworkType::Private,
        }
    }
}

/// Neo N3 node.
#[derive(Parser, Debug)]
#[command(name = "neo-node", version, about = "Neo N3 blockchain node")]
struct Args {
    /// Network to join.
    #[arg(long, value_enum, default_value_t = Network::Testnet)]
    network: Network,

    /// P2P listen port. Defaults to the network's standard port when unset.
    #[arg(long)]
    port: Option<u16>,

    /// Maximum number of verified mempool transactions.
    #[arg(long, default_value_t = 50_000)]
    max_mempool_size: usize,
}

fn network_config(args: &Args) -> NetworkConfig {
    let mut config = match args.network {
        Network::Mainnet => NetworkConfig::default(),
        Network::Testnet => NetworkConfig::testnet(),
        Network::Private => NetworkConfig::private(),
    };
    if let Some(port) = args.port {
        config.port = port;
        config.listen_address = format!("0.0.0.0:{port}")
            .parse()
            .expect("valid socket address");
        config.p2p_config.listen_address = config.listen_address;
    }
    config
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    info!(network = ?args.network, "starting neo-node");

    let shutdown = Arc::new(ShutdownCoordinator::new());
    SignalHandler::new(shutdown.clone()).start().await;

    let blockchain = Arc::new(Blockchain::new(args.network.into()).await?);
    info!(height = blockchain.get_height().await, "blockchain opened");

    let mut plugins = PluginRegistry::new();
    plugins.register(Arc::new(ApplicationLogsPlugin::new()));
    plugins.attach(blockchain.persistence()).await;
    info!(plugins = ?plugins.names(), "plugins attached");

    let mempool_config = MempoolConfig {
        max_verified: args.max_mempool_size,
        ..MempoolConfig::default()
    };
    let mempool = Arc::new(MemoryPool::new(mempool_config));

    let net_config = network_config(&args);
    let (_command_tx, command_rx) = mpsc::channel(256);
    let p2p_node = Arc::new(P2pNode::new(net_config, command_rx)?);

    let run_handle = {
        let p2p_node = p2p_node.clone();
        tokio::spawn(async move {
            if let Err(e) = p2p_node.run().await {
                error!("p2p node exited with error: {e}");
            }
        })
    };

    let shutdown_signal = shutdown.get_shutdown_signal();
    shutdown_signal.notified().await;
    info!("shutdown signal received, stopping node");

    p2p_node.stop().await?;
    run_handle.abort();
    info!(
        verified = mempool.verified_count(),
        "final mempool size at shutdown"
    );

    Ok(())
}
