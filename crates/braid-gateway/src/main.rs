//! braid-gateway — standalone JSON-RPC gateway binary.
//!
//! Startup sequence:
//!   1. Initialise tracing from the environment filter
//!   2. Build the method registry
//!   3. Serve JSON-RPC 2.0 over HTTP until stopped
//!
//! Without a master-service connection the gateway still serves `echo`;
//! submission and count methods report an internal error.

use std::net::SocketAddr;

use clap::Parser;
use tracing::{info, warn};

use braid_rpc::{GatewayState, RpcServer};

#[derive(Parser, Debug)]
#[command(
    name = "braid-gateway",
    version,
    about = "Braid JSON-RPC gateway — the wire surface of a sharded ledger"
)]
struct Args {
    /// JSON-RPC listen address.
    #[arg(long, default_value = "127.0.0.1:38391")]
    rpc_addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,braid_rpc=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();
    info!("Braid gateway starting");
    warn!("no master service connected; submission methods will fail");

    let server = RpcServer::new(GatewayState::new(None));
    let handle = server.start(args.rpc_addr).await?;

    handle.stopped().await;
    Ok(())
}
