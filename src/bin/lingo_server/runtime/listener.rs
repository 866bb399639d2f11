use anyhow::{Context, Result};
use tokio::net::TcpListener;

use super::Args;

/// Binds `--addr` and publishes the bound address to `--addr-file`, so callers passing port 0
/// can find the server.
pub(super) async fn open_listener(args: &Args) -> Result<TcpListener> {
    let listener = TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(addr = %local_addr, "lingo-server listening");

    if let Some(addr_file) = &args.addr_file {
        lingo::store::write_atomic_overwrite(addr_file, local_addr.to_string().as_bytes())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }
    Ok(listener)
}
