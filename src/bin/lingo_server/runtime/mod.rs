use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lingo::auth::DEFAULT_TOKEN_TTL_SECS;

mod app;
mod listener;
mod seed;
mod shutdown;

use self::app::{build_app_router, build_state, init_tracing, open_store};
use self::listener::open_listener;
use self::seed::seed_system_user;
use self::shutdown::shutdown_signal;

#[derive(Parser)]
#[command(name = "lingo-server")]
#[command(about = "Users and language resources administration API", long_about = None)]
pub(super) struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub(super) addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    pub(super) addr_file: Option<PathBuf>,

    /// Directory holding one JSON file per collection
    #[arg(long, default_value = "./lingo-data")]
    pub(super) data_dir: PathBuf,

    /// Keep every collection in memory; nothing is written to disk
    #[arg(long)]
    pub(super) in_memory: bool,

    /// Secret used to sign access tokens. A random one is generated when unset, which
    /// invalidates every token on restart.
    #[arg(long, env = "LINGO_JWT_SECRET")]
    pub(super) jwt_secret: Option<String>,

    /// Access token lifetime
    #[arg(long, default_value_t = DEFAULT_TOKEN_TTL_SECS)]
    pub(super) token_ttl_secs: u64,

    /// Email of the system administrator created when no user exists
    #[arg(long, default_value = "admin@lingo.local")]
    pub(super) admin_email: String,

    /// Password of the seeded system administrator
    #[arg(long, env = "LINGO_ADMIN_PASSWORD", default_value = "changeme")]
    pub(super) admin_password: String,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub(super) log_level: String,
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let store = open_store(&args)?;
    let state = build_state(&args, store)?;
    seed_system_user(&state, &args).await?;

    let app = build_app_router(state);
    let listener = open_listener(&args).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
