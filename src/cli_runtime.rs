use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use lingo::remote::AdminClient;

use crate::Commands;

pub(crate) const DEFAULT_URL: &str = "http://127.0.0.1:8080";
pub(crate) const DEFAULT_SESSION_FILE: &str = ".lingo-session.json";

#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "Administration client for the lingo translation server", long_about = None)]
pub(crate) struct Cli {
    /// Server base URL
    #[arg(long, env = "LINGO_URL", default_value = DEFAULT_URL, global = true)]
    url: String,

    /// Where the login session is kept between invocations
    #[arg(long, env = "LINGO_SESSION_FILE", default_value = DEFAULT_SESSION_FILE, global = true)]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let client = AdminClient::new(&cli.url, Some(cli.session_file))?;
    crate::cli_exec::handle_command(client, cli.command)
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T, what: &str) -> Result<()> {
    use anyhow::Context;
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", what))?
    );
    Ok(())
}
