mod common;

use std::process::Command;

use anyhow::{Context, Result};

fn run_lingo(session_file: &std::path::Path, url: &str, args: &[&str]) -> Result<String> {
    let out = Command::new(env!("CARGO_BIN_EXE_lingo"))
        .args(args)
        .env("LINGO_URL", url)
        .env("LINGO_SESSION_FILE", session_file)
        .env_remove("LINGO_PASSWORD")
        .output()
        .with_context(|| format!("run lingo {:?}", args))?;

    if !out.status.success() {
        anyhow::bail!(
            "lingo {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

#[test]
fn cli_help_surface_is_stable() -> Result<()> {
    let tmp = tempfile::tempdir().context("tempdir")?;
    let session = tmp.path().join("session.json");

    let help = run_lingo(&session, "http://127.0.0.1:1", &["--help"])?;
    assert!(help.contains("Usage: lingo"));
    for command in ["login", "logout", "whoami", "users", "languages", "resources"] {
        assert!(help.contains(command), "missing {}", command);
    }

    let users_help = run_lingo(&session, "http://127.0.0.1:1", &["users", "--help"])?;
    assert!(users_help.contains("set-rights"));
    assert!(users_help.contains("catalogue"));

    Ok(())
}

#[test]
fn cli_drives_the_server() -> Result<()> {
    let server = common::spawn_server()?;
    let session = server.data_dir.path().join("cli-session.json");
    let url = server.base_url.as_str();

    run_lingo(
        &session,
        url,
        &[
            "login",
            "--email",
            common::ADMIN_EMAIL,
            "--password",
            common::ADMIN_PASSWORD,
        ],
    )?;
    assert!(session.exists());

    let whoami = run_lingo(&session, url, &["whoami"])?;
    assert!(whoami.contains(common::ADMIN_EMAIL));

    let id = run_lingo(
        &session,
        url,
        &[
            "languages",
            "create",
            "--name",
            "Italiano",
            "--flag",
            "it",
            "--culture",
            "it",
        ],
    )?;
    let id = id.trim().to_string();
    assert_eq!(id.len(), 24);

    run_lingo(
        &session,
        url,
        &["resources", "add", &id, "--key", "hello", "--value", "Ciao"],
    )?;

    let listed: serde_json::Value = serde_json::from_str(&run_lingo(
        &session,
        url,
        &["resources", "list", &id, "--json"],
    )?)
    .context("parse resources json")?;
    assert_eq!(listed[0]["value"], "Ciao");

    let shown = run_lingo(&session, url, &["languages", "display", "it"])?;
    assert_eq!(shown.trim(), "hello = Ciao");

    run_lingo(&session, url, &["logout"])?;
    assert!(!session.exists());

    Ok(())
}
