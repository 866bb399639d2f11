use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "adminpass1";

pub struct ServerGuard {
    pub base_url: String,
    pub data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_server() -> Result<ServerGuard> {
    spawn_server_with(&[])
}

#[allow(dead_code)]
pub fn spawn_server_with(extra_args: &[&str]) -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;
    let addr_file = data_dir.path().join("addr.txt");
    let store_dir = data_dir.path().join("data");

    let child = Command::new(env!("CARGO_BIN_EXE_lingo-server"))
        .args([
            "--addr",
            "127.0.0.1:0",
            "--addr-file",
            addr_file.to_str().unwrap(),
            "--data-dir",
            store_dir.to_str().unwrap(),
            "--jwt-secret",
            "integration-secret",
            "--admin-email",
            ADMIN_EMAIL,
            "--admin-password",
            ADMIN_PASSWORD,
        ])
        .args(extra_args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn lingo-server")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        data_dir,
        child,
    })
}

fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(10) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

#[allow(dead_code)]
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Logs in and returns `(token, refresh)`.
#[allow(dead_code)]
pub fn login(base_url: &str, email: &str, password: &str) -> Result<(String, String)> {
    let body: serde_json::Value = reqwest::blocking::Client::new()
        .post(format!("{}/auth", base_url))
        .json(&serde_json::json!({"email": email, "password": password}))
        .send()
        .context("login")?
        .error_for_status()
        .context("login status")?
        .json()
        .context("parse login")?;
    let token = body
        .get("token")
        .and_then(|v| v.as_str())
        .context("token missing")?
        .to_string();
    let refresh = body
        .get("refresh")
        .and_then(|v| v.as_str())
        .context("refresh missing")?
        .to_string();
    Ok((token, refresh))
}

#[allow(dead_code)]
pub fn admin_token(base_url: &str) -> Result<String> {
    Ok(login(base_url, ADMIN_EMAIL, ADMIN_PASSWORD)?.0)
}

/// Registers a plain user and returns its access token.
#[allow(dead_code)]
pub fn register(base_url: &str, email: &str, password: &str) -> Result<String> {
    let body: serde_json::Value = reqwest::blocking::Client::new()
        .post(format!("{}/register", base_url))
        .json(&serde_json::json!({
            "email": email,
            "password": password,
            "passwordConfirm": password,
            "civility": 1,
            "firstname": "Plain",
            "lastname": "User",
        }))
        .send()
        .context("register")?
        .error_for_status()
        .context("register status")?
        .json()
        .context("parse register")?;
    Ok(body
        .get("token")
        .and_then(|v| v.as_str())
        .context("token missing")?
        .to_string())
}
