use std::sync::Arc;

use anyhow::{Context, Result};

use super::super::types::AppState;
use super::Args;

/// Creates the system administrator on first start so the API is usable at all.
pub(super) async fn seed_system_user(state: &Arc<AppState>, args: &Args) -> Result<()> {
    let seeded = state
        .users
        .ensure_system_user(&args.admin_email, &args.admin_password)
        .await
        .context("seed system user")?;
    if seeded.is_some() && args.admin_password == "changeme" {
        tracing::warn!(email = %args.admin_email, "system administrator uses the default password");
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../../tests/bin/lingo_server/runtime/seed_tests.rs"]
mod tests;
