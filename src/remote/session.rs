use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::rights;
use crate::store::write_atomic_overwrite;

/// Tokens and rights cached after a successful login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub base_url: String,
    pub username: String,
    pub token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,

    #[serde(default)]
    pub rights: Vec<String>,
}

impl Session {
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let session = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse session {}", path.display()))?;
        Ok(Some(session))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self).context("serialize session")?;
        write_atomic_overwrite(path, &bytes)
    }

    pub fn clear(path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("remove {}", path.display())),
        }
    }

    /// True when the session holds at least one of `codes`.
    pub fn can(&self, codes: &[&str]) -> bool {
        rights::intersects(&self.rights, codes)
    }
}

#[cfg(test)]
#[path = "../tests/remote/session_tests.rs"]
mod tests;
