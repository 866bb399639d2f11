use anyhow::Context;

use crate::error::ApiResult;
use crate::model::random_bytes;

pub const BCRYPT_COST: u32 = 8;

/// Salt and full bcrypt hash string, as stored on the local provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordHash {
    pub salt: String,
    pub hash: String,
}

pub fn hash_password(password: &str) -> ApiResult<PasswordHash> {
    let salt = random_bytes::<16>()?;
    let parts = bcrypt::hash_with_salt(password, BCRYPT_COST, salt).context("hash password")?;
    Ok(PasswordHash {
        salt: parts.get_salt(),
        hash: parts.to_string(),
    })
}

/// False on mismatch and on unreadable hashes alike.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// [`hash_password`] on the blocking pool, keeping bcrypt off the async workers.
pub async fn hash_password_blocking(password: &str) -> ApiResult<PasswordHash> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("join password hashing")?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(password: &str, hash: &str) -> ApiResult<bool> {
    let (password, hash) = (password.to_string(), hash.to_string());
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .context("join password verification")?;
    Ok(valid)
}
