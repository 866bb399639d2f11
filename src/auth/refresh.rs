use crate::error::ApiResult;
use crate::model::random_bytes;

/// Opaque refresh value: `<principal id>.<hex digest>`. The digest mixes a fresh random salt with
/// the principal's email and the current time in milliseconds.
pub fn derive_refresh_value(principal_id: &str, email: &str) -> ApiResult<String> {
    let salt = random_bytes::<16>()?;
    let now_ms = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

    let mut hasher = blake3::Hasher::new();
    hasher.update(&salt);
    hasher.update(format!("{}-{}", email, now_ms).as_bytes());
    Ok(format!("{}.{}", principal_id, hasher.finalize().to_hex()))
}
