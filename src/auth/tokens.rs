use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Claims carried by an access token. Only the principal id is embedded; everything else is
/// re-read from storage on verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub id: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: ttl_secs.min(i64::MAX as u64) as i64,
        }
    }

    pub fn sign(&self, principal_id: &str) -> ApiResult<String> {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        self.sign_at(principal_id, now)
    }

    pub(crate) fn sign_at(&self, principal_id: &str, issued_at: i64) -> ApiResult<String> {
        let claims = AccessClaims {
            id: principal_id.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("sign access token: {}", e))?;
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> ApiResult<AccessClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "access token rejected");
            ApiError::unauthorized("Unauthorized")
        })?;
        Ok(data.claims)
    }
}
