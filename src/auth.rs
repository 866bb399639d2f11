//! Access/refresh token issuance and verification, credential login and sign-up.

use anyhow::anyhow;

use crate::error::{ApiError, ApiResult, ERR_USER_CREDENTIALS};
use crate::model::{AuthResponse, Credentials, RegisterRequest, User};
use crate::rights;
use crate::store::{Filter, Projection};
use crate::users::UsersService;
use crate::validators;

mod password;
mod refresh;
mod tokens;

pub use self::password::{
    BCRYPT_COST, PasswordHash, hash_password, hash_password_blocking, verify_password,
    verify_password_blocking,
};
pub use self::refresh::derive_refresh_value;
pub use self::tokens::{AccessClaims, TokenSigner};

pub const DEFAULT_TOKEN_TTL_SECS: u64 = 120;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

/// The authenticated caller of a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub username: String,
    pub rights: Vec<String>,
    pub system: bool,
}

impl Principal {
    pub fn from_user(user: &User) -> ApiResult<Self> {
        let id = user
            .id
            .clone()
            .ok_or_else(|| anyhow!("principal record has no id"))?;
        Ok(Self {
            id,
            username: user.email.clone().unwrap_or_default(),
            rights: effective_rights(user),
            system: user.system(),
        })
    }

    pub fn can(&self, required: &[&str]) -> bool {
        self.system || rights::intersects(&self.rights, required)
    }
}

/// Rights as seen by callers: system principals hold the whole catalogue.
pub fn effective_rights(user: &User) -> Vec<String> {
    if user.system() {
        return rights::all();
    }
    user.rights.clone().unwrap_or_default()
}

pub fn authorize(principal: &Principal, required: &[&str]) -> ApiResult<()> {
    if principal.can(required) {
        return Ok(());
    }
    tracing::debug!(user = %principal.id, required = ?required, "authorization denied");
    Err(ApiError::forbidden())
}

pub struct Authenticator {
    signer: TokenSigner,
    users: UsersService,
}

impl Authenticator {
    pub fn new(config: &AuthConfig, users: UsersService) -> Self {
        Self {
            signer: TokenSigner::new(&config.jwt_secret, config.token_ttl_secs),
            users,
        }
    }

    pub fn users(&self) -> &UsersService {
        &self.users
    }

    pub fn issue_access_token(&self, principal_id: &str) -> ApiResult<String> {
        self.signer.sign(principal_id)
    }

    /// Derives a new refresh value and stores it on the principal, replacing the previous one.
    pub async fn issue_refresh_token(&self, user: &User) -> ApiResult<String> {
        let id = user
            .id
            .as_deref()
            .ok_or_else(|| anyhow!("principal record has no id"))?;
        let value = derive_refresh_value(id, user.email.as_deref().unwrap_or(""))?;
        let patch = User {
            id: Some(id.to_string()),
            refresh: Some(value.clone()),
            ..User::default()
        };
        self.users.repo().update(&patch, false).await?;
        Ok(value)
    }

    pub async fn verify_access_token(&self, token: &str) -> ApiResult<Principal> {
        let claims = self.signer.verify(token)?;
        let projection = Projection::include(&["email", "rights", "isSystem"]);
        let user = self
            .users
            .repo()
            .get_by_id_with(&claims.id, Some(projection))
            .await
            .map_err(|e| match e {
                ApiError::NotFound(_) => ApiError::unauthorized("Unauthorized"),
                other => other,
            })?;
        Principal::from_user(&user)
    }

    pub async fn exchange_refresh_token(&self, refresh: Option<&str>) -> ApiResult<AuthResponse> {
        let refresh = required_refresh(refresh)?;
        let user = self
            .users
            .repo()
            .find_one(Filter::eq("refresh", refresh))
            .await?
            .ok_or(ApiError::InvalidRefresh)?;
        let principal = Principal::from_user(&user)?;
        let token = self.issue_access_token(&principal.id)?;
        tracing::debug!(user = %principal.id, "access token refreshed");
        Ok(token_response(token, None, principal))
    }

    /// Invalidates the caller's refresh value; it must match the stored one.
    pub async fn reject_refresh_token(
        &self,
        principal: &Principal,
        refresh: Option<&str>,
    ) -> ApiResult<AuthResponse> {
        let refresh = required_refresh(refresh)?;
        let stored = self
            .users
            .repo()
            .get_by_id_with(&principal.id, Some(Projection::include(&["refresh"])))
            .await?;
        if stored.refresh.as_deref() != Some(refresh) {
            return Err(ApiError::InvalidRefresh);
        }
        self.users.repo().unset_fields(&principal.id, &["refresh"]).await?;
        let token = self.issue_access_token(&principal.id)?;
        tracing::info!(user = %principal.id, "refresh token rejected");
        Ok(token_response(token, None, principal.clone()))
    }

    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        let user = self.users.find_by_username(&credentials.email).await?;
        let accepted = match &user {
            Some(user) => {
                self.users
                    .is_valid_password(user, &credentials.password)
                    .await?
            }
            None => false,
        };
        let Some(user) = user.filter(|_| accepted) else {
            tracing::info!(username = %credentials.email, "login refused");
            return Err(ApiError::unauthorized(ERR_USER_CREDENTIALS));
        };
        self.respond_with_tokens(&user).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        validators::validate_register(request)?;
        let user = self.users.create_user(request).await?;
        self.respond_with_tokens(&user).await
    }

    async fn respond_with_tokens(&self, user: &User) -> ApiResult<AuthResponse> {
        let principal = Principal::from_user(user)?;
        let token = self.issue_access_token(&principal.id)?;
        let refresh = self.issue_refresh_token(user).await?;
        tracing::info!(user = %principal.id, "signed in");
        Ok(token_response(token, Some(refresh), principal))
    }
}

fn required_refresh(refresh: Option<&str>) -> ApiResult<&str> {
    refresh
        .filter(|r| !r.is_empty())
        .ok_or(ApiError::TokenRequired)
}

fn token_response(token: String, refresh: Option<String>, principal: Principal) -> AuthResponse {
    AuthResponse {
        token,
        refresh,
        username: principal.username,
        rights: principal.rights,
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
