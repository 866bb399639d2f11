//! Principal management on top of the `Users` collection.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::{hash_password_blocking, verify_password_blocking};
use crate::error::{ApiError, ApiResult, ERR_USER_EXISTS};
use crate::model::{
    FederatedKind, FederatedProfile, FederatedProvider, LocalProvider, Providers, RegisterRequest,
    User, UserUpdate,
};
use crate::repository::{Pagination, Repository};
use crate::rights;
use crate::store::{Filter, Projection};
use crate::validators;

pub const USERS_COLLECTION: &str = "Users";

const SEARCH_FIELDS: &[&str] = &["email", "firstname", "lastname"];

/// Fields never returned by listings or profile reads.
pub fn public_projection() -> Projection {
    Projection::exclude(&["rights", "providers", "refresh"])
}

fn search_filter(search: Option<&str>) -> ApiResult<Filter> {
    Filter::search(SEARCH_FIELDS, search)
        .map_err(|e| ApiError::unprocessable(format!("invalid search: {}", e)))
}

#[derive(Clone)]
pub struct UsersService {
    repo: Repository<User>,
    /// Held from the uniqueness check to the insert of every new principal.
    create_lock: Arc<Mutex<()>>,
}

impl UsersService {
    pub fn new(repo: Repository<User>) -> Self {
        Self {
            repo,
            create_lock: Arc::new(Mutex::new(())),
        }
    }

    pub(crate) fn repo(&self) -> &Repository<User> {
        &self.repo
    }

    pub async fn list(&self, search: Option<&str>, pagination: &Pagination) -> ApiResult<Vec<User>> {
        self.repo
            .list(search_filter(search)?, Some(public_projection()), Some(pagination))
            .await
    }

    pub async fn count(&self, search: Option<&str>) -> ApiResult<u64> {
        self.repo.count(&search_filter(search)?).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<User> {
        self.repo.get_by_id_with(id, Some(public_projection())).await
    }

    pub async fn find_by_username(&self, username: &str) -> ApiResult<Option<User>> {
        self.repo
            .find_one(Filter::eq("providers.local.username", username))
            .await
    }

    /// Creates a local principal with no rights.
    pub async fn create_user(&self, request: &RegisterRequest) -> ApiResult<User> {
        let _guard = self.create_lock.lock().await;
        if self.find_by_username(&request.email).await?.is_some() {
            return Err(ApiError::unprocessable(ERR_USER_EXISTS));
        }

        let mut user = User {
            email: Some(request.email.clone()),
            firstname: Some(request.firstname.clone()),
            lastname: Some(request.lastname.clone()),
            civility: request.civility,
            ..User::default()
        };
        self.create_password(&mut user, &request.password).await?;

        let created = self.repo.insert(&user).await?;
        tracing::info!(user = ?created.id, email = %request.email, "user created");
        Ok(created)
    }

    /// Hashes `password` into the local provider, creating it from the email when missing.
    pub async fn create_password(&self, user: &mut User, password: &str) -> ApiResult<()> {
        let hashed = hash_password_blocking(password).await?;
        let username = user.email.clone().unwrap_or_default();
        let providers = user.providers.get_or_insert_with(Providers::default);
        let local = providers.local.get_or_insert_with(|| LocalProvider {
            username,
            ..LocalProvider::default()
        });
        local.salt = hashed.salt;
        local.hash = hashed.hash;
        Ok(())
    }

    pub async fn is_valid_password(&self, user: &User, password: &str) -> ApiResult<bool> {
        let Some(local) = user.local() else {
            return Ok(false);
        };
        verify_password_blocking(password, &local.hash).await
    }

    pub async fn get_user_rights(&self, id: &str) -> ApiResult<Vec<String>> {
        let user = self
            .repo
            .get_by_id_with(id, Some(Projection::include(&["rights"])))
            .await?;
        Ok(user.rights.unwrap_or_default())
    }

    pub async fn save_user_rights(&self, id: &str, codes: Vec<String>) -> ApiResult<Vec<String>> {
        validators::validate_rights(&codes)?;
        let patch = User {
            id: Some(id.to_string()),
            rights: Some(codes.clone()),
            ..User::default()
        };
        self.repo.update(&patch, false).await?;
        tracing::info!(user = %id, rights = codes.len(), "user rights saved");
        Ok(codes)
    }

    /// Finds the principal linked to an external identity, creating it on first sign-in.
    pub async fn find_or_create_federated(
        &self,
        kind: FederatedKind,
        profile: &FederatedProfile,
    ) -> ApiResult<User> {
        let path = format!("providers.{}.id", kind.as_str());
        let _guard = self.create_lock.lock().await;
        if let Some(user) = self.repo.find_one(Filter::eq(&path, profile.id.as_str())).await? {
            return Ok(user);
        }

        let mut providers = Providers::default();
        *kind.slot(&mut providers) = Some(FederatedProvider {
            id: profile.id.clone(),
            token: profile.access_token.clone(),
            refresh_token: profile.refresh_token.clone(),
            email: profile.email.clone(),
            name: profile.display_name.clone().or_else(|| profile.username.clone()),
        });
        let user = User {
            email: profile.email.clone(),
            lastname: profile.display_name.clone(),
            providers: Some(providers),
            ..User::default()
        };
        let created = self.repo.insert(&user).await?;
        tracing::info!(user = ?created.id, provider = kind.as_str(), "federated user created");
        Ok(created)
    }

    /// Merges profile fields only; the body id, when present, must address the same principal.
    pub async fn update_profile(&self, id: &str, update: UserUpdate) -> ApiResult<User> {
        if update.id.as_deref().is_some_and(|body_id| body_id != id) {
            return Err(ApiError::unprocessable("Bad user"));
        }
        self.repo.update(&update.into_user(id), false).await?;
        self.get(id).await
    }

    pub async fn remove(&self, id: &str) -> ApiResult<u64> {
        let count = self.repo.remove(id).await?;
        tracing::info!(user = %id, count, "user removed");
        Ok(count)
    }

    /// Creates the system administrator when no principal exists yet. Returns the created user.
    pub async fn ensure_system_user(&self, email: &str, password: &str) -> ApiResult<Option<User>> {
        let _guard = self.create_lock.lock().await;
        if self.repo.count(&Filter::All).await? > 0 {
            return Ok(None);
        }
        let mut user = User {
            email: Some(email.to_string()),
            firstname: Some("System".to_string()),
            lastname: Some("Administrator".to_string()),
            civility: Some(0),
            is_system: Some(true),
            rights: Some(rights::all()),
            ..User::default()
        };
        self.create_password(&mut user, password).await?;
        let created = self.repo.insert(&user).await?;
        tracing::info!(email = %email, "seeded system administrator");
        Ok(Some(created))
    }
}

#[cfg(test)]
#[path = "tests/users_tests.rs"]
mod tests;
