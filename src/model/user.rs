use serde::{Deserialize, Serialize};

use crate::repository::Record;

/// A principal as stored in the `Users` collection.
///
/// Every field is optional because reads may be projected down to a handful of fields, and
/// partial updates must only touch the fields that are actually set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub civility: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_system: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providers: Option<Providers>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rights: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl Record for User {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl User {
    pub fn system(&self) -> bool {
        self.is_system.unwrap_or(false)
    }

    pub fn local(&self) -> Option<&LocalProvider> {
        self.providers.as_ref().and_then(|p| p.local.as_ref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Providers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<LocalProvider>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<FederatedProvider>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<FederatedProvider>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<FederatedProvider>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalProvider {
    pub username: String,
    pub salt: String,
    pub hash: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedProvider {
    pub id: String,
    pub token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FederatedKind {
    Facebook,
    Google,
    Twitter,
}

impl FederatedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FederatedKind::Facebook => "facebook",
            FederatedKind::Google => "google",
            FederatedKind::Twitter => "twitter",
        }
    }

    pub(crate) fn slot<'a>(&self, providers: &'a mut Providers) -> &'a mut Option<FederatedProvider> {
        match self {
            FederatedKind::Facebook => &mut providers.facebook,
            FederatedKind::Google => &mut providers.google,
            FederatedKind::Twitter => &mut providers.twitter,
        }
    }
}

/// Profile handed over by an external identity provider after a successful sign-in.
#[derive(Clone, Debug)]
pub struct FederatedProfile {
    pub id: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub password_confirm: String,

    #[serde(default)]
    pub civility: Option<u8>,

    #[serde(default)]
    pub firstname: String,

    #[serde(default)]
    pub lastname: String,
}

/// Profile fields an administrator may change through `PUT /api/users/:id`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub firstname: Option<String>,

    #[serde(default)]
    pub lastname: Option<String>,

    #[serde(default)]
    pub civility: Option<u8>,

    #[serde(default)]
    pub birthdate: Option<String>,

    #[serde(default)]
    pub address: Option<serde_json::Value>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub mobile: Option<String>,
}

impl UserUpdate {
    pub fn into_user(self, id: &str) -> User {
        User {
            id: Some(id.to_string()),
            email: self.email,
            firstname: self.firstname,
            lastname: self.lastname,
            civility: self.civility,
            birthdate: self.birthdate,
            address: self.address,
            phone: self.phone,
            mobile: self.mobile,
            ..User::default()
        }
    }
}

/// Body returned by `/auth`, `/register`, `/token` and `/token/reject`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,

    pub username: String,

    #[serde(default)]
    pub rights: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}
