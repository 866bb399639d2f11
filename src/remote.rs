//! Blocking HTTP client for the administration API, with a persisted login session.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::{AuthResponse, Credentials, RefreshRequest, RegisterRequest};

mod http_client;
mod languages;
mod session;
mod types;
mod users;

pub use self::session::Session;
pub use self::types::*;

pub struct AdminClient {
    base_url: String,
    session_file: Option<PathBuf>,
    session: Option<Session>,
    client: reqwest::blocking::Client,
}

impl AdminClient {
    /// Builds a client for `base_url`, resuming the session stored in `session_file` when it was
    /// opened against the same server.
    pub fn new(base_url: &str, session_file: Option<PathBuf>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("lingo")
            .build()
            .context("build reqwest client")?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let session = match &session_file {
            Some(path) => Session::load(path)?.filter(|s| s.base_url == base_url),
            None => None,
        };

        Ok(Self {
            base_url,
            session_file,
            session,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self
            .client
            .post(self.url("/auth"))
            .json(&credentials)
            .send()
            .context("login")?;
        let auth: AuthResponse = self
            .ensure_ok(resp, "login")?
            .json()
            .context("parse login response")?;
        self.start_session(&auth)?;
        Ok(auth)
    }

    pub fn register(&mut self, request: &RegisterRequest) -> Result<AuthResponse> {
        let resp = self
            .client
            .post(self.url("/register"))
            .json(request)
            .send()
            .context("register")?;
        let auth: AuthResponse = self
            .ensure_ok(resp, "register")?
            .json()
            .context("parse register response")?;
        self.start_session(&auth)?;
        Ok(auth)
    }

    /// Exchanges the stored refresh value for a new access token. A rejected refresh value ends
    /// the session.
    pub fn refresh(&mut self) -> Result<()> {
        let session = self.require_session()?;
        let body = RefreshRequest {
            refresh: session.refresh.clone(),
        };
        let resp = self
            .client
            .post(self.url("/token"))
            .json(&body)
            .send()
            .context("refresh token")?;

        if resp.status().as_u16() == crate::error::STATUS_INVALID_REFRESH
            || resp.status().as_u16() == crate::error::STATUS_TOKEN_REQUIRED
        {
            self.end_session()?;
            anyhow::bail!("session expired (run `lingo login`)");
        }
        let auth: AuthResponse = self
            .ensure_ok(resp, "refresh token")?
            .json()
            .context("parse refresh response")?;

        if let Some(session) = self.session.as_mut() {
            session.token = auth.token;
            session.username = auth.username;
            session.rights = auth.rights;
        }
        self.persist_session()
    }

    /// Invalidates the refresh value on the server, then forgets the local session.
    pub fn logout(&mut self) -> Result<()> {
        let Some(session) = self.session.clone() else {
            return Ok(());
        };
        let body = RefreshRequest {
            refresh: session.refresh.clone(),
        };
        let outcome = self.send_authed("logout", |client, base, auth| {
            client
                .post(format!("{}/token/reject", base))
                .header(reqwest::header::AUTHORIZATION, auth)
                .json(&body)
        });
        self.end_session()?;
        outcome.map(|_| ())
    }

    fn start_session(&mut self, auth: &AuthResponse) -> Result<()> {
        self.session = Some(Session {
            base_url: self.base_url.clone(),
            username: auth.username.clone(),
            token: auth.token.clone(),
            refresh: auth.refresh.clone(),
            rights: auth.rights.clone(),
        });
        self.persist_session()
    }

    fn persist_session(&self) -> Result<()> {
        match (&self.session, &self.session_file) {
            (Some(session), Some(path)) => session.save(path),
            _ => Ok(()),
        }
    }

    fn end_session(&mut self) -> Result<()> {
        self.session = None;
        match &self.session_file {
            Some(path) => Session::clear(path),
            None => Ok(()),
        }
    }

    fn require_session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .context("not logged in (run `lingo login`)")
    }
}
