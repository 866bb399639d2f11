use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};

use super::*;
use crate::error::{ErrorBody, STATUS_INVALID_REFRESH};

impl AdminClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Refuses locally when the cached session lacks every one of `codes`.
    pub(super) fn require(&self, codes: &[&str]) -> Result<()> {
        let session = self.require_session()?;
        if !session.can(codes) {
            anyhow::bail!(
                "forbidden (session lacks any of: {})",
                codes.join(", ")
            );
        }
        Ok(())
    }

    /// Sends an authenticated request. On 401 the access token is refreshed once and the
    /// request is rebuilt and sent again.
    pub(super) fn send_authed(
        &mut self,
        label: &str,
        build: impl Fn(&Client, &str, String) -> RequestBuilder,
    ) -> Result<Response> {
        let token = self.require_session()?.token.clone();
        let resp = build(&self.client, &self.base_url, format!("Bearer {}", token))
            .send()
            .with_context(|| label.to_string())?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return self.ensure_ok(resp, label);
        }

        self.refresh()?;
        let token = self.require_session()?.token.clone();
        let resp = build(&self.client, &self.base_url, format!("Bearer {}", token))
            .send()
            .with_context(|| label.to_string())?;
        self.ensure_ok(resp, label)
    }

    pub(super) fn ensure_ok(&self, resp: Response, label: &str) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::UNAUTHORIZED {
            let detail = error_message(resp).unwrap_or_else(|| "Unauthorized".to_string());
            anyhow::bail!("{}: unauthorized ({}; run `lingo login`)", label, detail);
        }
        if status == StatusCode::FORBIDDEN {
            anyhow::bail!("{}: forbidden (insufficient rights)", label);
        }
        if status.as_u16() == STATUS_INVALID_REFRESH {
            anyhow::bail!("{}: refresh token rejected", label);
        }
        let detail = error_message(resp).unwrap_or_else(|| status.to_string());
        anyhow::bail!("{}: {} ({})", label, detail, status.as_u16())
    }
}

fn error_message(resp: Response) -> Option<String> {
    let body: ErrorBody = resp.json().ok()?;
    if body.details.is_empty() {
        return Some(body.message);
    }
    let fields: Vec<String> = body
        .details
        .iter()
        .map(|d| format!("{}: {}", d.property, d.message))
        .collect();
    Some(format!("{} [{}]", body.message, fields.join("; ")))
}
