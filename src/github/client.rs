//! GitHub contents API client.
//!
//! A thin wrapper around one endpoint:
//! `GET /repos/{owner}/{repo}/contents/{path}?ref={ref}`
//!
//! Requests always carry a User-Agent (GitHub rejects anonymous agents) and
//! a bearer token when one was configured. No retries, no rate-limit
//! handling: a non-2xx response or undecodable body surfaces as an error
//! carrying whatever the upstream said.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::ContentEntry;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("hub-viewer/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: reqwest::Client,
    token: Option<String>,
    api_base: String,
}

pub type SharedClient = Arc<GitHubClient>;

impl GitHubClient {
    pub fn new(token: Option<String>) -> Self {
        Self::with_api_base(token, DEFAULT_API_BASE)
    }

    /// Point the client at a different API base. Tests use this to target a
    /// local mock server.
    pub fn with_api_base(token: Option<String>, api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            api_base: api_base.into(),
        }
    }

    /// Token comes from `GITHUB_TOKEN`; unauthenticated when unset or empty.
    pub fn from_env() -> Self {
        let token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        Self::new(token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// List the entries at `path` (empty string means the repository root),
    /// optionally pinned to a branch/tag/commit ref.
    pub async fn contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: Option<&str>,
    ) -> Result<Vec<ContentEntry>> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, owner, repo, path
        );

        let mut request = self.http.get(&url).header("User-Agent", USER_AGENT);

        if let Some(reference) = reference {
            request = request.query(&[("ref", reference)]);
        }

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }
}
