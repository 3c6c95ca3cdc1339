//! GitHub API client creation and request plumbing.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::convert::to_repo;
use super::types::GithubRepo;
use crate::client::RepoClient;
use crate::error::{ApiErrorBody, TransportError};
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::model::{Repo, RepoRequest};

/// Default GitHub API host.
pub const GITHUB_HOST: &str = "https://api.github.com";

/// Timeout for the default transport.
const REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// GitHub API client.
///
/// Issues one network round-trip per operation with no internal retry.
/// Constructed explicitly and injected where needed; there is no shared
/// global instance.
#[derive(Clone)]
pub struct GithubClient {
    transport: Arc<dyn HttpTransport>,
    host: String,
    token: String,
}

impl GithubClient {
    /// Create a client backed by the default reqwest transport.
    ///
    /// # Arguments
    ///
    /// * `host` - API host URL (e.g., [`GITHUB_HOST`] or a GitHub
    ///   Enterprise endpoint)
    /// * `token` - Personal access token
    pub fn new(host: &str, token: &str) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::with_timeout(REQUEST_TIMEOUT)
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self::new_with_transport(host, token, Arc::new(transport)))
    }

    /// Create a client over an explicit transport.
    pub fn new_with_transport(
        host: &str,
        token: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let host = host.trim_end_matches('/').to_string();
        Self {
            transport,
            host,
            token: token.to_string(),
        }
    }

    /// Get the host URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn request(&self, method: HttpMethod, path: &str, body: Vec<u8>) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{}", self.host, path),
            headers: vec![
                (
                    "Accept".to_string(),
                    "application/vnd.github+json".to_string(),
                ),
                ("User-Agent".to_string(), "warden".to_string()),
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.token),
                ),
            ],
            body,
        }
    }

    /// Send a request; a non-2xx response becomes `TransportError::Status`
    /// with the error body attached when it decodes.
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportError> {
        tracing::debug!(method = method.as_str(), path, "issuing request");

        let response = self
            .transport
            .send(self.request(method, path, body))
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if (200..300).contains(&response.status) {
            return Ok(response);
        }

        let body = serde_json::from_slice::<ApiErrorBody>(&response.body).ok();
        tracing::warn!(
            status = response.status,
            path,
            detail = body.as_ref().and_then(|b| b.message.as_deref()),
            "request failed"
        );
        Err(TransportError::Status {
            status: response.status,
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Vec<u8>,
    ) -> Result<T, TransportError> {
        let response = self.send(method, path, body).await?;
        serde_json::from_slice(&response.body).map_err(TransportError::from)
    }
}

#[async_trait]
impl RepoClient for GithubClient {
    async fn list(&self) -> Result<Vec<Repo>, TransportError> {
        // GET /user/repos - 200, JSON array
        let repos: Vec<GithubRepo> = self
            .send_json(HttpMethod::Get, "/user/repos", Vec::new())
            .await?;
        Ok(repos.into_iter().map(to_repo).collect())
    }

    async fn create(&self, req: &RepoRequest) -> Result<Repo, TransportError> {
        // POST /user/repos - 201, JSON repository object
        let body = serde_json::to_vec(req)?;
        let repo: GithubRepo = self
            .send_json(HttpMethod::Post, "/user/repos", body)
            .await?;
        Ok(to_repo(repo))
    }

    async fn update(
        &self,
        owner: &str,
        name: &str,
        req: &RepoRequest,
    ) -> Result<Repo, TransportError> {
        // PATCH /repos/{owner}/{name} - 200, JSON repository object
        let body = serde_json::to_vec(req)?;
        let path = format!("/repos/{}/{}", owner, name);
        let repo: GithubRepo = self.send_json(HttpMethod::Patch, &path, body).await?;
        Ok(to_repo(repo))
    }

    async fn delete(&self, owner: &str, name: &str) -> Result<(), TransportError> {
        // DELETE /repos/{owner}/{name} - 204, empty body
        let path = format!("/repos/{}/{}", owner, name);
        self.send(HttpMethod::Delete, &path, Vec::new()).await?;
        Ok(())
    }
}
