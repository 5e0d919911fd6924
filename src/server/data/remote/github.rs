//! GitHub contents API client.
//!
//! Implements [`RemoteStore`] over `GET`/`PUT /repos/{repo}/contents/{path}`. The
//! revision token is the blob `sha` GitHub returns with each file.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
    RequestBuilder, StatusCode,
};
use serde::{Deserialize, Serialize};
use serenity::async_trait;

use crate::server::{
    data::remote::{RemoteFile, RemoteStore},
    error::remote::RemoteError,
};

pub const GITHUB_API_URL: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = "rerollboard";

#[derive(Deserialize)]
struct ContentsResponse {
    sha: String,
    /// Base64 with embedded newlines; empty for files too large to inline.
    #[serde(default)]
    content: String,
}

#[derive(Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

/// Remote store backed by a GitHub repository branch.
pub struct GitHubStore {
    http: reqwest::Client,
    api_url: String,
    token: String,
    repo: String,
    branch: String,
}

impl GitHubStore {
    /// Creates a client for one repository branch.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client
    /// - `api_url` - API base URL, normally [`GITHUB_API_URL`]
    /// - `token` - Personal access token with contents write permission
    /// - `repo` - Repository in `owner/name` form
    /// - `branch` - Branch to read and commit to
    pub fn new(
        http: reqwest::Client,
        api_url: impl Into<String>,
        token: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.api_url,
            self.repo,
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }
}

#[async_trait]
impl RemoteStore for GitHubStore {
    async fn fetch(&self, path: &str) -> Result<Option<RemoteFile>, RemoteError> {
        let response = self
            .authorized(self.http.get(self.contents_url(path)))
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(RemoteError::Status {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body: ContentsResponse = response.json().await?;
        let encoded: String = body.content.split_whitespace().collect();
        let content = STANDARD
            .decode(encoded)
            .map_err(|source| RemoteError::Decode {
                path: path.to_string(),
                source,
            })?;

        Ok(Some(RemoteFile {
            content,
            revision: body.sha,
        }))
    }

    async fn store(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        revision: Option<&str>,
    ) -> Result<(), RemoteError> {
        let request = PutContentsRequest {
            message,
            content: STANDARD.encode(content),
            branch: &self.branch,
            sha: revision,
        };

        let response = self
            .authorized(self.http.put(self.contents_url(path)))
            .json(&request)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                tracing::debug!("Wrote {} to {} ({})", path, self.repo, message);
                Ok(())
            }
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(RemoteError::Conflict(path.to_string()))
            }
            status => Err(RemoteError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}
