// src/github/fetch.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Two calls, always in this order:
// 1. GET /repos/{owner}/{repo}   -> RepositoryMetadata (required)
// 2. GET {languages_url}         -> LanguageDistribution (best effort)
//
// The error policies differ on purpose: without metadata there is nothing
// to show, so every failure of call 1 aborts the analysis. A missing
// language breakdown only leaves the chart empty, so call 2 never fails.
//
// No retries, no caching, no pagination.
// =============================================================================

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::{AnalyzerError, AnalyzerResult};

use super::types::{LanguageDistribution, RepositoryIdentifier, RepositoryMetadata};

// GitHub rejects requests without a User-Agent
const USER_AGENT: &str = concat!("repo-lens/", env!("CARGO_PKG_VERSION"));

/// Client for the two GitHub endpoints we need
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
}

impl GithubClient {
    /// Builds the client once; reqwest pools connections internally
    pub fn new(config: &Config) -> AnalyzerResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(token) = &config.github_token {
            // An invalid header value can only come from a malformed token;
            // fall back to anonymous access rather than refusing to start
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("GITHUB_TOKEN contains invalid characters, ignoring it"),
            }
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: config.github_api_url.clone(),
        })
    }

    /// Fetches repository metadata
    ///
    /// Status mapping:
    ///   404 -> NotFound
    ///   403 -> RateLimited
    ///   any other non-2xx -> Fetch
    pub async fn fetch_metadata(
        &self,
        identifier: &RepositoryIdentifier,
    ) -> AnalyzerResult<RepositoryMetadata> {
        let url = format!(
            "{}/repos/{}/{}",
            self.api_url, identifier.owner, identifier.name
        );
        debug!(%url, "fetching repository metadata");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(match status {
                StatusCode::NOT_FOUND => AnalyzerError::NotFound,
                StatusCode::FORBIDDEN => AnalyzerError::RateLimited,
                other => AnalyzerError::Fetch {
                    status: other.as_u16(),
                },
            });
        }

        // Read the body as text first so a shape mismatch becomes a
        // SchemaError instead of an opaque transport error
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| AnalyzerError::schema("repository metadata", e))
    }

    /// Fetches the language breakdown; any failure yields an empty map
    pub async fn fetch_languages(&self, languages_url: &Url) -> LanguageDistribution {
        debug!(url = %languages_url, "fetching language breakdown");

        let response = match self.client.get(languages_url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "language request failed, continuing without languages");
                return LanguageDistribution::new();
            }
        };

        if !response.status().is_success() {
            warn!(
                status = response.status().as_u16(),
                "language endpoint returned an error, continuing without languages"
            );
            return LanguageDistribution::new();
        }

        match response.json::<LanguageDistribution>().await {
            Ok(languages) => languages,
            Err(e) => {
                warn!(error = %e, "could not decode language breakdown");
                LanguageDistribution::new()
            }
        }
    }
}
