// src/error.rs
// =============================================================================
// This module defines every way an analysis can fail.
//
// The pipeline never recovers from an error: whichever stage fails first
// aborts the run, and the error's message becomes the single banner shown
// to the user. The Display text of each variant is therefore user-facing.
//
// Rust concepts:
// - thiserror: derive macro that writes the Display and Error impls for us
// - #[from]: lets the ? operator convert a reqwest::Error automatically
// =============================================================================

use thiserror::Error;

/// Errors produced by the resolver, the requester, or configuration.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The input did not look like github.com/owner/repo
    #[error("Invalid GitHub URL. Please use the format: https://github.com/owner/repo")]
    InvalidUrl,

    /// GitHub answered 404
    #[error("Repository not found. Ensure it is a public repository.")]
    NotFound,

    /// GitHub answered 403
    #[error("GitHub API rate limit exceeded. Please try again later.")]
    RateLimited,

    /// GitHub answered with some other non-2xx status
    #[error("Failed to fetch repository data. (HTTP {status})")]
    Fetch { status: u16 },

    /// The model returned no text at all
    #[error("AI failed to generate analysis")]
    Generation,

    /// A payload did not match the shape we decode it into
    #[error("Unexpected {payload} payload: {source}")]
    Schema {
        payload: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The model endpoint answered with a non-2xx status
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network-level failure (DNS, connection reset, TLS...)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// No credential for the model endpoint was configured
    #[error("Missing API key: set {env_var} or pass --api-key")]
    MissingApiKey { env_var: &'static str },

    /// The credential is set but cannot travel in an HTTP header
    #[error("Invalid API key: it contains characters that are not allowed in an HTTP header")]
    InvalidApiKey,
}

impl AnalyzerError {
    pub fn schema(payload: &'static str, source: serde_json::Error) -> Self {
        Self::Schema { payload, source }
    }
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
