// src/config.rs
// =============================================================================
// Runtime configuration, resolved once at startup.
//
// Every value comes from a command-line option or its environment variable
// (clap handles both, see cli.rs). The Gemini API key is the only required
// setting; the base URLs exist so tests can point the clients at a local
// mock server.
// =============================================================================

use crate::cli::GlobalArgs;
use crate::error::{AnalyzerError, AnalyzerResult};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings shared by both API clients
#[derive(Clone)]
pub struct Config {
    /// Credential for the Gemini endpoint
    pub api_key: String,
    /// Gemini model name, e.g. "gemini-3-flash-preview"
    pub model: String,
    /// Optional GitHub token; raises the anonymous rate limit
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub gemini_api_url: String,
}

impl Config {
    /// Builds a config with default endpoints for the given key
    #[cfg(test)]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            github_token: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
        }
    }

    /// Resolves the config from parsed CLI arguments
    ///
    /// Fails with MissingApiKey when neither --api-key, GEMINI_API_KEY
    /// nor API_KEY is set.
    pub fn from_args(args: &GlobalArgs) -> AnalyzerResult<Self> {
        let api_key = pick_api_key(args.api_key.clone(), || std::env::var("API_KEY").ok())
            .ok_or(AnalyzerError::MissingApiKey {
                env_var: "GEMINI_API_KEY",
            })?;

        Ok(Self {
            api_key,
            model: args.model.clone(),
            github_token: args.github_token.clone().filter(|t| !t.is_empty()),
            github_api_url: trim_base(&args.github_api_url),
            gemini_api_url: trim_base(&args.gemini_api_url),
        })
    }
}

// Hand-written so the key never ends up in a debug log
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("github_api_url", &self.github_api_url)
            .field("gemini_api_url", &self.gemini_api_url)
            .finish()
    }
}

// First non-blank key wins; a blank --api-key/GEMINI_API_KEY falls through
fn pick_api_key(
    primary: Option<String>,
    fallback: impl FnOnce() -> Option<String>,
) -> Option<String> {
    let non_blank = |key: &String| !key.trim().is_empty();
    primary
        .filter(non_blank)
        .or_else(|| fallback().filter(non_blank))
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
