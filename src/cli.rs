// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three subcommands:
// - analyze <URL>: run one analysis and print the dashboard
// - example:       the same, for the built-in example repository
// - interactive:   keep a session open and read one URL per line from stdin
//
// Global options (API key, model, endpoints) can also come from environment
// variables thanks to clap's `env` feature.
// =============================================================================

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_GEMINI_API_URL, DEFAULT_GITHUB_API_URL, DEFAULT_MODEL};

#[derive(Parser, Debug)]
#[command(
    name = "repo-lens",
    version,
    about = "Get an AI health assessment of any public GitHub repository",
    long_about = "repo-lens fetches a public GitHub repository's metadata and language breakdown, \
                  asks Gemini for a structured assessment (summary, risks, recommendations, score) \
                  and renders the result as a terminal dashboard."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Gemini API key (falls back to the API_KEY variable)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Gemini model used for the assessment
    #[arg(long, env = "REPO_LENS_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// GitHub token, only needed to raise the API rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(
        long,
        env = "REPO_LENS_GITHUB_API_URL",
        default_value = DEFAULT_GITHUB_API_URL,
        global = true
    )]
    pub github_api_url: String,

    /// Base URL of the Gemini API
    #[arg(
        long,
        env = "REPO_LENS_GEMINI_API_URL",
        default_value = DEFAULT_GEMINI_API_URL,
        global = true
    )]
    pub gemini_api_url: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a GitHub repository
    ///
    /// Example: repo-lens analyze https://github.com/levy01/colisseum
    Analyze {
        /// GitHub repository URL (e.g., https://github.com/owner/repo)
        repo_url: String,

        /// Output the result as JSON instead of a dashboard
        #[arg(long)]
        json: bool,
    },

    /// Analyze the example repository (levy01/colisseum)
    Example {
        /// Output the result as JSON instead of a dashboard
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session: type a URL per line, `example`, or `quit`
    Interactive,
}
