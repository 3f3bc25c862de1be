// src/github/mod.rs
// =============================================================================
// The repository resolver: everything that talks about or to GitHub.
//
// - resolve: URL -> owner/repo
// - fetch:   owner/repo -> metadata, metadata -> language breakdown
// - types:   the decoded payloads and the derived language shares
// =============================================================================

mod fetch;
mod resolve;
mod types;

pub use fetch::GithubClient;
pub use resolve::resolve_identifier;
pub use types::{language_shares, LanguageShare, RepositoryMetadata};

#[cfg(test)]
pub use types::RepositoryOwner;
