// src/github/types.rs
// =============================================================================
// Data shapes returned by the GitHub REST API, plus the language statistics
// we derive from them.
//
// Field names on RepositoryMetadata follow GitHub's JSON one-to-one, so serde
// can decode the response body without any renaming. Anything that does not
// fit (a missing field, a string where a number should be) is rejected.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Owner and repository name, extracted from a GitHub URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentifier {
    pub owner: String,
    pub name: String,
}

impl std::fmt::Display for RepositoryIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Repository metadata from GET /repos/{owner}/{repo}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    /// Primary language as detected by GitHub (None for empty repos)
    pub language: Option<String>,
    /// Where to fetch the language breakdown from
    pub languages_url: Url,
    pub html_url: Url,
    pub owner: RepositoryOwner,
    /// GitHub omits this on some older API versions
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
    pub avatar_url: Url,
}

/// Language name -> bytes of code, as returned by the languages endpoint
pub type LanguageDistribution = HashMap<String, u64>;

/// One row of the language breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// Share of the total, 0.0..=100.0
    pub percent: f64,
}

impl LanguageShare {
    /// Percentage with one decimal place, e.g. "80.0%"
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

/// Sorts a distribution by size (largest first) and computes each share
///
/// Ties are ordered by name so the output is stable. An empty distribution,
/// or one whose byte counts sum to zero, has no shares.
pub fn language_shares(distribution: &LanguageDistribution) -> Vec<LanguageShare> {
    let total: u64 = distribution.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(&String, &u64)> = distribution.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    entries
        .into_iter()
        .map(|(name, &bytes)| LanguageShare {
            name: name.clone(),
            bytes,
            percent: bytes as f64 / total as f64 * 100.0,
        })
        .collect()
}
