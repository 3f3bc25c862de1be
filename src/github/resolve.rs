// src/github/resolve.rs
// =============================================================================
// Turns whatever the user pasted into an owner/repo pair.
//
// Accepted shapes (anything containing github.com/<owner>/<repo>):
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - https://github.com/owner/repo/
//   - github.com/owner/repo/tree/main   (extra segments are ignored)
// =============================================================================

use crate::error::{AnalyzerError, AnalyzerResult};

use super::types::RepositoryIdentifier;

const HOST_MARKER: &str = "github.com/";

/// Parses a GitHub URL into its owner and repository name
///
/// Example:
///   "https://github.com/levy01/colisseum.git" -> levy01 / colisseum
pub fn resolve_identifier(url: &str) -> AnalyzerResult<RepositoryIdentifier> {
    // Drop any query string or fragment, then the trailing decorations
    let url = url.trim();
    let url = url.split(&['?', '#'][..]).next().unwrap_or(url);
    let url = strip_suffixes(url);

    let start = url.find(HOST_MARKER).ok_or(AnalyzerError::InvalidUrl)?;
    let path = &url[start + HOST_MARKER.len()..];

    let mut segments = path.split('/');
    let owner = segments.next().unwrap_or_default();
    let name = segments.next().unwrap_or_default();

    if owner.is_empty() || name.is_empty() {
        return Err(AnalyzerError::InvalidUrl);
    }

    Ok(RepositoryIdentifier {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

// Strips trailing "/" and ".git" in any combination ("repo.git/", "repo/")
fn strip_suffixes(mut url: &str) -> &str {
    loop {
        let trimmed = url.trim_end_matches('/');
        let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
        if trimmed.len() == url.len() {
            return url;
        }
        url = trimmed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(url: &str) -> (String, String) {
        let id = resolve_identifier(url).unwrap();
        (id.owner, id.name)
    }

    #[test]
    fn test_resolve_plain_url() {
        assert_eq!(
            resolve("https://github.com/rust-lang/rust"),
            ("rust-lang".to_string(), "rust".to_string())
        );
    }

    #[test]
    fn test_resolve_with_git_suffix() {
        assert_eq!(
            resolve("https://github.com/levy01/colisseum.git"),
            ("levy01".to_string(), "colisseum".to_string())
        );
    }

    #[test]
    fn test_resolve_with_trailing_slash() {
        assert_eq!(
            resolve("https://github.com/levy01/colisseum/"),
            ("levy01".to_string(), "colisseum".to_string())
        );
        assert_eq!(
            resolve("https://github.com/levy01/colisseum.git/"),
            ("levy01".to_string(), "colisseum".to_string())
        );
    }

    #[test]
    fn test_resolve_ignores_extra_segments_and_query() {
        assert_eq!(
            resolve("  github.com/owner/repo/tree/main?tab=readme#top "),
            ("owner".to_string(), "repo".to_string())
        );
    }

    #[test]
    fn test_resolve_invalid() {
        for input in [
            "not a url",
            "",
            "https://gitlab.com/user/repo",
            "https://github.com/",
            "https://github.com/onlyowner",
            "https://github.com/onlyowner/",
            "https://github.com//repo",
        ] {
            assert!(
                matches!(resolve_identifier(input), Err(AnalyzerError::InvalidUrl)),
                "expected InvalidUrl for {:?}",
                input
            );
        }
    }
}
