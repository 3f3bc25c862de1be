// src/render.rs
// =============================================================================
// Turns a SessionState into something to print.
//
// render_dashboard is a pure function: same state in, same text out. It has
// no idea how the state was produced, it only decides what to show:
// - the input line and the submit button (disabled while loading or blank)
// - an error banner, if the last run failed
// - an empty-state hint, if nothing has happened yet
// - the full dashboard, if the last run succeeded
//
// render_json is the machine-readable equivalent for --json.
// =============================================================================

use serde::Serialize;
use std::fmt::{self, Write};

use crate::assessment::Assessment;
use crate::github::{LanguageShare, RepositoryMetadata};
use crate::session::{AnalysisReport, SessionState};

const WIDTH: usize = 72;
const BAR_WIDTH: usize = 30;
const TOP_LANGUAGES: usize = 5;
const INPUT_PLACEHOLDER: &str = "https://github.com/owner/repo";

/// Renders the whole screen for the given state
pub fn render_dashboard(state: &SessionState) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_dashboard(&mut out, state);
    out
}

fn write_dashboard(out: &mut String, state: &SessionState) -> fmt::Result {
    let input = if state.input_url.is_empty() {
        INPUT_PLACEHOLDER
    } else {
        state.input_url.as_str()
    };
    let button = if state.can_submit() {
        "[ Analyze Repo ]"
    } else if state.is_loading {
        "[ Analyzing... ]"
    } else {
        "[ Analyze Repo ] (enter a URL)"
    };
    writeln!(out, "🔗 {}  {}", input, button)?;

    if let Some(error) = &state.last_error {
        writeln!(out)?;
        writeln!(out, "❌ {}", error)?;
    }

    match (state.last_metadata(), state.last_assessment()) {
        (Some(metadata), Some(assessment)) => {
            write_header(out, metadata)?;
            write_assessment(out, assessment)?;
            write_languages(out, state.languages())?;
            section(out, "🧠 Expert Insights")?;
            bullets(out, "•", &assessment.tech_stack_insights)
        }
        _ if !state.is_loading && state.last_error.is_none() => {
            writeln!(out)?;
            writeln!(
                out,
                "📂 Paste a repository link above to generate a comprehensive AI audit."
            )
        }
        _ => Ok(()),
    }
}

fn write_header(out: &mut String, metadata: &RepositoryMetadata) -> fmt::Result {
    let rule = "=".repeat(WIDTH);
    let description = metadata
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No description available for this repository.");

    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "REPOSITORY · {}", metadata.owner.login)?;
    writeln!(out, "{}", metadata.name)?;
    writeln!(out, "{}", metadata.html_url)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", description)?;
    writeln!(out)?;
    writeln!(
        out,
        "⭐ Stars: {:<10} 🍴 Forks: {:<10} 💻 Language: {:<12} 🏷️  Topics: {}",
        group_thousands(metadata.stargazers_count),
        group_thousands(metadata.forks_count),
        metadata.language.as_deref().unwrap_or("Mixed"),
        metadata.topics.len()
    )
}

fn write_assessment(out: &mut String, assessment: &Assessment) -> fmt::Result {
    section(out, "🤖 Project Intelligence Summary")?;
    writeln!(out, "{}", assessment.summary)?;

    section(out, "🛡️  Security & Risks")?;
    bullets(out, "!", &assessment.potential_issues)?;

    section(out, "🚀 Key Recommendations")?;
    bullets(out, "→", &assessment.recommendations)?;

    section(out, "📊 Maintainability Score")?;
    writeln!(
        out,
        "   {} / 100  ({})",
        assessment.score_label(),
        assessment.score_band().label()
    )?;
    writeln!(out, "   [{}]", bar(assessment.score / 100.0, BAR_WIDTH))
}

fn write_languages(out: &mut String, languages: &[LanguageShare]) -> fmt::Result {
    section(out, "🧩 Technology Profile")?;
    if languages.is_empty() {
        return writeln!(out, "   (no language data)");
    }

    for share in languages.iter().take(TOP_LANGUAGES) {
        writeln!(
            out,
            "   {:<16} {:>6}  {}",
            share.name,
            share.percent_label(),
            bar(share.percent / 100.0, BAR_WIDTH)
        )?;
    }
    Ok(())
}

fn section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(WIDTH))
}

fn bullets(out: &mut String, marker: &str, items: &[String]) -> fmt::Result {
    for item in items {
        writeln!(out, "   {} {}", marker, item)?;
    }
    Ok(())
}

// Horizontal bar, `fraction` of `width` filled; out-of-range values are
// drawn as empty or full but the number printed next to it is untouched
fn bar(fraction: f64, width: usize) -> String {
    let filled = if fraction.is_finite() {
        (fraction.clamp(0.0, 1.0) * width as f64).round() as usize
    } else {
        0
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// 1234567 -> "1,234,567"
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonView<'a> {
    Idle,
    Loading { input_url: &'a str },
    Success(&'a AnalysisReport),
    Failed { input_url: &'a str, error: &'a str },
}

/// Renders the state as pretty-printed JSON
pub fn render_json(state: &SessionState) -> serde_json::Result<String> {
    let view = match (&state.report, &state.last_error) {
        _ if state.is_loading => JsonView::Loading {
            input_url: &state.input_url,
        },
        (_, Some(error)) => JsonView::Failed {
            input_url: &state.input_url,
            error,
        },
        (Some(report), None) => JsonView::Success(report),
        (None, None) => JsonView::Idle,
    };
    serde_json::to_string_pretty(&view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{reduce, sample_report, Event};

    fn succeeded() -> SessionState {
        let state = reduce(
            &SessionState::new(),
            Event::SubmitUrl("https://github.com/levy01/colisseum.git".to_string()),
        );
        let ticket = state.pending_ticket().unwrap();
        reduce(
            &state,
            Event::Completed {
                ticket,
                outcome: Ok(sample_report()),
            },
        )
    }

    fn failed(message: &str) -> SessionState {
        let state = reduce(
            &SessionState::new(),
            Event::SubmitUrl("https://github.com/levy01/colisseum".to_string()),
        );
        let ticket = state.pending_ticket().unwrap();
        reduce(
            &state,
            Event::Completed {
                ticket,
                outcome: Err(message.to_string()),
            },
        )
    }

    #[test]
    fn test_idle_shows_placeholder_and_empty_state() {
        let text = render_dashboard(&SessionState::new());
        assert!(text.contains(INPUT_PLACEHOLDER));
        assert!(text.contains("[ Analyze Repo ]"));
        assert!(text.contains("Paste a repository link"));
    }

    #[test]
    fn test_button_follows_input() {
        let blank = render_dashboard(&SessionState::new());
        assert!(blank.contains("[ Analyze Repo ] (enter a URL)"));

        let typed = reduce(
            &SessionState::new(),
            Event::InputChanged("https://github.com/a/b".to_string()),
        );
        let text = render_dashboard(&typed);
        assert!(text.contains("https://github.com/a/b  [ Analyze Repo ]\n"));
    }

    #[test]
    fn test_loading_disables_button() {
        let state = reduce(
            &SessionState::new(),
            Event::SubmitUrl("https://github.com/a/b".to_string()),
        );
        let text = render_dashboard(&state);
        assert!(text.contains("[ Analyzing... ]"));
        assert!(!text.contains("Paste a repository link"));
    }

    #[test]
    fn test_error_banner_without_dashboard() {
        let text = render_dashboard(&failed("Repository not found."));
        assert!(text.contains("❌ Repository not found."));
        assert!(!text.contains("Maintainability Score"));
        assert!(!text.contains("Paste a repository link"));
    }

    #[test]
    fn test_dashboard_contents() {
        let text = render_dashboard(&succeeded());
        assert!(text.contains("REPOSITORY · levy01"));
        assert!(text.contains("colisseum"));
        assert!(text.contains("An arena game"));
        assert!(text.contains("Stars: 42"));
        assert!(text.contains("   67 / 100  (fair)"));
        assert!(text.contains("JavaScript        80.0%"));
        assert!(text.contains("CSS               20.0%"));
        assert!(text.contains("! No tests"));
        assert!(text.contains("→ Add CI"));
        assert!(text.contains("• Plain JavaScript"));
    }

    #[test]
    fn test_only_top_five_languages() {
        let mut state = succeeded();
        if let Some(report) = state.report.as_mut() {
            report.languages = (0..7)
                .map(|i| LanguageShare {
                    name: format!("Lang{}", i),
                    bytes: 10,
                    percent: 100.0 / 7.0,
                })
                .collect();
        }
        let text = render_dashboard(&state);
        assert!(text.contains("Lang4"));
        assert!(!text.contains("Lang5"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_bar_handles_out_of_range() {
        assert_eq!(bar(0.5, 4), "██░░");
        assert_eq!(bar(2.5, 4), "████");
        assert_eq!(bar(-1.0, 4), "░░░░");
        assert_eq!(bar(f64::NAN, 4), "░░░░");
    }

    #[test]
    fn test_json_views() {
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&succeeded()).unwrap()).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["assessment"]["score"], 67.0);
        assert_eq!(json["languages"][0]["name"], "JavaScript");

        let json: serde_json::Value =
            serde_json::from_str(&render_json(&failed("boom")).unwrap()).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "boom");

        let json: serde_json::Value =
            serde_json::from_str(&render_json(&SessionState::new()).unwrap()).unwrap();
        assert_eq!(json["status"], "idle");
    }
}
