// src/pipeline.rs
// =============================================================================
// Wires the resolver and the requester together.
//
// Analyzer::analyze runs the whole pipeline for one URL:
// 1. Resolve owner/repo from the URL
// 2. Fetch repository metadata (fails the run on any error)
// 3. Fetch the language breakdown (never fails, may be empty)
// 4. Ask the model for an assessment (fails the run on any error)
//
// Session wraps an Analyzer around the state machine from session/, so the
// CLI only has to feed it events and render whatever state comes back.
// =============================================================================

use tracing::{debug, info, warn};

use crate::assessment::GeminiClient;
use crate::config::Config;
use crate::error::AnalyzerResult;
use crate::github::{language_shares, resolve_identifier, GithubClient};
use crate::session::{reduce, AnalysisReport, Event, SessionState};

/// Runs the fetch-then-assess pipeline
pub struct Analyzer {
    github: GithubClient,
    gemini: GeminiClient,
}

impl Analyzer {
    pub fn new(config: &Config) -> AnalyzerResult<Self> {
        Ok(Self {
            github: GithubClient::new(config)?,
            gemini: GeminiClient::new(config)?,
        })
    }

    /// Analyzes one repository; the first failing stage aborts the run
    pub async fn analyze(&self, url: &str) -> AnalyzerResult<AnalysisReport> {
        let identifier = resolve_identifier(url)?;
        info!(repo = %identifier, "analyzing repository");

        let metadata = self.github.fetch_metadata(&identifier).await?;
        let distribution = self.github.fetch_languages(&metadata.languages_url).await;
        let languages = language_shares(&distribution);
        debug!(count = languages.len(), "language breakdown ready");

        let names: Vec<String> = languages.iter().map(|l| l.name.clone()).collect();
        let assessment = self.gemini.request_assessment(&metadata, &names).await?;

        Ok(AnalysisReport {
            metadata,
            assessment,
            languages,
        })
    }
}

/// A single-user session: current state plus the analyzer that feeds it
pub struct Session {
    analyzer: Analyzer,
    state: SessionState,
}

impl Session {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            state: SessionState::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Applies a non-submitting event (e.g. editing the input)
    pub fn dispatch(&mut self, event: Event) -> &SessionState {
        self.state = reduce(&self.state, event);
        &self.state
    }

    /// Submits the current input and runs the pipeline to completion
    ///
    /// Returns the terminal state. A rejected submission (blank input, or
    /// one already in flight) returns the state unchanged.
    pub async fn submit(&mut self) -> &SessionState {
        self.run(Event::Submit).await
    }

    /// Replaces the input with `url`, then submits it
    pub async fn submit_url(&mut self, url: &str) -> &SessionState {
        self.run(Event::SubmitUrl(url.to_string())).await
    }

    async fn run(&mut self, submission: Event) -> &SessionState {
        self.state = reduce(&self.state, submission);

        let Some(ticket) = self.state.pending_ticket() else {
            debug!("submission ignored");
            return &self.state;
        };

        let url = self.state.input_url.clone();
        let outcome = self.analyzer.analyze(&url).await.map_err(|e| {
            warn!(error = %e, "analysis failed");
            e.to_string()
        });

        self.state = reduce(&self.state, Event::Completed { ticket, outcome });
        &self.state
    }
}
