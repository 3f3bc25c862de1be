// src/session/state.rs
// =============================================================================
// The session state machine.
//
//   Idle --submit--> Loading --ok--> Success
//                            \-err-> Failed
//   Success/Failed --submit--> Loading
//
// State is an immutable value. `reduce` takes the current state and an event
// and returns the next state; nothing is mutated in place. Metadata,
// assessment and language shares live together in one AnalysisReport, so a
// dashboard can never be half-populated.
//
// Every accepted submission bumps a generation counter and the caller gets a
// Ticket for it. A completion only lands if its ticket matches the current
// generation, so a slow response from an earlier submission is dropped.
// =============================================================================

use serde::Serialize;

use crate::assessment::Assessment;
use crate::github::{LanguageShare, RepositoryMetadata};

/// Shown when an error carries no message of its own
pub const FALLBACK_ERROR: &str = "An unexpected error occurred";

/// Everything a successful analysis produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub metadata: RepositoryMetadata,
    pub assessment: Assessment,
    /// Sorted largest first
    pub languages: Vec<LanguageShare>,
}

/// Proof that a submission was accepted; hand it back with the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failed,
}

#[derive(Debug, Clone)]
pub enum Event {
    /// The user edited the input
    InputChanged(String),
    /// Submit the current input
    Submit,
    /// Replace the input and submit it (the example shortcut)
    SubmitUrl(String),
    /// A pipeline run finished
    Completed {
        ticket: Ticket,
        outcome: Result<AnalysisReport, String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub input_url: String,
    pub is_loading: bool,
    pub report: Option<AnalysisReport>,
    pub last_error: Option<String>,
    generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.last_error.is_some() {
            Phase::Failed
        } else if self.report.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }

    /// Ticket for the in-flight submission, if any
    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.is_loading.then_some(Ticket(self.generation))
    }

    pub fn last_metadata(&self) -> Option<&RepositoryMetadata> {
        self.report.as_ref().map(|r| &r.metadata)
    }

    pub fn last_assessment(&self) -> Option<&Assessment> {
        self.report.as_ref().map(|r| &r.assessment)
    }

    /// Language breakdown of the last successful run, largest first
    pub fn languages(&self) -> &[LanguageShare] {
        self.report
            .as_ref()
            .map(|r| r.languages.as_slice())
            .unwrap_or_default()
    }

    /// Whether the submit action is currently enabled
    pub fn can_submit(&self) -> bool {
        !self.is_loading && !self.input_url.trim().is_empty()
    }
}

/// Computes the next state; the previous state is left untouched
pub fn reduce(state: &SessionState, event: Event) -> SessionState {
    match event {
        Event::InputChanged(input_url) => SessionState {
            input_url,
            ..state.clone()
        },
        Event::Submit => submit(state, state.input_url.clone()),
        Event::SubmitUrl(url) => {
            if state.is_loading {
                state.clone()
            } else {
                submit(state, url)
            }
        }
        Event::Completed { ticket, outcome } => {
            if state.pending_ticket() != Some(ticket) {
                // Stale or unexpected completion
                return state.clone();
            }
            match outcome {
                Ok(report) => SessionState {
                    is_loading: false,
                    report: Some(report),
                    last_error: None,
                    ..state.clone()
                },
                Err(message) => SessionState {
                    is_loading: false,
                    report: None,
                    last_error: Some(if message.trim().is_empty() {
                        FALLBACK_ERROR.to_string()
                    } else {
                        message
                    }),
                    ..state.clone()
                },
            }
        }
    }
}

fn submit(state: &SessionState, input_url: String) -> SessionState {
    if state.is_loading || input_url.trim().is_empty() {
        return SessionState {
            input_url,
            ..state.clone()
        };
    }

    SessionState {
        input_url,
        is_loading: true,
        report: None,
        last_error: None,
        generation: state.generation + 1,
    }
}
