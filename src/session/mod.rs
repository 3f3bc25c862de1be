// src/session/mod.rs
// UI session state and its transition function.

mod state;

pub use state::{reduce, AnalysisReport, Event, Phase, SessionState};

#[cfg(test)]
pub(crate) use state::tests::sample_report;
