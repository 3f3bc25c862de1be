// src/assessment/mod.rs
// =============================================================================
// The assessment requester: repository metadata in, structured verdict out.
//
// - prompt: the natural-language prompt embedding the metadata
// - gemini: the HTTP call, with the response schema we require
// - types:  the decoded Assessment
// =============================================================================

mod gemini;
mod prompt;
mod types;

pub use gemini::GeminiClient;
pub use types::Assessment;
