//! Top-level request orchestration.
//!
//! Composes quota evaluation, season/episode selection and download
//! orchestration into the "request media" use case, including the
//! retry-or-cancel error dialogs around every branch.

mod runner;
mod types;

pub use runner::RequestOrchestrator;
pub use types::{RequestError, RequestIntent, RequestOutcome, SessionState};
