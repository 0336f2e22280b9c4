//! Pipeline entry point consumed by the front-end.
//!
//! The front-end owns credentials and chat history; it hands the question
//! and both credentials into [`Assistant::process`] and gets display text
//! back. The pipeline never raises for ordinary failure modes.

pub mod logging;
pub mod pipeline;

pub use logging::init_logging;
pub use pipeline::Assistant;
