//! Query interpretation - LLM-backed translation of natural language
//! into a structured [`hublens_core::QueryIntent`].
//!
//! The LLM is strictly a translator. It never touches the CRM and never
//! decides what gets fetched beyond proposing an intent; validation,
//! defaulting, and the fallback path are deterministic and live here and
//! in `hublens-core`.

pub mod interpreter;
pub mod llm;

pub use interpreter::Interpreter;
pub use llm::{LlmClient, OpenAiClient};
