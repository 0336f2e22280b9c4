//! CRM read path: deterministic request construction and the single-page
//! fetch against the remote objects API.

pub mod client;
pub mod request;

pub use client::{CrmClient, FetchError};
pub use request::{build_request, ApiRequest};
