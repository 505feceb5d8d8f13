//! Service operations: template details, deck generation and tree listing.
//!
//! Requests and responses are plain serde models; the CLI reads and writes
//! them as JSON.

pub mod handlers;
pub mod models;

pub use handlers::{DeckService, list_tree};
pub use models::{RequestModel, TemplateDetails, TemplateRequest, TemplateResponse};
