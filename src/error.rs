/// Error types for deck operations.
use crate::ooxml::OoxmlError;
use thiserror::Error;

/// Result type for deck operations.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Error types for deck operations.
///
/// An unresolved field or a token that no paragraph contains is not an error;
/// substitution treats both as part of success.
#[derive(Error, Debug)]
pub enum DeckError {
    /// The requested template file does not exist in the store
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// The requested file name could escape the template directory
    #[error("Invalid template name: {0}")]
    InvalidTemplateName(String),

    /// The template could not be opened, traversed or saved
    #[error("Document error: {0}")]
    Document(#[from] OoxmlError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed request or unwritable response
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
