/// Open Packaging Conventions (OPC) implementation.
///
/// Just enough of OPC to load a presentation package, reach its parts through
/// relationships, and write it back:
///
/// - Physical ZIP packaging that preserves member order and compression
/// - Content type discovery
/// - Relationship parsing and target resolution
pub mod constants;
pub mod content_types;
pub mod error;
pub mod package;
pub mod packuri;
pub mod phys_pkg;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use rel::{Relationship, Relationships};
