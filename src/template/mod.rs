//! Placeholder discovery and substitution.
//!
//! Scanning happens on a text container's flattened text; replacement
//! happens paragraph by paragraph. The two passes are kept separate so a
//! token that spans paragraphs is reported as a field but never rewritten.

pub mod document;
pub mod extractor;
pub mod mapping;
pub mod scanner;
pub mod substitution;

pub use document::{SlideDeck, TextContainer, TextParagraph};
pub use extractor::FieldExtractor;
pub use mapping::SubstitutionMapping;
pub use scanner::{PlaceholderMatch, PlaceholderRule, PlaceholderScanner};
pub use substitution::{SubstitutionEngine, SubstitutionStats};
