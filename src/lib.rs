//! Deckfill - fill PowerPoint templates from named placeholders
//!
//! Slide text in a template carries brace-delimited placeholders such as
//! `{teamName}`. This library lists the fields every template declares and
//! produces new decks with those placeholders replaced, leaving all other
//! content and formatting byte-for-byte intact.
//!
//! # Features
//!
//! - **Field listing**: scan every text box of every slide for placeholders
//! - **Deck generation**: substitute values paragraph by paragraph, across run boundaries
//! - **Lossless saving**: untouched package members and XML are written back unchanged
//! - **Tree listing**: enumerate the files below a directory with sizes and times
//!
//! # Example - Listing fields
//!
//! ```no_run
//! use deckfill::ooxml::pptx::Package;
//! use deckfill::template::FieldExtractor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pres = Package::open("Templates/awards.pptx")?.presentation()?;
//! for field in FieldExtractor::default().extract(&pres) {
//!     println!("{}", field);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Generating a deck
//!
//! ```no_run
//! use deckfill::ooxml::pptx::Package;
//! use deckfill::template::{SubstitutionEngine, SubstitutionMapping};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pres = Package::open("Templates/awards.pptx")?.presentation()?;
//! let mapping: SubstitutionMapping = [("teamName", "Falcons")].into_iter().collect();
//!
//! let stats = SubstitutionEngine::default().apply(&mut pres, &mapping);
//! println!("{} replacements", stats.replacements);
//! std::fs::write("awards-filled.pptx", pres.to_bytes()?)?;
//! # Ok(())
//! # }
//! ```

/// Request/response models and the service operations built on them
pub mod api;

pub mod config;
pub mod error;

/// OOXML (Office Open XML) package and PresentationML support
///
/// This module provides the document model the placeholder engine runs
/// against: packages, slides, text frames and paragraphs.
pub mod ooxml;

pub mod store;

/// Placeholder scanning, field extraction and substitution
pub mod template;

pub mod tree;

// Re-export commonly used types for convenience
pub use api::DeckService;
pub use config::Config;
pub use error::{DeckError, Result};
pub use template::{FieldExtractor, PlaceholderRule, SubstitutionEngine, SubstitutionMapping};
