//! Office Open XML (OOXML) support for PowerPoint decks.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP, parts, relationships)
//! 2. **PresentationML** (`pptx`): slides, text frames and paragraph editing
//!
//! # Example
//!
//! ```rust,no_run
//! use deckfill::ooxml::pptx::Package;
//!
//! let mut pres = Package::open("Templates/awards.pptx")?.presentation()?;
//! for slide in pres.slides_mut() {
//!     for frame in slide.text_frames_mut() {
//!         for paragraph in frame.paragraphs_mut() {
//!             paragraph.replace_text("{team}", "Falcons");
//!         }
//!     }
//! }
//! let bytes = pres.to_bytes()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

pub use error::{OoxmlError, Result};
