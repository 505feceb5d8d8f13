//! PowerPoint (.pptx) presentation support.
//!
//! Reads a presentation into slides, text frames, paragraphs and runs, lets
//! paragraph text be replaced in place, and writes the package back with
//! every untouched byte preserved.
//!
//! - `Package`: the .pptx file package
//! - `Presentation`: slides in presentation order
//! - `Slide`: one slide part and its text frames
//! - `TextFrame` / `Paragraph`: the editable text of a shape or table cell
//!
//! # Example
//!
//! ```rust,no_run
//! use deckfill::ooxml::pptx::Package;
//!
//! let pres = Package::open("Templates/awards.pptx")?.presentation()?;
//! for slide in pres.slides() {
//!     for frame in slide.text_frames() {
//!         println!("{}", frame.text());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod package;
pub mod presentation;
pub mod slide;
pub mod textframe;

pub use package::Package;
pub use presentation::Presentation;
pub use slide::Slide;
pub use textframe::{Paragraph, Segment, TextFrame};
