//! The document view the placeholder engine works against.
//!
//! A deck is a sequence of slides; each slide holds text containers; each
//! container exposes its flattened text and its paragraphs, and a paragraph
//! can replace a literal substring of its own text. The PresentationML types
//! implement these traits below.

use crate::ooxml::pptx::{Paragraph, Presentation, TextFrame};

/// A paragraph whose text can be searched and rewritten.
pub trait TextParagraph {
    fn text(&self) -> String;

    /// Replace every occurrence of `find`; returns how many were replaced.
    fn replace_text(&mut self, find: &str, replacement: &str) -> usize;
}

/// A region of slide content holding paragraphs, such as a text box.
pub trait TextContainer {
    type Paragraph: TextParagraph;

    /// The container's text exactly as placeholders are scanned in.
    fn text(&self) -> String;

    fn paragraphs_mut(&mut self) -> &mut [Self::Paragraph];
}

/// An ordered collection of slides.
pub trait SlideDeck {
    type Container: TextContainer;

    fn slide_count(&self) -> usize;

    /// Text containers of slide `slide`; empty when out of range.
    fn containers(&self, slide: usize) -> &[Self::Container];

    fn containers_mut(&mut self, slide: usize) -> &mut [Self::Container];
}

impl TextParagraph for Paragraph {
    fn text(&self) -> String {
        Paragraph::text(self)
    }

    fn replace_text(&mut self, find: &str, replacement: &str) -> usize {
        Paragraph::replace_text(self, find, replacement)
    }
}

impl TextContainer for TextFrame {
    type Paragraph = Paragraph;

    fn text(&self) -> String {
        TextFrame::text(self)
    }

    fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        TextFrame::paragraphs_mut(self)
    }
}

impl SlideDeck for Presentation {
    type Container = TextFrame;

    fn slide_count(&self) -> usize {
        Presentation::slide_count(self)
    }

    fn containers(&self, slide: usize) -> &[TextFrame] {
        self.slides().get(slide).map(|s| s.text_frames()).unwrap_or_default()
    }

    fn containers_mut(&mut self, slide: usize) -> &mut [TextFrame] {
        match self.slides_mut().get_mut(slide) {
            Some(s) => s.text_frames_mut(),
            None => &mut [],
        }
    }
}
