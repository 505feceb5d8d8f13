//! Slide parts.
//!
//! A slide keeps its original XML. Parsing records the byte ranges of every
//! text run and line break inside `txBody` elements; serializing splices the
//! edited ranges back into the original bytes.

use crate::ooxml::error::Result;
use crate::ooxml::opc::PackURI;
use crate::ooxml::pptx::textframe::{LineBreak, Paragraph, Run, Segment, TextFrame, TextSlot};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use std::ops::Range;

/// A slide in a presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use deckfill::ooxml::pptx::Package;
///
/// let pres = Package::open("Templates/awards.pptx")?.presentation()?;
/// for slide in pres.slides() {
///     for frame in slide.text_frames() {
///         println!("{}: {:?}", slide.partname(), frame.text());
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Slide {
    partname: PackURI,

    /// Slide XML exactly as read from the package
    xml: Vec<u8>,

    text_frames: Vec<TextFrame>,
}

impl Slide {
    /// Parse a slide part.
    pub fn parse(partname: PackURI, xml: Vec<u8>) -> Result<Self> {
        let text_frames = parse_text_frames(&xml)?;
        Ok(Self {
            partname,
            xml,
            text_frames,
        })
    }

    /// Partname of the slide, e.g. `/ppt/slides/slide1.xml`.
    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// Text frames of the slide in document order.
    pub fn text_frames(&self) -> &[TextFrame] {
        &self.text_frames
    }

    pub fn text_frames_mut(&mut self) -> &mut [TextFrame] {
        &mut self.text_frames
    }

    /// Whether any run or line break of the slide has been edited.
    pub fn is_modified(&self) -> bool {
        self.text_frames.iter().any(TextFrame::is_modified)
    }

    /// Current slide XML, with edits applied.
    pub fn to_xml(&self) -> Vec<u8> {
        let mut edits: Vec<(Range<usize>, Vec<u8>)> = Vec::new();
        for paragraph in self.text_frames.iter().flat_map(TextFrame::paragraphs) {
            paragraph.collect_edits(&mut edits);
        }
        if edits.is_empty() {
            return self.xml.clone();
        }
        edits.sort_by_key(|(range, _)| range.start);

        let mut out = Vec::with_capacity(self.xml.len());
        let mut cursor = 0;
        for (range, bytes) in edits {
            out.extend_from_slice(&self.xml[cursor..range.start]);
            out.extend_from_slice(&bytes);
            cursor = range.end;
        }
        out.extend_from_slice(&self.xml[cursor..]);
        out
    }
}

/// Walk a slide's XML and collect its text frames.
///
/// Positions are taken from the reader before and after each event; text is
/// never trimmed so they line up with the source bytes.
fn parse_text_frames(xml: &[u8]) -> Result<Vec<TextFrame>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut frames = Vec::new();
    let mut frame: Option<TextFrame> = None;
    let mut paragraph: Option<Paragraph> = None;
    let mut text_start: Option<usize> = None;
    let mut break_start: Option<usize> = None;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event_into(&mut buf)?;
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"txBody" => frame = Some(TextFrame::default()),
                b"p" if frame.is_some() => paragraph = Some(Paragraph::default()),
                b"t" if paragraph.is_some() => text_start = Some(after),
                b"br" if paragraph.is_some() => break_start = Some(before),
                _ => {},
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"txBody" => frames.push(TextFrame::default()),
                b"p" => {
                    if let Some(frame) = frame.as_mut() {
                        frame.push(Paragraph::default());
                    }
                },
                b"t" => {
                    if let Some(paragraph) = paragraph.as_mut() {
                        let qname = std::str::from_utf8(e.name().as_ref())?.to_string();
                        let slot = TextSlot::Empty {
                            range: before..after,
                            qname,
                        };
                        paragraph.push(Segment::Run(Run::new(String::new(), slot)));
                    }
                },
                b"br" => {
                    if let Some(paragraph) = paragraph.as_mut() {
                        paragraph.push(Segment::Break(LineBreak::new(before..after)));
                    }
                },
                _ => {},
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => {
                    if let (Some(start), Some(paragraph)) = (text_start.take(), paragraph.as_mut()) {
                        let raw = std::str::from_utf8(&xml[start..before])?;
                        let text = unescape(raw)?.into_owned();
                        paragraph.push(Segment::Run(Run::new(text, TextSlot::Content(start..before))));
                    }
                },
                b"br" => {
                    if let (Some(start), Some(paragraph)) = (break_start.take(), paragraph.as_mut()) {
                        paragraph.push(Segment::Break(LineBreak::new(start..after)));
                    }
                },
                b"p" => {
                    if let (Some(done), Some(frame)) = (paragraph.take(), frame.as_mut()) {
                        frame.push(done);
                    }
                },
                b"txBody" => {
                    if let Some(done) = frame.take() {
                        frames.push(done);
                    }
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/></p:nvSpPr><p:txBody><a:bodyPr/><a:p><a:r><a:rPr lang="en-US" b="1"/><a:t>Team {team</a:t></a:r><a:r><a:rPr lang="en-US"/><a:t>Number}</a:t></a:r></a:p><a:p><a:r><a:t>Q&amp;A</a:t></a:r><a:br><a:rPr lang="en-US"/></a:br><a:r><a:t/></a:r><a:fld id="{B6F15528-21DE-4FAA-801E-634DDDAF4B2B}" type="slidenum"><a:t>&lt;#&gt;</a:t></a:fld></a:p></p:txBody></p:sp><p:graphicFrame><a:tbl><a:tr><a:tc><a:txBody><a:bodyPr/><a:p><a:r><a:t>{cell}</a:t></a:r></a:p></a:txBody></a:tc></a:tr></a:tbl></p:graphicFrame></p:spTree></p:cSld></p:sld>"#;

    fn slide() -> Slide {
        let partname = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        Slide::parse(partname, SLIDE.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_parse_text_frames() {
        let slide = slide();
        let frames = slide.text_frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].text(), "Team {teamNumber}\nQ&A\n<#>");
        assert_eq!(frames[1].text(), "{cell}");
        assert!(!slide.is_modified());
    }

    #[test]
    fn test_unmodified_slide_is_byte_identical() {
        assert_eq!(slide().to_xml(), SLIDE.as_bytes());
    }

    #[test]
    fn test_edit_touches_only_text_content() {
        let mut slide = slide();
        let replaced = slide.text_frames_mut()[0].paragraphs_mut()[0].replace_text("{teamNumber}", "7 & Co");
        assert_eq!(replaced, 1);
        assert!(slide.is_modified());

        let xml = String::from_utf8(slide.to_xml()).unwrap();
        let expected = SLIDE
            .replace("<a:t>Team {team</a:t>", "<a:t>Team 7 &amp; Co</a:t>")
            .replace("<a:t>Number}</a:t>", "<a:t></a:t>");
        assert_eq!(xml, expected);

        let reparsed = Slide::parse(slide.partname().clone(), xml.into_bytes()).unwrap();
        assert_eq!(reparsed.text_frames()[0].paragraphs()[0].text(), "Team 7 & Co");
    }

    #[test]
    fn test_edit_removes_break_and_fills_empty_text() {
        let mut slide = slide();
        let paragraph = &mut slide.text_frames_mut()[0].paragraphs_mut()[1];
        assert_eq!(paragraph.replace_text("A\n", "nswers"), 1);

        let xml = String::from_utf8(slide.to_xml()).unwrap();
        assert!(xml.contains("<a:t>Q&amp;nswers</a:t></a:r><a:r><a:t/></a:r>"));
        assert!(!xml.contains("<a:br>"));
    }

    #[test]
    fn test_malformed_slide() {
        let partname = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        let result = Slide::parse(partname, b"<p:sld><p:txBody></p:sld>".to_vec());
        assert!(result.is_err());
    }
}
