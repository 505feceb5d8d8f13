/// Text frames, paragraphs and runs of a slide.
///
/// Each segment remembers where its content sits in the slide XML, so edits
/// can be spliced back into the original bytes without touching anything
/// else.
use quick_xml::escape::partial_escape;
use std::ops::Range;

/// Separator placed between paragraphs in a text frame's flattened text.
pub const PARAGRAPH_SEPARATOR: char = '\n';

/// Character a soft line break (`<a:br>`) renders as. Breaks end a line just
/// like paragraphs do, so placeholders never span either.
pub const LINE_BREAK: char = '\n';

/// Where a run's text lives in the slide XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TextSlot {
    /// Bytes between `<a:t>` and `</a:t>`
    Content(Range<usize>),

    /// A self-closing `<a:t/>`; `qname` is its qualified name, e.g. `a:t`
    Empty { range: Range<usize>, qname: String },
}

/// A text run (`a:r` or `a:fld`) with its decoded text.
#[derive(Debug, Clone)]
pub struct Run {
    text: String,
    slot: TextSlot,
    edited: bool,
}

impl Run {
    pub(crate) fn new(text: String, slot: TextSlot) -> Self {
        Self {
            text,
            slot,
            edited: false,
        }
    }

    /// Text of this run.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A soft line break (`a:br`).
#[derive(Debug, Clone)]
pub struct LineBreak {
    /// The whole element, `<a:br>...</a:br>` or `<a:br/>`
    range: Range<usize>,
    removed: bool,
}

impl LineBreak {
    pub(crate) fn new(range: Range<usize>) -> Self {
        Self {
            range,
            removed: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Segment {
    Run(Run),
    Break(LineBreak),
}

impl Segment {
    /// Length in bytes of this segment's contribution to the paragraph text.
    fn len(&self) -> usize {
        match self {
            Segment::Run(run) => run.text.len(),
            Segment::Break(br) if br.removed => 0,
            Segment::Break(_) => LINE_BREAK.len_utf8(),
        }
    }
}

/// A paragraph (`a:p`) of a text frame.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    segments: Vec<Segment>,
}

impl Paragraph {
    pub(crate) fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Segments of this paragraph in document order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Paragraph text: run texts concatenated, line breaks as `\n`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Run(run) => text.push_str(&run.text),
                Segment::Break(br) if !br.removed => text.push(LINE_BREAK),
                Segment::Break(_) => {},
            }
        }
        text
    }

    /// Replace every occurrence of `find` in the paragraph text.
    ///
    /// Occurrences may span several runs. The replacement lands in the first
    /// run an occurrence touches; the rest of the occurrence is cut from the
    /// following runs and line breaks inside it are dropped. Returns the
    /// number of occurrences replaced.
    pub fn replace_text(&mut self, find: &str, replacement: &str) -> usize {
        if find.is_empty() {
            return 0;
        }

        let text = self.text();
        let starts: Vec<usize> = text.match_indices(find).map(|(i, _)| i).collect();

        // Back to front, so earlier offsets stay valid
        starts
            .into_iter()
            .rev()
            .filter(|&start| self.splice(start..start + find.len(), replacement))
            .count()
    }

    /// Replace the byte range `target` of the paragraph text.
    fn splice(&mut self, target: Range<usize>, replacement: &str) -> bool {
        let mut spans = Vec::with_capacity(self.segments.len());
        let mut offset = 0;
        for segment in &self.segments {
            let len = segment.len();
            spans.push(offset..offset + len);
            offset += len;
        }

        let overlaps = |span: &Range<usize>| span.start < target.end && span.end > target.start;
        let Some(first_run) = self
            .segments
            .iter()
            .zip(&spans)
            .position(|(segment, span)| matches!(segment, Segment::Run(_)) && overlaps(span))
        else {
            return false;
        };

        for (i, (segment, span)) in self.segments.iter_mut().zip(&spans).enumerate() {
            if !overlaps(span) {
                continue;
            }
            match segment {
                Segment::Run(run) => {
                    let cut_start = target.start.max(span.start) - span.start;
                    let cut_end = target.end.min(span.end) - span.start;
                    let inserted = if i == first_run { replacement } else { "" };
                    run.text.replace_range(cut_start..cut_end, inserted);
                    run.edited = true;
                },
                Segment::Break(br) => br.removed = true,
            }
        }
        true
    }

    /// Collect the XML splices this paragraph's edits require.
    pub(crate) fn collect_edits(&self, edits: &mut Vec<(Range<usize>, Vec<u8>)>) {
        for segment in &self.segments {
            match segment {
                Segment::Run(run) if run.edited => match &run.slot {
                    TextSlot::Content(range) => {
                        edits.push((range.clone(), partial_escape(&run.text).as_bytes().to_vec()));
                    },
                    TextSlot::Empty { range, qname } if !run.text.is_empty() => {
                        let element = format!("<{qname}>{}</{qname}>", partial_escape(&run.text));
                        edits.push((range.clone(), element.into_bytes()));
                    },
                    TextSlot::Empty { .. } => {},
                },
                Segment::Break(br) if br.removed => edits.push((br.range.clone(), Vec::new())),
                _ => {},
            }
        }
    }

    pub(crate) fn is_modified(&self) -> bool {
        self.segments.iter().any(|segment| match segment {
            Segment::Run(run) => run.edited,
            Segment::Break(br) => br.removed,
        })
    }
}

/// A text frame (`txBody`): the text of one shape or table cell.
#[derive(Debug, Clone, Default)]
pub struct TextFrame {
    paragraphs: Vec<Paragraph>,
}

impl TextFrame {
    pub(crate) fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Flattened text: paragraph texts joined with `\n`, one line each.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, paragraph) in self.paragraphs.iter().enumerate() {
            if i > 0 {
                text.push(PARAGRAPH_SEPARATOR);
            }
            text.push_str(&paragraph.text());
        }
        text
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        &mut self.paragraphs
    }

    pub(crate) fn is_modified(&self) -> bool {
        self.paragraphs.iter().any(Paragraph::is_modified)
    }
}
