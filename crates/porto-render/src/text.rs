#![forbid(unsafe_code)]

//! Styled text: spans, lines, and word wrapping.

use crate::style::Style;
use memchr::memchr_iter;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A run of text under one style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub content: String,
    pub style: Style,
}

impl Span {
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: Style::new(),
        }
    }

    #[must_use]
    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    /// Display width in columns.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.content.width() as u16
    }
}

/// One visual row of spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::raw(content)],
        }
    }

    #[must_use]
    pub fn from_spans(spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
        }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.spans.iter().map(Span::width).sum()
    }

    pub fn push_span(&mut self, span: Span) {
        self.spans.push(span);
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Line::raw(s)
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Line::raw(s)
    }
}

impl From<Span> for Line {
    fn from(span: Span) -> Self {
        Line { spans: vec![span] }
    }
}

/// Greedy word wrap to `width` columns.
///
/// Paragraph breaks (`\n`) are preserved as separate output lines; an
/// empty paragraph stays an empty line. A single word wider than the
/// limit hard-breaks at grapheme boundaries.
#[must_use]
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0usize;
    let mut boundaries: Vec<usize> = memchr_iter(b'\n', bytes).collect();
    boundaries.push(bytes.len());
    for end in boundaries {
        let paragraph = text[start..end].trim_end_matches('\r');
        wrap_paragraph(paragraph, width, &mut out);
        start = end + 1;
    }
    out
}

fn wrap_paragraph(paragraph: &str, width: u16, out: &mut Vec<String>) {
    if paragraph.is_empty() {
        out.push(String::new());
        return;
    }
    let limit = width as usize;
    let emitted_before = out.len();
    let mut line = String::new();
    let mut line_width = 0usize;
    for word in paragraph.split_whitespace() {
        let word_width = word.width();
        let needed = if line.is_empty() {
            word_width
        } else {
            line_width + 1 + word_width
        };
        if needed <= limit {
            if !line.is_empty() {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
            continue;
        }
        if !line.is_empty() {
            out.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if word_width <= limit {
            line.push_str(word);
            line_width = word_width;
        } else {
            hard_break(word, limit, out, &mut line, &mut line_width);
        }
    }
    if !line.is_empty() || out.len() == emitted_before {
        out.push(line);
    }
}

fn hard_break(
    word: &str,
    limit: usize,
    out: &mut Vec<String>,
    line: &mut String,
    line_width: &mut usize,
) {
    for cluster in word.graphemes(true) {
        let w = cluster.width();
        if *line_width + w > limit && !line.is_empty() {
            out.push(std::mem::take(line));
            *line_width = 0;
        }
        line.push_str(cluster);
        *line_width += w;
    }
}
