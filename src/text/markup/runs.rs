//! Run extraction
//!
//!     Walks the markup tokens once and yields every positioned text run, in
//!     document order. A run is an element of the form
//!
//!         <tag x="X" y="Y" ...>TEXT</tag>
//!
//!     The scanner is a small state machine over [`MarkupToken`]s:
//!
//!         Outside ──OpenTag──▶ InTag ──TagEnd──▶ InContent ──CloseTag──▶ Outside
//!
//!     Attributes are collected while in `InTag`. The content is never rebuilt
//!     from tokens: on the closing tag we slice the source between the end of the
//!     opening tag and the start of the closing one, so the text is exactly what the
//!     renderer wrote.
//!
//!     Anything that does not complete this shape (missing or unparsable
//!     coordinates, self-closing tags, nested elements, mismatched closing tags,
//!     empty text) is dropped without error.

use super::tokens::MarkupToken;
use super::RawElement;
use logos::{Lexer, Logos};
use std::ops::Range;

/// Where the scanner is relative to the current candidate element.
#[derive(Debug)]
enum ScanState {
    Outside,
    InTag {
        name: String,
        x: Option<f64>,
        y: Option<f64>,
    },
    InContent {
        name: String,
        x: f64,
        y: f64,
        start: usize,
    },
}

/// Iterator over the text runs of a markup string.
pub struct RunExtractor<'a> {
    source: &'a str,
    lexer: Lexer<'a, MarkupToken>,
    state: ScanState,
    run_tags: &'a [String],
}

impl<'a> RunExtractor<'a> {
    /// Scan `source`, accepting runs of any element name.
    pub fn new(source: &'a str) -> Self {
        RunExtractor {
            source,
            lexer: MarkupToken::lexer(source),
            state: ScanState::Outside,
            run_tags: &[],
        }
    }

    /// Only accept runs whose element name is in `run_tags`. An empty list
    /// accepts every element.
    pub fn with_run_tags(mut self, run_tags: &'a [String]) -> Self {
        self.run_tags = run_tags;
        self
    }

    fn accepts(&self, name: &str) -> bool {
        self.run_tags.is_empty() || self.run_tags.iter().any(|tag| tag == name)
    }

    /// Advance the state machine by one token, returning a finished run if this
    /// token closed one.
    fn step(&mut self, token: MarkupToken, span: Range<usize>) -> Option<RawElement> {
        let state = std::mem::replace(&mut self.state, ScanState::Outside);
        let (next, run) = match (state, token) {
            // A new tag always restarts the scan, even in the middle of another one.
            (_, MarkupToken::OpenTag(name)) => (
                ScanState::InTag {
                    name,
                    x: None,
                    y: None,
                },
                None,
            ),
            (ScanState::InTag { name, x, y }, MarkupToken::Attribute((key, value))) => {
                let (x, y) = match key.as_str() {
                    "x" => (parse_coordinate(&value), y),
                    "y" => (x, parse_coordinate(&value)),
                    _ => (x, y),
                };
                (ScanState::InTag { name, x, y }, None)
            }
            (ScanState::InTag { name, x, y }, MarkupToken::TagEnd) => match (x, y) {
                (Some(x), Some(y)) if self.accepts(&name) => (
                    ScanState::InContent {
                        name,
                        x,
                        y,
                        start: span.end,
                    },
                    None,
                ),
                _ => (ScanState::Outside, None),
            },
            (
                ScanState::InContent { name, x, y, start },
                MarkupToken::CloseTag(closing),
            ) => {
                let text = &self.source[start..span.start];
                let run = (closing == name && !text.is_empty()).then(|| RawElement {
                    text: text.to_string(),
                    x,
                    y,
                });
                (ScanState::Outside, run)
            }
            // Self-closing tags have no content.
            (ScanState::InTag { .. }, token) if token.ends_tag() => (ScanState::Outside, None),
            (ScanState::InTag { .. }, MarkupToken::CloseTag(_)) => (ScanState::Outside, None),
            // Boolean attributes and stray characters inside a tag, character data
            // inside content, and everything outside of a tag.
            (state, _) => (state, None),
        };
        self.state = next;
        run
    }
}

impl Iterator for RunExtractor<'_> {
    type Item = RawElement;

    fn next(&mut self) -> Option<RawElement> {
        loop {
            let token = self.lexer.next()?;
            let span = self.lexer.span();
            // Unlexable input is just more filler.
            let Ok(token) = token else {
                continue;
            };
            if let Some(run) = self.step(token, span) {
                return Some(run);
            }
        }
    }
}

/// Parse one coordinate attribute. Lists (`x="0 4 8"`) and non-finite values are
/// rejected.
fn parse_coordinate(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}
