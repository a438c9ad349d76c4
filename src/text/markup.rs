//! Render-output parsing
//!
//!     The renderer reports a block as vector markup in which every visual line is a
//!     row of positioned text runs sharing one `y`. Parsing happens in two steps:
//!
//!         1. Run extraction. See [runs](runs). A logos tokenizer feeds a small state
//!            machine that yields `(x, y, text)` for every run element, in document
//!            order. Unrecognized or malformed markup is skipped.
//!
//!         2. Line grouping. See [line_grouping](line_grouping). Consecutive runs with
//!            the same `y` form one [`Line`]; a change of `y` starts the next one.
//!
//!     A block always occupies at least one line, so markup without any runs parses
//!     to a single empty [`Line`].

pub mod line_grouping;
pub mod runs;
pub mod tokens;

pub use line_grouping::group_into_lines;
pub use runs::RunExtractor;
pub use tokens::MarkupToken;

use serde::Serialize;

/// One text run as reported by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawElement {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl RawElement {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        RawElement {
            text: text.into(),
            x,
            y,
        }
    }

    /// Number of chars in the run.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// One rendered line: runs sharing the same vertical coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Line {
    pub elements: Vec<RawElement>,
}

impl Line {
    pub fn new(elements: Vec<RawElement>) -> Self {
        Line { elements }
    }

    /// Vertical coordinate of the line, `None` for an empty line.
    pub fn y(&self) -> Option<f64> {
        self.elements.first().map(|element| element.y)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total number of chars over the line's runs.
    pub fn char_count(&self) -> usize {
        self.elements.iter().map(RawElement::len).sum()
    }
}

/// Turns renderer markup into rendered lines.
#[derive(Debug, Clone, Default)]
pub struct RenderOutputParser {
    run_tags: Vec<String>,
}

impl RenderOutputParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict runs to the given element names. An empty list accepts any
    /// element carrying both coordinates.
    pub fn with_run_tags(run_tags: Vec<String>) -> Self {
        RenderOutputParser { run_tags }
    }

    /// Parse markup into lines. Never fails and never returns an empty vector.
    pub fn parse(&self, markup: &str) -> Vec<Line> {
        let lines = group_into_lines(RunExtractor::new(markup).with_run_tags(&self.run_tags));
        log::trace!(
            "parsed {} rendered line(s) with {} run(s)",
            lines.len(),
            lines.iter().map(|line| line.elements.len()).sum::<usize>()
        );
        lines
    }
}

/// Parse markup with the default parser, accepting any run element.
pub fn parse_lines(markup: &str) -> Vec<Line> {
    RenderOutputParser::new().parse(markup)
}

/// True when no line carries a single run.
pub fn has_no_runs(lines: &[Line]) -> bool {
    lines.iter().all(Line::is_empty)
}
