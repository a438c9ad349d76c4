//! Fragment to line mapping
//!
//!     The fragment stream says *what* was written and in which style; the rendered
//!     lines say *where* it ended up, but only as raw runs. This module walks both in
//!     one linear pass and produces a [`LineGroup`]: one fragment list per visual
//!     line, interleaved with paragraph break markers.
//!
//! The Pass
//!
//!     For every run of every rendered line, the cursor takes the active fragment
//!     (or pulls the next one from the stream) and:
//!
//!         1. Strips leading break characters. Each one becomes a
//!            [`LineGroupElement::ParagraphBreak`]. When two breaks follow each
//!            other with no content in between, an extra empty line is emitted
//!            first: the renderer never reports a row for the blank line between
//!            them.
//!         2. Compares the run length with the fragment's remaining length. Equal
//!            lengths move the whole fragment onto the line. A shorter run means the
//!            fragment wraps: the fragment is split and the remainder stays active
//!            for the next run. A longer run means the two sources disagree and the
//!            pass fails.
//!
//!     A break met in the middle of a rendered line ends the visual line there, so
//!     the output order is always `[before], break, [after]`.
//!
//!     Break characters left at the very end of the stream are drained with the same
//!     rules, since the renderer never reports them. Any other leftover text is an
//!     error.
//!
//! Ownership
//!
//!     The cursor holds at most one active fragment at a time and replaces it
//!     outright on every split. Split pieces never share anything, so no fragment is
//!     ever observed through two names.
//!
//!     Every step consumes at least one char, so the pass runs in time linear in the
//!     block's text length.

use crate::text::error::{ReconstructError, Result};
use crate::text::fragment::Fragment;
use crate::text::markup::{Line, RawElement};
use std::mem;

/// One entry of a [`LineGroup`].
#[derive(Debug, Clone, PartialEq)]
pub enum LineGroupElement {
    /// The fragments of one visual line, left to right. May be empty.
    Fragments(Vec<Fragment>),
    /// A manual paragraph break. Carries the break character split off the
    /// authored text, so no char of the block is ever dropped.
    ParagraphBreak(Fragment),
}

impl LineGroupElement {
    pub fn is_break(&self) -> bool {
        matches!(self, LineGroupElement::ParagraphBreak(_))
    }

    /// The line's fragments, `None` for a break.
    pub fn fragments(&self) -> Option<&[Fragment]> {
        match self {
            LineGroupElement::Fragments(fragments) => Some(fragments),
            LineGroupElement::ParagraphBreak(_) => None,
        }
    }
}

/// The mapped sequence of visual lines and paragraph breaks for one block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineGroup {
    elements: Vec<LineGroupElement>,
}

impl LineGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// All fragments on one line, unsplit.
    pub fn single_line(fragments: Vec<Fragment>) -> Self {
        LineGroup {
            elements: vec![LineGroupElement::Fragments(fragments)],
        }
    }

    pub fn push_line(&mut self, fragments: Vec<Fragment>) {
        self.elements.push(LineGroupElement::Fragments(fragments));
    }

    pub fn push_break(&mut self, break_fragment: Fragment) {
        self.elements
            .push(LineGroupElement::ParagraphBreak(break_fragment));
    }

    pub fn elements(&self) -> &[LineGroupElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the visual lines, skipping breaks.
    pub fn lines(&self) -> impl Iterator<Item = &[Fragment]> {
        self.elements.iter().filter_map(LineGroupElement::fragments)
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    pub fn break_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_break()).count()
    }

    /// Chars placed on visual lines, breaks excluded.
    pub fn content_length(&self) -> usize {
        self.lines().flatten().map(|f| f.length).sum()
    }

    /// Chars held by the whole group, break characters included. Equals the
    /// length of the fragment stream the group was mapped from.
    pub fn total_length(&self) -> usize {
        self.content_length() + self.break_count()
    }

    /// Rebuild the block text in order, with `line_break` for every break.
    pub fn text(&self, line_break: char) -> String {
        let mut text = String::new();
        for element in &self.elements {
            match element {
                LineGroupElement::Fragments(fragments) => {
                    fragments.iter().for_each(|f| text.push_str(&f.text))
                }
                LineGroupElement::ParagraphBreak(_) => text.push(line_break),
            }
        }
        text
    }
}

impl From<Vec<LineGroupElement>> for LineGroup {
    fn from(elements: Vec<LineGroupElement>) -> Self {
        LineGroup { elements }
    }
}

impl IntoIterator for LineGroup {
    type Item = LineGroupElement;
    type IntoIter = std::vec::IntoIter<LineGroupElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

/// Pairs a fragment stream with rendered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentLineMapper {
    line_break: char,
}

impl Default for FragmentLineMapper {
    fn default() -> Self {
        FragmentLineMapper { line_break: '\n' }
    }
}

impl FragmentLineMapper {
    pub fn new(line_break: char) -> Self {
        FragmentLineMapper { line_break }
    }

    /// Map `fragments` onto `lines`.
    ///
    /// With exactly one rendered line and no break characters in the stream, the
    /// whole stream becomes one visual line as-is: nothing wraps, so there is
    /// nothing to split. The line must still hold exactly the stream's chars,
    /// unless it has no runs at all (a degraded render).
    pub fn map(&self, fragments: Vec<Fragment>, lines: &[Line]) -> Result<LineGroup> {
        if let Some(bad) = fragments.iter().find(|f| !f.is_consistent()) {
            return Err(ReconstructError::LengthMismatch {
                location: bad.location,
                length: bad.length,
                characters: bad.text.chars().count(),
            });
        }
        if let [line] = lines {
            if !fragments.iter().any(|f| f.contains_break(self.line_break)) {
                if !line.is_empty() {
                    check_single_line(&fragments, line)?;
                }
                log::debug!(
                    "single rendered line, keeping {} fragment(s) unsplit",
                    fragments.len()
                );
                return Ok(LineGroup::single_line(fragments));
            }
        }

        let mut cursor = MappingCursor::new(fragments, self.line_break);
        for (index, line) in lines.iter().enumerate() {
            cursor.line_index = index;
            for element in &line.elements {
                cursor.consume(element)?;
            }
            cursor.end_line();
        }
        let group = cursor.finish()?;
        log::debug!(
            "mapped {} rendered line(s) to {} visual line(s) and {} break(s)",
            lines.len(),
            group.line_count(),
            group.break_count()
        );
        Ok(group)
    }
}

/// Compare the chars of a lone rendered line with the whole stream.
fn check_single_line(fragments: &[Fragment], line: &Line) -> Result<()> {
    let rendered = line.char_count();
    let start = fragments.first().map_or(0, |f| f.location);
    let end = fragments.last().map_or(start, Fragment::end);
    let authored = end - start;
    if rendered > authored {
        return Err(ReconstructError::FragmentsExhausted {
            line: 0,
            location: end,
        });
    }
    if rendered < authored {
        let location = start + rendered;
        return Err(ReconstructError::FragmentsLeftOver {
            line: 0,
            location,
            remaining: fragments
                .iter()
                .filter(|f| !f.is_empty() && f.end() > location)
                .count(),
        });
    }
    Ok(())
}

/// State carried across the pass.
struct MappingCursor {
    stream: std::vec::IntoIter<Fragment>,
    active: Option<Fragment>,
    /// The last thing emitted was a break, with no content since.
    previous_was_break: bool,
    line_break: char,
    line_index: usize,
    /// Fragments of the visual line being built.
    current: Vec<Fragment>,
    output: LineGroup,
    /// Block offset just past the last fragment pulled from the stream.
    reached: usize,
}

impl MappingCursor {
    fn new(fragments: Vec<Fragment>, line_break: char) -> Self {
        MappingCursor {
            stream: fragments.into_iter(),
            active: None,
            previous_was_break: false,
            line_break,
            line_index: 0,
            current: Vec::new(),
            output: LineGroup::new(),
            reached: 0,
        }
    }

    /// Next non-empty fragment of the stream.
    fn pull(&mut self) -> Option<Fragment> {
        let fragment = self.stream.find(|f| !f.is_empty())?;
        self.reached = fragment.end();
        Some(fragment)
    }

    fn exhausted(&self) -> ReconstructError {
        ReconstructError::FragmentsExhausted {
            line: self.line_index,
            location: self.reached,
        }
    }

    /// Place one rendered run.
    fn consume(&mut self, element: &RawElement) -> Result<()> {
        let wanted = element.len();
        if wanted == 0 {
            return Ok(());
        }
        let fragment = match self.active.take().or_else(|| self.pull()) {
            Some(fragment) => fragment,
            None => return Err(self.exhausted()),
        };
        let fragment = match self.skip_breaks(fragment)? {
            Some(fragment) => fragment,
            None => return Err(self.exhausted()),
        };

        log::trace!(
            "line {}: run {:?} against fragment at {} ({} left)",
            self.line_index,
            element.text,
            fragment.location,
            fragment.length
        );
        if wanted == fragment.length {
            self.current.push(fragment);
        } else if wanted < fragment.length {
            let (left, remainder) = fragment
                .split_at(wanted)
                .map_err(|err| err.at_line(self.line_index))?;
            self.current.push(left);
            self.active = remainder;
        } else {
            return Err(ReconstructError::Consistency {
                location: fragment.location,
                remaining: fragment.length,
                requested: wanted,
                line: self.line_index,
            });
        }
        self.previous_was_break = false;
        Ok(())
    }

    /// Emit a break for every leading break character, pulling more fragments
    /// while breaks use them up.
    ///
    /// Returns the first fragment that starts with content, or `None` once the
    /// stream runs dry.
    fn skip_breaks(&mut self, mut fragment: Fragment) -> Result<Option<Fragment>> {
        while fragment.starts_with_break(self.line_break) {
            let (mark, remainder) = fragment
                .split_at(1)
                .map_err(|err| err.at_line(self.line_index))?;
            self.emit_break(mark);
            fragment = match remainder.or_else(|| self.pull()) {
                Some(next) => next,
                None => return Ok(None),
            };
        }
        Ok(Some(fragment))
    }

    fn emit_break(&mut self, mark: Fragment) {
        if !self.current.is_empty() {
            // A break in the middle of a rendered line ends the visual line.
            let before = mem::take(&mut self.current);
            self.output.push_line(before);
        }
        if self.previous_was_break {
            self.output.push_line(Vec::new());
        }
        self.output.push_break(mark);
        self.previous_was_break = true;
    }

    fn end_line(&mut self) {
        let fragments = mem::take(&mut self.current);
        self.output.push_line(fragments);
    }

    fn finish(mut self) -> Result<LineGroup> {
        if let Some(fragment) = self.active.take().or_else(|| self.pull()) {
            if let Some(content) = self.skip_breaks(fragment)? {
                return Err(ReconstructError::FragmentsLeftOver {
                    line: self.line_index,
                    location: content.location,
                    remaining: 1 + self.stream.filter(|f| !f.is_empty()).count(),
                });
            }
        }
        Ok(self.output)
    }
}
