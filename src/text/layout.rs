//! Line layout
//!
//!     Turns a [`LineGroup`] into positioned boxes. Lines are stacked top to bottom
//!     with a vertical cursor that starts at zero:
//!
//!         - a paragraph break advances the cursor by the block's paragraph spacing
//!         - a visual line becomes a [`LineBox`] at the cursor; its fragments are laid
//!           out left to right from `x = 0`, each advancing by its measured width,
//!           and the box is then shrunk to fit its runs. The cursor advances by the
//!           line height: the block's explicit line height if set, otherwise the
//!           tallest default line height among the line's fragments. An empty line
//!           uses the block's single-line height.
//!
//!     Once everything is stacked, every line is aligned horizontally within the
//!     block's width, and the stack as a whole is aligned vertically within the
//!     block's height. The two axes are independent.
//!
//!     Measuring text is the host's business: widths come from a [`Measure`]
//!     implementation. The builder never computes glyph metrics.

use crate::text::block::TextBlock;
use crate::text::fragment::Fragment;
use crate::text::geometry::Frame;
use crate::text::mapping::{LineGroup, LineGroupElement};
use crate::text::style::{BlockStyle, HorizontalAlignment, RunStyle, VerticalAlignment};

/// Source of rendered text widths.
pub trait Measure {
    fn text_width(&self, text: &str, style: &RunStyle) -> f64;
}

impl<F> Measure for F
where
    F: Fn(&str, &RunStyle) -> f64,
{
    fn text_width(&self, text: &str, style: &RunStyle) -> f64 {
        self(text, style)
    }
}

/// Fixed advance per char, for hosts without real metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvanceMeasure {
    pub advance: f64,
}

impl AdvanceMeasure {
    pub fn new(advance: f64) -> Self {
        AdvanceMeasure { advance }
    }
}

impl Measure for AdvanceMeasure {
    fn text_width(&self, text: &str, _style: &RunStyle) -> f64 {
        text.chars().count() as f64 * self.advance
    }
}

/// A fragment with its frame relative to the enclosing line.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedRun {
    pub fragment: Fragment,
    pub frame: Frame,
}

/// One visual line. Its frame is relative to the stack.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
    pub frame: Frame,
    /// Height the line contributes to the stack.
    pub line_height: f64,
    pub runs: Vec<PositionedRun>,
}

impl LineBox {
    fn at(y: f64, line_height: f64) -> Self {
        LineBox {
            frame: Frame::new(0.0, y, 0.0, 0.0),
            line_height,
            runs: Vec::new(),
        }
    }

    /// Shrink the box to the bounding box of its runs, keeping the runs where
    /// they are in stack space.
    fn fit(&mut self) {
        let Some(bounds) = Frame::bounding(self.runs.iter().map(|run| &run.frame)) else {
            return;
        };
        self.frame = Frame::new(
            self.frame.x + bounds.x,
            self.frame.y + bounds.y,
            bounds.width,
            bounds.height,
        );
        for run in &mut self.runs {
            run.frame = run.frame.translated(-bounds.x, -bounds.y);
        }
    }
}

/// All line boxes of a block. Its frame is relative to the block's origin.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayout {
    pub frame: Frame,
    pub lines: Vec<LineBox>,
}

impl StackLayout {
    /// Total vertical extent: line heights plus paragraph spacing.
    pub fn extent(&self) -> f64 {
        self.frame.height
    }

    fn align_lines(&mut self, alignment: HorizontalAlignment, width: f64) {
        for line in &mut self.lines {
            line.frame.x = match alignment {
                HorizontalAlignment::Start => 0.0,
                HorizontalAlignment::Center => (width - line.frame.width) / 2.0,
                HorizontalAlignment::End => width - line.frame.width,
            };
        }
    }

    fn align_vertically(&mut self, alignment: VerticalAlignment, height: f64) {
        self.frame.y = match alignment {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Center => (height - self.frame.height) / 2.0,
            VerticalAlignment::Bottom => height - self.frame.height,
        };
    }
}

/// Stacks and aligns the lines of one block.
pub struct LineLayoutBuilder<'a, M: Measure + ?Sized> {
    style: &'a BlockStyle,
    block_frame: Frame,
    empty_line_height: f64,
    measure: &'a M,
}

impl<'a, M: Measure + ?Sized> LineLayoutBuilder<'a, M> {
    pub fn new(block: &'a TextBlock, measure: &'a M) -> Self {
        LineLayoutBuilder {
            style: &block.style,
            block_frame: block.frame,
            empty_line_height: block.single_line_height(),
            measure,
        }
    }

    fn line_height(&self, fragments: &[Fragment]) -> f64 {
        if let Some(height) = self.style.explicit_line_height() {
            return height;
        }
        if fragments.is_empty() {
            return self.empty_line_height;
        }
        fragments
            .iter()
            .map(|f| f.default_line_height)
            .fold(0.0, f64::max)
    }

    fn place_line(&self, fragments: Vec<Fragment>, y: f64) -> LineBox {
        let height = self.line_height(&fragments);
        let mut line = LineBox::at(y, height);
        let mut x = 0.0;
        for fragment in fragments {
            let width = self.measure.text_width(&fragment.text, &fragment.style);
            line.runs.push(PositionedRun {
                frame: Frame::new(x, 0.0, width, height),
                fragment,
            });
            x += width;
        }
        line.fit();
        line
    }

    /// Lay out the group and apply both alignments.
    pub fn build(&self, group: LineGroup) -> StackLayout {
        let mut cursor = 0.0;
        let mut lines = Vec::new();
        for element in group {
            match element {
                LineGroupElement::ParagraphBreak(_) => cursor += self.style.paragraph_spacing,
                LineGroupElement::Fragments(fragments) => {
                    let line = self.place_line(fragments, cursor);
                    cursor += line.line_height;
                    lines.push(line);
                }
            }
        }

        let mut stack = StackLayout {
            frame: Frame::new(0.0, 0.0, self.block_frame.width, cursor),
            lines,
        };
        stack.align_lines(self.style.alignment, self.block_frame.width);
        stack.align_vertically(self.style.vertical_alignment, self.block_frame.height);
        stack
    }
}
