//! Text blocks
//!
//! A block is one multi-style text element: its frame in the host document, its
//! block-wide style, and the ordered fragments making up its text.

use crate::text::fragment::Fragment;
use crate::text::geometry::Frame;
use crate::text::style::BlockStyle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub frame: Frame,
    #[serde(default)]
    pub style: BlockStyle,
    pub fragments: Vec<Fragment>,
}

impl TextBlock {
    pub fn new(frame: Frame, style: BlockStyle, fragments: Vec<Fragment>) -> Self {
        TextBlock {
            frame,
            style,
            fragments,
        }
    }

    /// Total number of chars over all fragments.
    pub fn total_length(&self) -> usize {
        self.fragments.iter().map(|f| f.length).sum()
    }

    /// The block's full text, fragments concatenated in order.
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    pub fn contains_break(&self, line_break: char) -> bool {
        self.fragments.iter().any(|f| f.contains_break(line_break))
    }

    /// Height of one line of this block: the explicit line height when set,
    /// otherwise the tallest default line height among the fragments.
    ///
    /// A block without fragments has a single-line height of zero.
    pub fn single_line_height(&self) -> f64 {
        self.style.explicit_line_height().unwrap_or_else(|| {
            self.fragments
                .iter()
                .map(|f| f.default_line_height)
                .fold(0.0, f64::max)
        })
    }

    /// Whether the block's frame has room for more than one line.
    pub fn is_multi_line(&self) -> bool {
        self.frame.height > self.single_line_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::style::RunStyle;

    fn block(line_height: Option<f64>, height: f64) -> TextBlock {
        TextBlock::new(
            Frame::new(0.0, 0.0, 100.0, height),
            BlockStyle {
                line_height,
                ..BlockStyle::default()
            },
            vec![
                Fragment::new("Hello ", 0, RunStyle::with_font_family("A"), 14.0),
                Fragment::new("World", 6, RunStyle::with_font_family("B"), 20.0),
            ],
        )
    }

    #[test]
    fn test_single_line_height_prefers_override() {
        assert_eq!(block(Some(16.0), 16.0).single_line_height(), 16.0);
        assert_eq!(block(None, 20.0).single_line_height(), 20.0);
    }

    #[test]
    fn test_multi_line_detection() {
        assert!(!block(None, 20.0).is_multi_line());
        assert!(block(None, 40.0).is_multi_line());
    }

    #[test]
    fn test_text_and_length() {
        let block = block(None, 20.0);
        assert_eq!(block.text(), "Hello World");
        assert_eq!(block.total_length(), 11);
    }

    #[test]
    fn test_empty_block() {
        let block = TextBlock::new(Frame::default(), BlockStyle::default(), vec![]);
        assert_eq!(block.single_line_height(), 0.0);
        assert_eq!(block.total_length(), 0);
    }
}
