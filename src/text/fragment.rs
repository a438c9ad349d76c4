//! Fragments
//!
//!     A fragment is a maximal authored run of text sharing one style. Within a
//!     block the fragments are contiguous and ordered: each one starts where the
//!     previous one ended, and their lengths add up to the block's text length.
//!
//!     Lengths and offsets count chars, never bytes. Splitting always produces two
//!     independent values: the left part gets a copy of the style, the remainder
//!     keeps the original. Nothing is shared between the pieces.

use crate::text::error::ReconstructError;
use crate::text::style::RunStyle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One styled run of a text block.
///
/// `length` is never read from input: deserializing derives it from `text`, so
/// a host counting in other units cannot desynchronize the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FragmentRecord")]
pub struct Fragment {
    pub text: String,
    /// Offset of the first char within the block's full text.
    pub location: usize,
    /// Number of chars in `text`.
    pub length: usize,
    #[serde(default)]
    pub style: RunStyle,
    pub default_line_height: f64,
}

/// Wire form of a [`Fragment`]. Any `length` the host sends is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FragmentRecord {
    text: String,
    location: usize,
    #[serde(default)]
    style: RunStyle,
    default_line_height: f64,
}

impl From<FragmentRecord> for Fragment {
    fn from(record: FragmentRecord) -> Self {
        Fragment::new(
            record.text,
            record.location,
            record.style,
            record.default_line_height,
        )
    }
}

/// A split that would leave a negative or empty left part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "cannot split {requested} characters off the fragment at offset {location} \
     ({remaining} remaining)"
)]
pub struct SplitError {
    pub location: usize,
    pub remaining: usize,
    pub requested: usize,
}

impl SplitError {
    /// Attach the index of the rendered line being mapped.
    pub fn at_line(self, line: usize) -> ReconstructError {
        ReconstructError::Consistency {
            location: self.location,
            remaining: self.remaining,
            requested: self.requested,
            line,
        }
    }
}

impl Fragment {
    /// Create a fragment, deriving `length` from the text.
    pub fn new(
        text: impl Into<String>,
        location: usize,
        style: RunStyle,
        default_line_height: f64,
    ) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Fragment {
            text,
            location,
            length,
            style,
            default_line_height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether `length` agrees with the chars actually in `text`.
    pub fn is_consistent(&self) -> bool {
        self.text.chars().count() == self.length
    }

    /// Offset just past the last char.
    pub fn end(&self) -> usize {
        self.location + self.length
    }

    pub fn starts_with_break(&self, line_break: char) -> bool {
        self.text.starts_with(line_break)
    }

    pub fn contains_break(&self, line_break: char) -> bool {
        self.text.contains(line_break)
    }

    /// Split off the first `at` chars.
    ///
    /// Returns the left part and the remainder, which is `None` when the split
    /// consumed the whole fragment. Asking for zero chars or for more than
    /// `length` is a [`SplitError`].
    pub fn split_at(self, at: usize) -> Result<(Fragment, Option<Fragment>), SplitError> {
        if at == 0 || at > self.length {
            return Err(SplitError {
                location: self.location,
                remaining: self.length,
                requested: at,
            });
        }
        let Fragment {
            text,
            location,
            length,
            style,
            default_line_height,
        } = self;

        let byte = byte_offset(&text, at);
        let left = Fragment {
            text: text[..byte].to_string(),
            location,
            length: at,
            style: style.clone(),
            default_line_height,
        };
        let remaining = length - at;
        let right = (remaining > 0).then(|| Fragment {
            text: text[byte..].to_string(),
            location: location + at,
            length: remaining,
            style,
            default_line_height,
        });
        Ok((left, right))
    }
}

/// Byte index of the `chars`-th char, clamped to the end of the string.
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
