//! Placement
//!
//! Resolves the final frame of every run by adding up the offsets of its
//! ancestors (block origin, stack, line) and emits one [`PlacedRun`] per
//! fragment. The layout tree is consumed in the process; only the flat list of
//! runs survives.

use crate::text::error::ReconstructError;
use crate::text::geometry::Frame;
use crate::text::layout::StackLayout;
use crate::text::style::RunStyle;
use serde::{Deserialize, Serialize};

/// One run with its final frame, in the host document's coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRun {
    pub text: String,
    pub style: RunStyle,
    pub frame: Frame,
}

/// The outcome of reconstructing one block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacedBlock {
    /// Runs in the block's text order.
    pub runs: Vec<PlacedRun>,
    /// Non-fatal problems met on the way, such as render output without runs.
    pub warnings: Vec<ReconstructError>,
}

impl PlacedBlock {
    /// The placed text, runs concatenated in order.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Flatten a stack laid out inside a block whose frame is `block_frame`.
pub fn emit(block_frame: &Frame, stack: StackLayout) -> Vec<PlacedRun> {
    let origin_x = block_frame.x + stack.frame.x;
    let origin_y = block_frame.y + stack.frame.y;
    stack
        .lines
        .into_iter()
        .flat_map(|line| {
            let dx = origin_x + line.frame.x;
            let dy = origin_y + line.frame.y;
            line.runs.into_iter().map(move |run| PlacedRun {
                frame: run.frame.translated(dx, dy),
                text: run.fragment.text,
                style: run.fragment.style,
            })
        })
        .collect()
}
