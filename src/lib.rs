//! # meaxure-text
//!
//! Recovers how a multi-style text block was laid out by its renderer.
//!
//! A design tool hands us two independent views of the same text block: the
//! authored fragments (runs of text sharing one style) and the renderer's vector
//! output, where every visual line is a row of positioned text runs. Neither side
//! alone says which fragment ended up on which line. This crate pairs them up,
//! splits fragments that wrap mid-run, re-inserts the manual paragraph breaks the
//! renderer never reports, and computes a frame for every resulting run.
//!
//! File Layout
//!
//! src/text
//!   ├── markup       Render-output tokenizer and line grouping
//!   ├── mapping      Fragment to line pairing
//!   ├── layout       Line stacking and alignment
//!   ├── placement    Absolute frames for every run
//!   └── pipeline     Per-block orchestration
//!
//! For test helpers, see the [testing module](text::testing).

pub mod text;
