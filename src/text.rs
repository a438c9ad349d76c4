//! Main module for text block reconstruction

pub mod block;
pub mod error;
pub mod fragment;
pub mod geometry;
pub mod keep_alive;
pub mod layout;
pub mod mapping;
pub mod markup;
pub mod pipeline;
pub mod placement;
pub mod render;
pub mod style;
pub mod testing;

pub use block::TextBlock;
pub use error::{BlockError, ReconstructError, Result};
pub use fragment::{Fragment, SplitError};
pub use geometry::Frame;
pub use layout::{AdvanceMeasure, LineLayoutBuilder, Measure, StackLayout};
pub use mapping::{FragmentLineMapper, LineGroup, LineGroupElement};
pub use markup::{Line, RawElement, RenderOutputParser};
pub use pipeline::{Engine, EngineOptions};
pub use placement::{PlacedBlock, PlacedRun};
pub use render::{RenderError, Renderer, StaticMarkup};
pub use style::{BlockStyle, HorizontalAlignment, RunStyle, VerticalAlignment};
