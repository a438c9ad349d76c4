//! The render call
//!
//! Rendering belongs to the host: we hand it a block and get back vector markup.
//! The call is deterministic for a fixed block, so a failure is never retried.
//! The pipeline treats it like empty markup instead (see
//! [`Engine::line_group`](crate::text::pipeline::Engine::line_group)).

use crate::text::block::TextBlock;

/// Error reported by a host renderer.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// Renders a text block to markup.
pub trait Renderer {
    fn render(&self, block: &TextBlock) -> Result<String, RenderError>;
}

impl<F> Renderer for F
where
    F: Fn(&TextBlock) -> Result<String, RenderError>,
{
    fn render(&self, block: &TextBlock) -> Result<String, RenderError> {
        self(block)
    }
}

/// A renderer that always answers with the same markup, e.g. an SVG export
/// read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticMarkup(pub String);

impl StaticMarkup {
    pub fn new(markup: impl Into<String>) -> Self {
        StaticMarkup(markup.into())
    }
}

impl Renderer for StaticMarkup {
    fn render(&self, _block: &TextBlock) -> Result<String, RenderError> {
        Ok(self.0.clone())
    }
}
