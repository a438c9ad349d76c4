//! Reconstruction pipeline
//!
//! Chains the stages for one block:
//!
//!     TextBlock ──render──▶ markup ──parse──▶ Vec<Line> ──map──▶ LineGroup
//!               ──layout──▶ StackLayout ──emit──▶ PlacedBlock
//!
//! Blocks that provably fit on one line skip the render round-trip entirely: the
//! frame is no taller than a single line and the text holds no break, so the
//! whole fragment stream is one visual line.
//!
//! Blocks are independent. [`Engine::reconstruct_all`] reports one result per
//! block, so a failure in one block never stops the others.

use crate::text::block::TextBlock;
use crate::text::error::{BlockError, ReconstructError, Result};
use crate::text::keep_alive::{KeepAliveHost, KeepAliveRegistry, NoopHost};
use crate::text::layout::{LineLayoutBuilder, Measure};
use crate::text::mapping::{FragmentLineMapper, LineGroup};
use crate::text::markup::{has_no_runs, RenderOutputParser};
use crate::text::placement::{emit, PlacedBlock};
use crate::text::render::Renderer;
use meaxure_config::MeaxureConfig;

/// Settings shared by every block an [`Engine`] processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Element names that count as text runs. Empty accepts any element.
    pub run_tags: Vec<String>,
    pub line_break: char,
    /// Skip rendering for blocks that fit on one line.
    pub single_line_shortcut: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            run_tags: Vec::new(),
            line_break: '\n',
            single_line_shortcut: true,
        }
    }
}

impl From<&MeaxureConfig> for EngineOptions {
    fn from(config: &MeaxureConfig) -> Self {
        EngineOptions {
            run_tags: config.markup.run_tags.clone(),
            line_break: config.mapping.line_break,
            single_line_shortcut: config.layout.single_line_shortcut,
        }
    }
}

/// Reconstructs text blocks with a host renderer and text measure.
pub struct Engine<R, M, H = NoopHost> {
    options: EngineOptions,
    parser: RenderOutputParser,
    mapper: FragmentLineMapper,
    renderer: R,
    measure: M,
    keep_alive: KeepAliveRegistry<H>,
}

impl<R: Renderer, M: Measure> Engine<R, M, NoopHost> {
    pub fn new(renderer: R, measure: M) -> Self {
        Self::with_options(renderer, measure, EngineOptions::default())
    }

    pub fn with_options(renderer: R, measure: M, options: EngineOptions) -> Self {
        Engine {
            parser: RenderOutputParser::with_run_tags(options.run_tags.clone()),
            mapper: FragmentLineMapper::new(options.line_break),
            options,
            renderer,
            measure,
            keep_alive: KeepAliveRegistry::new(NoopHost),
        }
    }
}

impl<R: Renderer, M: Measure, H: KeepAliveHost> Engine<R, M, H> {
    /// Swap in a host whose keep-alive switch is held during batches.
    pub fn with_keep_alive_host<H2: KeepAliveHost>(self, host: H2) -> Engine<R, M, H2> {
        Engine {
            options: self.options,
            parser: self.parser,
            mapper: self.mapper,
            renderer: self.renderer,
            measure: self.measure,
            keep_alive: KeepAliveRegistry::new(host),
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn keep_alive(&self) -> &KeepAliveRegistry<H> {
        &self.keep_alive
    }

    /// Whether `block` can skip rendering.
    fn fits_one_line(&self, block: &TextBlock) -> bool {
        self.options.single_line_shortcut
            && !block.contains_break(self.options.line_break)
            && !block.is_multi_line()
    }

    /// Pair the block's fragments with its rendered lines.
    ///
    /// Structural problems are pushed onto `warnings` and the block degrades to
    /// whatever the mapper makes of the remaining input.
    pub fn line_group(
        &self,
        block: &TextBlock,
        warnings: &mut Vec<ReconstructError>,
    ) -> Result<LineGroup> {
        if block.fragments.is_empty() {
            return Ok(LineGroup::new());
        }
        if self.fits_one_line(block) {
            log::debug!("block fits on one line, skipping render");
            return Ok(LineGroup::single_line(block.fragments.clone()));
        }

        let markup = match self.renderer.render(block) {
            Ok(markup) => markup,
            Err(err) => {
                log::warn!("render failed, treating output as empty: {err}");
                String::new()
            }
        };
        let lines = self.parser.parse(&markup);
        if has_no_runs(&lines) && block.total_length() > 0 {
            let warning = ReconstructError::Structural {
                characters: block.total_length(),
            };
            log::warn!("{warning}");
            warnings.push(warning);
        }
        self.mapper.map(block.fragments.clone(), &lines)
    }

    /// Reconstruct one block.
    pub fn reconstruct(&self, block: &TextBlock) -> Result<PlacedBlock> {
        let mut warnings = Vec::new();
        let group = self.line_group(block, &mut warnings)?;
        let stack = LineLayoutBuilder::new(block, &self.measure).build(group);
        Ok(PlacedBlock {
            runs: emit(&block.frame, stack),
            warnings,
        })
    }

    /// Reconstruct every block, holding the host's keep-alive switch for the
    /// duration of the batch. Results come back in block order.
    pub fn reconstruct_all(
        &mut self,
        blocks: &[TextBlock],
    ) -> Vec<std::result::Result<PlacedBlock, BlockError>> {
        let request = self.keep_alive.acquire();
        let results = blocks
            .iter()
            .enumerate()
            .map(|(block_index, block)| {
                self.reconstruct(block).map_err(|source| {
                    log::error!("block {block_index}: {source}");
                    BlockError {
                        block_index,
                        source,
                    }
                })
            })
            .collect();
        self.keep_alive.release(request);
        results
    }
}
