//! Ratatui renderer implementation for the portrait loop.

use crate::render::OverlayRenderer;
use crate::scene::Scene;

use anyhow::Context;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
};
use std::io::{self, Stdout};

/// 没有场景可画时的默认提示
pub const NO_DATA_NOTICE: &str = "No room data loaded";

/// Trait for rendering the portrait
pub trait Renderer {
    /// Initialize the renderer
    fn init(&mut self) -> anyhow::Result<()>;

    /// Draw one frame; `None` while there is no room data
    fn draw(&mut self, scene: Option<&Scene>) -> anyhow::Result<()>;

    /// Handle terminal resize
    fn resize(&mut self, width: u16, height: u16) -> anyhow::Result<()>;

    /// Cleanup resources
    fn cleanup(&mut self) -> anyhow::Result<()>;
}

/// Ratatui terminal renderer implementation
pub struct RatatuiRenderer<B: Backend> {
    terminal: Terminal<B>,
    overlay: OverlayRenderer,
    notice: String,
    frames_drawn: u64,
}

impl RatatuiRenderer<CrosstermBackend<Stdout>> {
    /// Renderer drawing to stdout; the caller owns raw mode and the
    /// alternate screen.
    pub fn stdout() -> anyhow::Result<Self> {
        Self::new(CrosstermBackend::new(io::stdout()))
    }
}

impl<B: Backend> RatatuiRenderer<B> {
    pub fn new(backend: B) -> anyhow::Result<Self> {
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;
        Ok(Self {
            terminal,
            overlay: OverlayRenderer::new(),
            notice: NO_DATA_NOTICE.to_string(),
            frames_drawn: 0,
        })
    }

    /// 设置无数据时显示的提示
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = notice.into();
        self
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Renderer for RatatuiRenderer<B> {
    fn init(&mut self) -> anyhow::Result<()> {
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    fn draw(&mut self, scene: Option<&Scene>) -> anyhow::Result<()> {
        let overlay = &self.overlay;
        let notice = self.notice.as_str();
        self.terminal
            .draw(|f| {
                let area = f.area();
                overlay.render(f, area, scene, notice);
            })
            .context("Failed to draw frame")?;
        self.frames_drawn += 1;
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) -> anyhow::Result<()> {
        log::debug!("Terminal resized to {}x{}", width, height);
        self.terminal.resize(Rect::new(0, 0, width, height))?;
        Ok(())
    }

    fn cleanup(&mut self) -> anyhow::Result<()> {
        self.terminal.show_cursor()?;
        Ok(())
    }
}
