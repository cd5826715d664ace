//! 文字叠加层
//!
//! 边框标题显示房间位置，底部显示读数和按键提示。没有数据时只显示提示。

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::color::BACKGROUND;
use crate::render::portrait::PortraitWidget;
use crate::scene::Scene;

pub const TITLE: &str = "Sensory Portrait";
pub const KEY_HINTS: &str = " ←/→ room · Home/End · q quit ";

/// 底部文字颜色：白色，透明度 240/255
const CAPTION_COLOR: Color = Color::Rgb(241, 241, 241);

/// Draws the bordered portrait with its caption, or a notice when there is
/// nothing to draw.
#[derive(Debug, Default)]
pub struct OverlayRenderer;

impl OverlayRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, scene: Option<&Scene>, notice: &str) {
        let title = match scene {
            Some(scene) if !scene.label.is_empty() => format!(" {} · {} ", TITLE, scene.label),
            _ => format!(" {} ", TITLE),
        };

        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(KEY_HINTS).alignment(Alignment::Right))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(100, 100, 100)))
            .style(Style::default().bg(Color::from(BACKGROUND)));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        match scene {
            Some(scene) => self.render_scene(frame, inner, scene),
            None => self.render_notice(frame, inner, notice),
        }
    }

    fn render_scene(&self, frame: &mut Frame, area: Rect, scene: &Scene) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // 画布
                Constraint::Length(1), // 读数
            ])
            .split(area);

        frame.render_widget(PortraitWidget::new(scene), chunks[0]);

        let caption = Paragraph::new(scene.caption.as_str())
            .style(Style::default().fg(CAPTION_COLOR))
            .alignment(Alignment::Center);
        frame.render_widget(caption, chunks[1]);
    }

    fn render_notice(&self, frame: &mut Frame, area: Rect, notice: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Min(1),
                Constraint::Percentage(45),
            ])
            .split(area);

        let text = Paragraph::new(notice)
            .style(
                Style::default()
                    .fg(Color::Rgb(180, 180, 180))
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(text, chunks[1]);
    }
}
