//! 肖像画布渲染器
//!
//! 使用 ratatui 的盲文画布绘制场景。终端单元格高约为宽的两倍，画布在
//! 给定区域内居中，列数为行数的两倍以保持正方形。

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color as TuiColor,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Circle, Context, Line, Points},
    },
};

use crate::color::{BACKGROUND, Hsba, Rgb};
use crate::scene::Scene;

/// 粒子半径小于此值时只画一个点
const DOT_RADIUS: f64 = 3.0;
/// 光束平行线间距（逻辑单位）
const BEAM_LINE_SPACING: f64 = 2.0;
/// 描边宽度达到此值时画第二条轮廓
const HEAVY_STROKE: f64 = 2.0;
/// 单条光束最多画出的平行线数
pub const MAX_BEAM_LINES: usize = 8;

impl From<Rgb> for TuiColor {
    fn from(rgb: Rgb) -> Self {
        TuiColor::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Largest centred area with twice as many columns as rows.
pub fn square_area(area: Rect) -> Rect {
    let rows = area.height.min(area.width / 2);
    let cols = rows * 2;
    Rect {
        x: area.x + (area.width - cols) / 2,
        y: area.y + (area.height - rows) / 2,
        width: cols,
        height: rows,
    }
}

/// Parallel lines used to draw a beam of `weight`: `round(weight)`, at
/// least one and at most [`MAX_BEAM_LINES`].
pub fn beam_line_count(weight: f64) -> usize {
    // NaN.max(1.0) == 1.0
    weight.round().max(1.0).min(MAX_BEAM_LINES as f64) as usize
}

/// Widget drawing one [`Scene`].
pub struct PortraitWidget<'a> {
    scene: &'a Scene,
}

impl<'a> PortraitWidget<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self { scene }
    }
}

impl Widget for PortraitWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // 填充背景
        let background = TuiColor::from(BACKGROUND);
        for x in area.left()..area.right() {
            for y in area.top()..area.bottom() {
                buf[(x, y)].set_char(' ').set_bg(background);
            }
        }

        let square = square_area(area);
        if square.width == 0 || square.height == 0 {
            return;
        }

        let scene = self.scene;
        let size = scene.canvas_size;
        Canvas::default()
            .marker(Marker::Braille)
            .background_color(background)
            .x_bounds([0.0, size])
            .y_bounds([0.0, size])
            .paint(|ctx| {
                let painter = Painter { size };
                painter.glows(ctx, scene);
                ctx.layer();
                painter.rings(ctx, scene);
                ctx.layer();
                painter.sprites(ctx, scene);
                ctx.layer();
                painter.beams(ctx, scene);
            })
            .render(square, buf);
    }
}

/// Converts scene coordinates (y down) to canvas coordinates (y up).
struct Painter {
    size: f64,
}

impl Painter {
    fn flip(&self, y: f64) -> f64 {
        self.size - y
    }

    fn visible(color: &Hsba) -> Option<TuiColor> {
        (color.opacity() > 0.0).then(|| TuiColor::from(color.over(BACKGROUND)))
    }

    fn glows(&self, ctx: &mut Context, scene: &Scene) {
        let c = scene.center();
        for glow in &scene.glows {
            let Some(color) = Self::visible(&glow.color) else {
                continue;
            };
            ctx.draw(&Circle {
                x: c,
                y: self.flip(c),
                radius: glow.radius,
                color,
            });
        }
    }

    fn rings(&self, ctx: &mut Context, scene: &Scene) {
        let c = scene.center();
        for ring in &scene.rings {
            let Some(color) = Self::visible(&ring.color) else {
                continue;
            };
            ctx.draw(&Circle {
                x: c,
                y: self.flip(c),
                radius: ring.radius,
                color,
            });
            if ring.stroke_weight >= HEAVY_STROKE {
                ctx.draw(&Circle {
                    x: c,
                    y: self.flip(c),
                    radius: ring.radius + ring.stroke_weight,
                    color,
                });
            }
            // 旋转标记
            let tick = (
                c + ring.rotation.cos() * ring.radius,
                self.flip(c + ring.rotation.sin() * ring.radius),
            );
            ctx.draw(&Points {
                coords: &[tick],
                color,
            });
        }
    }

    fn sprites(&self, ctx: &mut Context, scene: &Scene) {
        for sprite in &scene.sprites {
            let Some(color) = Self::visible(&sprite.color) else {
                continue;
            };
            let (x, y) = (sprite.x, self.flip(sprite.y));
            ctx.draw(&Points {
                coords: &[(x, y)],
                color,
            });
            let radius = sprite.size / 2.0;
            if radius >= DOT_RADIUS {
                ctx.draw(&Circle { x, y, radius, color });
            }
        }
    }

    fn beams(&self, ctx: &mut Context, scene: &Scene) {
        for beam in &scene.beams {
            let Some(color) = Self::visible(&beam.color) else {
                continue;
            };
            let (dx, dy) = (beam.x2 - beam.x1, beam.y2 - beam.y1);
            let len = dx.hypot(dy);
            if len == 0.0 {
                continue;
            }
            // 法线方向平移出 round(weight) 条平行线
            let (nx, ny) = (-dy / len, dx / len);
            let lines = beam_line_count(beam.weight);
            for k in 0..lines {
                let offset = (k as f64 - (lines - 1) as f64 / 2.0) * BEAM_LINE_SPACING;
                ctx.draw(&Line {
                    x1: beam.x1 + nx * offset,
                    y1: self.flip(beam.y1 + ny * offset),
                    x2: beam.x2 + nx * offset,
                    y2: self.flip(beam.y2 + ny * offset),
                    color,
                });
            }
        }
    }
}
