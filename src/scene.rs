//! 单帧场景合成
//!
//! 把房间读数、动画时间和粒子状态转换为一组可绘制的图元。坐标使用
//! 屏幕方向（y 向下），原点在画布左上角，画布为正方形。

use std::f64::consts::TAU;

use rand::Rng;
use rooms::RoomReading;

use crate::color::Hsba;
use crate::mapping::{VisualParams, map_range};
use crate::particles::ParticleField;

/// 辉光层数，每层色相偏移 120°
pub const LAYERS: usize = 3;
pub const LAYER_HUE_OFFSET: f64 = 120.0;
/// Radius step between consecutive glow circles.
pub const GLOW_STEP: f64 = 15.0;
/// Ring band and beam length as a fraction of the canvas width.
pub const RING_SPAN: f64 = 0.4;
pub const BEAM_SPAN: f64 = 0.4;

/// One step of a layered radial glow.
#[derive(Debug, Clone, PartialEq)]
pub struct GlowCircle {
    pub radius: f64,
    pub color: Hsba,
}

/// 湿度环
#[derive(Debug, Clone, PartialEq)]
pub struct HumidityRing {
    pub radius: f64,
    pub rotation: f64,
    pub stroke_weight: f64,
    pub color: Hsba,
}

/// A filled dot. Special particles produce two sprites, outer first.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: Hsba,
}

/// 光束
#[derive(Debug, Clone, PartialEq)]
pub struct Beam {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub weight: f64,
    pub color: Hsba,
}

/// Everything drawn in one frame, in back-to-front order.
#[derive(Debug, Clone)]
pub struct Scene {
    pub canvas_size: f64,
    pub time: f64,
    pub params: VisualParams,
    pub glows: Vec<GlowCircle>,
    pub rings: Vec<HumidityRing>,
    pub sprites: Vec<Sprite>,
    pub beams: Vec<Beam>,
    /// 底部读数文字
    pub caption: String,
    /// 房间位置与名称，由 `Portrait` 填写
    pub label: String,
}

impl Scene {
    pub fn center(&self) -> f64 {
        self.canvas_size / 2.0
    }
}

/// Builds the scene for `reading` at animation time `time`, stepping the
/// particle field by one frame.
pub fn compose<R: Rng + ?Sized>(
    reading: &RoomReading,
    time: f64,
    particles: &mut ParticleField,
    canvas_size: f64,
    rng: &mut R,
) -> Scene {
    let params = VisualParams::from_reading(reading, canvas_size);

    let glows = glow_circles(&params, time, canvas_size);
    let rings = humidity_rings(&params, time, canvas_size, rng);

    // 粒子
    let pulse = (time * 2.0).sin() * 2.0;
    let hue = params.hue;
    let sprites = particles
        .advance(params.particle_speed, time)
        .iter()
        .flat_map(|p| {
            let life = p.visible_life();
            if p.special {
                vec![
                    Sprite {
                        x: p.x,
                        y: p.y,
                        size: (p.size + pulse).abs(),
                        color: Hsba::new(hue, 70.0, 100.0, life),
                    },
                    Sprite {
                        x: p.x,
                        y: p.y,
                        size: (p.size * 0.5 + pulse).abs(),
                        color: Hsba::new((hue + 180.0) % 360.0, 70.0, 100.0, life * 0.5),
                    },
                ]
            } else {
                vec![Sprite {
                    x: p.x,
                    y: p.y,
                    size: p.size,
                    color: Hsba::new(hue, 50.0, 100.0, life),
                }]
            }
        })
        .collect();
    particles.recycle(params.particle_count, rng);

    let beams = light_beams(&params, time, canvas_size);

    Scene {
        canvas_size,
        time,
        params,
        glows,
        rings,
        sprites,
        beams,
        caption: caption(reading),
        label: String::new(),
    }
}

/// `T: 22.5°C  |  Lux: 400  |  dB: 35  |  Hum: 55%`
pub fn caption(reading: &RoomReading) -> String {
    format!(
        "T: {:.1}°C  |  Lux: {:.0}  |  dB: {:.0}  |  Hum: {:.0}%",
        reading.temperature, reading.light, reading.sound, reading.humidity
    )
}

fn glow_circles(params: &VisualParams, time: f64, canvas_size: f64) -> Vec<GlowCircle> {
    let glow = params.glow_radius;
    if !glow.is_finite() || glow <= 0.0 {
        return Vec::new();
    }
    let pulse = params.pulse_amount(time);

    // 超出画布对角线的圆不可见；极端光照值时直接从可见范围开始，
    // 并按步数而不是半径终止，半径极大时减去步长不会改变浮点值
    let reach = canvas_size * std::f64::consts::SQRT_2 / 2.0 + pulse.abs() * LAYERS as f64;
    let skipped = ((glow - reach) / GLOW_STEP).ceil().max(0.0);
    let steps = (reach / GLOW_STEP).ceil() as usize + 1;

    let mut circles = Vec::new();
    for layer in 0..LAYERS {
        let offset = layer as f64 * LAYER_HUE_OFFSET;
        for step in 0..steps {
            let r = glow - (skipped + step as f64) * GLOW_STEP;
            if r <= 0.0 {
                break;
            }
            let hue = (params.hue + offset + (time + r * 0.02).sin() * 15.0).rem_euclid(360.0);
            let brightness = map_range(r, glow, 0.0, 90.0, 0.0);
            let alpha = map_range(r, glow, 0.0, 80.0, 0.0);
            circles.push(GlowCircle {
                radius: (r + pulse * (layer + 1) as f64).abs(),
                color: Hsba::new(hue, 80.0, brightness, alpha),
            });
        }
    }
    circles
}

fn humidity_rings<R: Rng + ?Sized>(
    params: &VisualParams,
    time: f64,
    canvas_size: f64,
    rng: &mut R,
) -> Vec<HumidityRing> {
    let count = params.ring_count;
    let mut rings = Vec::with_capacity(count.saturating_mul(LAYERS));
    for layer in 0..LAYERS {
        let layer_f = layer as f64;
        let color = Hsba::new(
            (params.hue + layer_f * LAYER_HUE_OFFSET) % 360.0,
            40.0,
            90.0,
            30.0,
        );
        for i in 1..=count {
            let i_f = i as f64;
            let radius = i_f * (canvas_size * RING_SPAN) / count as f64;
            let wobble = (time * (1.5 + layer_f * 0.5) + i_f * 0.5).sin() * 8.0;
            rings.push(HumidityRing {
                radius: (radius + wobble).abs(),
                rotation: time * (0.3 + i_f * 0.15 + layer_f * 0.1),
                stroke_weight: rng.random_range(0.5..3.0),
                color,
            });
        }
    }
    rings
}

fn light_beams(params: &VisualParams, time: f64, canvas_size: f64) -> Vec<Beam> {
    let count = params.beam_count;
    let center = canvas_size / 2.0;
    let len = canvas_size * BEAM_SPAN;
    let color = Hsba::new(params.hue, 70.0, 90.0, 30.0);

    (0..count)
        .map(|i| {
            let angle = TAU / count as f64 * i as f64 + time * 0.5;
            Beam {
                x1: center + angle.cos() * len * 0.2,
                y1: center + angle.sin() * len * 0.2,
                x2: center + angle.cos() * len,
                y2: center + angle.sin() * len,
                weight: params.beam_weight,
                color,
            }
        })
        .collect()
}
