//! 数据到视觉参数的映射
//!
//! 每个读数通过线性映射转换到一个视觉范围。映射不做截断，超出数据范围的
//! 值会外推；只有计数类参数会向下取整，并限制在 0 到各自的上限之间。

use rooms::RoomReading;

/// 温度范围（°C）映射到色相 200 → 0
pub const TEMPERATURE_DOMAIN: (f64, f64) = (15.0, 35.0);
pub const HUE_RANGE: (f64, f64) = (200.0, 0.0);
/// 光照范围（lux）
pub const LIGHT_DOMAIN: (f64, f64) = (100.0, 800.0);
/// 声音范围（dB）
pub const SOUND_DOMAIN: (f64, f64) = (10.0, 60.0);
/// 湿度范围（%）
pub const HUMIDITY_DOMAIN: (f64, f64) = (20.0, 100.0);

pub const GLOW_MIN_RADIUS: f64 = 50.0;
pub const GLOW_MAX_FRACTION: f64 = 0.8;
pub const PULSE_SPEED_RANGE: (f64, f64) = (0.5, 3.0);
pub const PULSE_AMPLITUDE: f64 = 30.0;
pub const RING_COUNT_RANGE: (f64, f64) = (3.0, 15.0);
pub const PARTICLE_COUNT_RANGE: (f64, f64) = (50.0, 200.0);
pub const PARTICLE_SPEED_RANGE: (f64, f64) = (0.3, 3.0);
pub const BEAM_COUNT_RANGE: (f64, f64) = (3.0, 8.0);
pub const BEAM_WEIGHT_RANGE: (f64, f64) = (1.0, 4.0);

/// 每层湿度环数量上限
pub const MAX_RING_COUNT: usize = 60;
/// 光束数量上限
pub const MAX_BEAM_COUNT: usize = 64;

/// Re-maps `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Unclamped: values outside the input range extrapolate linearly.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

fn map_between(value: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    map_range(value, domain.0, domain.1, range.0, range.1)
}

/// Floors a mapped value into a count in `[0, max]`.
fn to_count(value: f64, max: usize) -> usize {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        // `as` 饱和转换，+inf 得到 usize::MAX
        (value.floor() as usize).min(max)
    }
}

/// 单个房间的全部视觉参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualParams {
    /// 色相，[0, 360)
    pub hue: f64,
    pub glow_radius: f64,
    pub pulse_speed: f64,
    pub ring_count: usize,
    pub particle_count: usize,
    pub particle_speed: f64,
    pub beam_count: usize,
    pub beam_weight: f64,
}

impl VisualParams {
    /// Maps a reading onto a square canvas `canvas_size` units wide.
    pub fn from_reading(reading: &RoomReading, canvas_size: f64) -> Self {
        let hue = map_between(reading.temperature, TEMPERATURE_DOMAIN, HUE_RANGE).rem_euclid(360.0);

        Self {
            hue,
            glow_radius: map_between(
                reading.light,
                LIGHT_DOMAIN,
                (GLOW_MIN_RADIUS, canvas_size * GLOW_MAX_FRACTION),
            ),
            pulse_speed: map_between(reading.sound, SOUND_DOMAIN, PULSE_SPEED_RANGE),
            ring_count: to_count(
                map_between(reading.humidity, HUMIDITY_DOMAIN, RING_COUNT_RANGE),
                MAX_RING_COUNT,
            ),
            // 粒子数量由 ParticleField 的 max_particles 限制
            particle_count: to_count(
                map_between(reading.sound, SOUND_DOMAIN, PARTICLE_COUNT_RANGE),
                usize::MAX,
            ),
            particle_speed: map_between(reading.sound, SOUND_DOMAIN, PARTICLE_SPEED_RANGE),
            beam_count: to_count(
                map_between(reading.light, LIGHT_DOMAIN, BEAM_COUNT_RANGE),
                MAX_BEAM_COUNT,
            ),
            beam_weight: map_between(reading.light, LIGHT_DOMAIN, BEAM_WEIGHT_RANGE),
        }
    }

    /// Glow pulse offset at animation time `time`.
    pub fn pulse_amount(&self, time: f64) -> f64 {
        (time * self.pulse_speed).sin() * PULSE_AMPLITUDE
    }
}
