//! HSB 颜色
//!
//! 色相 0–360，饱和度、亮度和透明度 0–100。终端单元格无法混合颜色，
//! 所以透明度通过与背景色预先合成来表现。

/// Background of the portrait canvas.
pub const BACKGROUND: Rgb = Rgb(18, 18, 18);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsba {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub alpha: f64,
}

impl Hsba {
    pub fn new(hue: f64, saturation: f64, brightness: f64, alpha: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
            alpha,
        }
    }

    /// Opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        unit(self.alpha)
    }

    /// Opaque colour, ignoring alpha.
    pub fn to_rgb(&self) -> Rgb {
        let [r, g, b] = self.channels();
        Rgb(to_byte(r), to_byte(g), to_byte(b))
    }

    /// Composites the colour over `background` using its alpha.
    pub fn over(&self, background: Rgb) -> Rgb {
        let a = self.opacity();
        let [r, g, b] = self.channels();
        let mix = |fg: f64, bg: u8| {
            let bg = bg as f64 / 255.0;
            to_byte(bg + (fg - bg) * a)
        };
        Rgb(mix(r, background.0), mix(g, background.1), mix(b, background.2))
    }

    fn channels(&self) -> [f64; 3] {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = unit(self.saturation);
        let v = unit(self.brightness);

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        [r + m, g + m, b + m]
    }
}

/// 0–100 刻度转换到 [0, 1] 并截断
fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        (value / 100.0).clamp(0.0, 1.0)
    }
}

fn to_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
