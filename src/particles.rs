//! 环境粒子
//!
//! 粒子绕画布中心旋转并在半径方向上振荡，生命值逐帧递减，低于零时被移除，
//! 随后补充新粒子直到达到目标数量。

use std::f64::consts::TAU;

use rand::Rng;

/// 新粒子的初始生命值
pub const FULL_LIFE: f64 = 255.0;
/// Default probability that a new particle is special.
pub const SPECIAL_CHANCE: f64 = 0.3;

/// 每帧角度增量系数
const ANGULAR_STEP: f64 = 0.005;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub angle: f64,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// 剩余生命值，0–255
    pub life: f64,
    pub speed: f64,
    pub oscillation: f64,
    /// 特殊粒子：双层圆点，寿命加倍
    pub special: bool,
}

impl Particle {
    /// Spawns a particle somewhere on the ring band of a canvas
    /// `canvas_size` units wide.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, special: bool, canvas_size: f64) -> Self {
        let angle = rng.random_range(0.0..TAU);
        let radius = rng.random_range(canvas_size * 0.05..canvas_size * 0.4);
        let size = if special {
            rng.random_range(4.0..12.0)
        } else {
            rng.random_range(2.0..6.0)
        };

        let mut particle = Self {
            angle,
            radius,
            x: 0.0,
            y: 0.0,
            size,
            life: FULL_LIFE,
            speed: rng.random_range(0.5..2.0),
            oscillation: rng.random_range(2.0..8.0),
            special,
        };
        particle.place(canvas_size / 2.0);
        particle
    }

    /// 推进一帧
    pub fn update(&mut self, base_speed: f64, time: f64, center: f64) {
        self.angle += ANGULAR_STEP * base_speed * self.speed;
        self.radius += (time + self.angle).sin() * self.oscillation;
        self.place(center);
        self.life -= if self.special { 0.5 } else { 1.0 };
    }

    pub fn is_dead(&self) -> bool {
        self.life < 0.0
    }

    /// Life as seen by the renderer; never negative.
    pub fn visible_life(&self) -> f64 {
        self.life.max(0.0)
    }

    fn place(&mut self, center: f64) {
        self.x = center + self.angle.cos() * self.radius;
        self.y = center + self.angle.sin() * self.radius;
    }
}

/// Bounded particle population with birth/death recycling.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    canvas_size: f64,
    special_chance: f64,
    max_particles: usize,
}

impl ParticleField {
    pub fn new(canvas_size: f64, special_chance: f64, max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            canvas_size,
            special_chance: special_chance.clamp(0.0, 1.0),
            max_particles,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Updates every particle by one frame and returns the pool for
    /// drawing. Particles that just died are still included; call
    /// [`recycle`](Self::recycle) once they have been drawn.
    pub fn advance(&mut self, base_speed: f64, time: f64) -> &[Particle] {
        let center = self.canvas_size / 2.0;
        for particle in &mut self.particles {
            particle.update(base_speed, time, center);
        }
        &self.particles
    }

    /// Removes the dead and spawns fresh particles until the population
    /// reaches `target` (capped by `max_particles`). Fresh particles are
    /// first drawn on the next frame.
    pub fn recycle<R: Rng + ?Sized>(&mut self, target: usize, rng: &mut R) {
        self.particles.retain(|p| !p.is_dead());
        self.replenish(target, rng);
    }

    /// 补充粒子直到达到目标数量
    pub fn replenish<R: Rng + ?Sized>(&mut self, target: usize, rng: &mut R) {
        let target = target.min(self.max_particles);
        while self.particles.len() < target {
            let special = rng.random_bool(self.special_chance);
            self.particles
                .push(Particle::spawn(rng, special, self.canvas_size));
        }
    }
}
