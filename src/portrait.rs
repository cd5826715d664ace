//! 肖像状态
//!
//! 一个数据数组、一个索引、一个动画时钟和一个粒子列表。切换房间会把
//! 时钟归零并清空粒子。

use std::time::Duration;

use rand::Rng;
use rooms::{RoomCatalog, RoomReading};

use crate::clock::AnimationClock;
use crate::config::PortraitConfig;
use crate::particles::ParticleField;
use crate::scene::{Scene, compose};

pub struct Portrait {
    catalog: RoomCatalog,
    clock: AnimationClock,
    particles: ParticleField,
    canvas_size: f64,
}

impl Portrait {
    pub fn new(catalog: RoomCatalog, config: &PortraitConfig) -> Self {
        Self {
            catalog,
            clock: AnimationClock::new(),
            particles: ParticleField::new(
                config.canvas_size,
                config.special_chance,
                config.max_particles,
            ),
            canvas_size: config.canvas_size,
        }
    }

    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn has_data(&self) -> bool {
        !self.catalog.is_empty()
    }

    pub fn current_room(&self) -> Option<&RoomReading> {
        self.catalog.current()
    }

    pub fn next_room(&mut self) {
        if self.catalog.next().is_some() {
            self.restart();
        }
    }

    pub fn previous_room(&mut self) {
        if self.catalog.previous().is_some() {
            self.restart();
        }
    }

    pub fn first_room(&mut self) {
        if self.catalog.first().is_some() {
            self.restart();
        }
    }

    pub fn last_room(&mut self) {
        if self.catalog.last().is_some() {
            self.restart();
        }
    }

    /// "Room 2/5" plus the room name when the data has one.
    pub fn label(&self) -> String {
        let position = format!("Room {}/{}", self.catalog.position() + 1, self.catalog.len());
        match self.current_room().and_then(|r| r.name.as_deref()) {
            Some(name) => format!("{} · {}", position, name),
            None => position,
        }
    }

    /// Composes the frame at the current time, then advances the clock by
    /// `dt`. Returns `None` while no room data is loaded.
    pub fn frame<R: Rng + ?Sized>(&mut self, dt: Duration, rng: &mut R) -> Option<Scene> {
        let reading = self.catalog.current()?;
        let mut scene = compose(
            reading,
            self.clock.elapsed(),
            &mut self.particles,
            self.canvas_size,
            rng,
        );
        scene.label = self.label();
        self.clock.advance(dt);
        Some(scene)
    }

    fn restart(&mut self) {
        self.clock.reset();
        self.particles.clear();
        log::debug!("Switched to {}", self.label());
    }
}
