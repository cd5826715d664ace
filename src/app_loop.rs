//! 帧循环
//!
//! 每一帧：计算距上一帧的时长，合成并绘制场景，然后在剩余的帧时间内处理
//! 输入。输入轮询的超时同时起到限制帧率的作用。

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clock::Clock;
use crate::input::{InputEvent, InputSource, PortraitAction, key_to_action};
use crate::portrait::Portrait;
use crate::renderer::Renderer;

/// Main frame loop
pub struct PortraitLoop<R: Renderer, I: InputSource, C: Clock> {
    pub portrait: Portrait,
    pub renderer: R,
    pub input_source: I,
    pub clock: C,
    pub is_running: bool,
    rng: StdRng,
    last_frame: Option<Instant>,
    frame_count: u64,
}

impl<R: Renderer, I: InputSource, C: Clock> PortraitLoop<R, I, C> {
    pub fn new(portrait: Portrait, renderer: R, input_source: I, clock: C) -> Self {
        Self::with_rng(portrait, renderer, input_source, clock, StdRng::from_os_rng())
    }

    /// 使用固定种子，便于复现
    pub fn with_seed(portrait: Portrait, renderer: R, input_source: I, clock: C, seed: u64) -> Self {
        Self::with_rng(portrait, renderer, input_source, clock, StdRng::seed_from_u64(seed))
    }

    fn with_rng(portrait: Portrait, renderer: R, input_source: I, clock: C, rng: StdRng) -> Self {
        Self {
            portrait,
            renderer,
            input_source,
            clock,
            is_running: true,
            rng,
            last_frame: None,
            frame_count: 0,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Runs until a quit action; the renderer is cleaned up on every exit
    /// path.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.renderer.init()?;
        let result = self.run_frames();
        self.renderer.cleanup()?;
        result
    }

    fn run_frames(&mut self) -> anyhow::Result<()> {
        while self.is_running {
            let start = self.clock.now();
            self.render_frame(start)?;

            let deadline = start + self.clock.tick_rate();
            self.handle_input(deadline)?;

            let left = deadline.saturating_duration_since(self.clock.now());
            if self.is_running && !left.is_zero() {
                self.clock.sleep(left);
            }
        }
        log::info!("Portrait loop stopped after {} frames", self.frame_count);
        Ok(())
    }

    /// Composes and draws one frame started at `start`.
    pub fn render_frame(&mut self, start: Instant) -> anyhow::Result<()> {
        let dt = self
            .last_frame
            .map(|last| start.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_frame = Some(start);

        let scene = self.portrait.frame(dt, &mut self.rng);
        self.renderer.draw(scene.as_ref())?;
        self.frame_count += 1;
        Ok(())
    }

    /// 在截止时间前处理输入；至少轮询一次
    fn handle_input(&mut self, deadline: Instant) -> anyhow::Result<()> {
        let mut timeout = deadline.saturating_duration_since(self.clock.now());
        loop {
            match self.input_source.poll(timeout)? {
                Some(event) => self.apply_event(event)?,
                None => break,
            }
            if !self.is_running {
                break;
            }
            timeout = deadline.saturating_duration_since(self.clock.now());
            if timeout.is_zero() {
                break;
            }
        }
        Ok(())
    }

    pub fn apply_event(&mut self, event: InputEvent) -> anyhow::Result<()> {
        match event {
            InputEvent::Key(key) => {
                if let Some(action) = key_to_action(&key) {
                    self.apply_action(action);
                }
            }
            InputEvent::Resize(width, height) => self.renderer.resize(width, height)?,
            InputEvent::Ignored => {}
        }
        Ok(())
    }

    pub fn apply_action(&mut self, action: PortraitAction) {
        match action {
            PortraitAction::NextRoom => self.portrait.next_room(),
            PortraitAction::PreviousRoom => self.portrait.previous_room(),
            PortraitAction::FirstRoom => self.portrait.first_room(),
            PortraitAction::LastRoom => self.portrait.last_room(),
            PortraitAction::Quit => self.is_running = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::test_helpers::MockClock;
    use crate::config::PortraitConfig;
    use crate::input::test_helpers::ScriptedInput;
    use crate::input::{KeyCode, KeyEvent};
    use crate::renderer::test_helpers::RecordingRenderer;
    use pretty_assertions::assert_eq;
    use rooms::{RoomCatalog, RoomReading};

    const TICK: Duration = Duration::from_millis(16);

    fn portrait(n: usize) -> Portrait {
        let rooms = (0..n)
            .map(|i| RoomReading::new(18.0 + i as f64, 250.0, 25.0, 45.0))
            .collect();
        Portrait::new(RoomCatalog::new(rooms), &PortraitConfig::default())
    }

    fn game_loop(
        portrait: Portrait,
        input: ScriptedInput,
    ) -> PortraitLoop<RecordingRenderer, ScriptedInput, MockClock> {
        PortraitLoop::with_seed(
            portrait,
            RecordingRenderer::default(),
            input,
            MockClock::new(TICK),
            42,
        )
    }

    fn label(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_navigation_sequence() {
        let input = ScriptedInput::new([
            InputEvent::Key(KeyEvent::new(KeyCode::Right)),
            InputEvent::Ignored,
            InputEvent::Key(KeyEvent::new(KeyCode::Left)),
            InputEvent::Key(KeyEvent::new(KeyCode::Left)),
        ]);
        let mut game_loop = game_loop(portrait(3), input);

        game_loop.run().unwrap();

        let renderer = &game_loop.renderer;
        assert!(renderer.initialized);
        assert!(renderer.cleaned_up);
        assert_eq!(
            renderer.labels,
            vec![
                label("Room 1/3"),
                label("Room 2/3"),
                label("Room 2/3"),
                label("Room 1/3"),
                label("Room 3/3"),
            ]
        );
        // 切换房间后时间归零，停留时继续累加
        assert_eq!(renderer.times[0], 0.0);
        assert_eq!(renderer.times[1], 0.0);
        assert!(renderer.times[2] > 0.0);
        assert_eq!(renderer.times[3], 0.0);
        assert_eq!(game_loop.frame_count(), 5);
        assert!(!game_loop.is_running);
    }

    #[test]
    fn test_wraparound_through_loop() {
        let input = ScriptedInput::keys([KeyCode::Left, KeyCode::Right, KeyCode::Right]);
        let mut game_loop = game_loop(portrait(2), input);
        game_loop.run().unwrap();
        assert_eq!(
            game_loop.renderer.labels,
            vec![
                label("Room 1/2"),
                label("Room 2/2"),
                label("Room 1/2"),
                label("Room 2/2"),
            ]
        );
    }

    #[test]
    fn test_resize_is_forwarded() {
        let input = ScriptedInput::new([InputEvent::Resize(120, 40)]);
        let mut game_loop = game_loop(portrait(1), input);
        game_loop.run().unwrap();
        assert_eq!(game_loop.renderer.resizes, vec![(120, 40)]);
    }

    #[test]
    fn test_empty_catalog_draws_without_scene() {
        let empty = Portrait::new(RoomCatalog::default(), &PortraitConfig::default());
        let input = ScriptedInput::keys([KeyCode::Right, KeyCode::Home]);
        let mut game_loop = game_loop(empty, input);
        game_loop.run().unwrap();
        assert_eq!(game_loop.renderer.labels, vec![None, None, None]);
        assert!(game_loop.renderer.times.is_empty());
    }

    #[test]
    fn test_quit_action_stops_loop() {
        let mut game_loop = game_loop(portrait(2), ScriptedInput::default());
        game_loop.apply_action(PortraitAction::Quit);
        assert!(!game_loop.is_running);
    }

    #[test]
    fn test_time_accumulates_across_frames() {
        let mut game_loop = game_loop(portrait(1), ScriptedInput::default());
        let start = Instant::now();
        for i in 0..4 {
            game_loop.render_frame(start + TICK * i).unwrap();
        }
        let times = &game_loop.renderer.times;
        assert_eq!(times.len(), 4);
        // 第 n 帧在合成之后才累加本帧时长
        assert_eq!(times[0], 0.0);
        assert!((times[3] - 0.032).abs() < 1e-9);
    }
}
