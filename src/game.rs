//! Frame driver
//!
//! `Game` runs one simulation tick per display frame, forwards the tick's
//! events to audio and the log, and draws the result. The host keeps calling
//! `frame` until it reports `FrameStatus::Ended`.

use glam::Vec2;

use crate::audio::Sound;
use crate::input::InputSource;
use crate::renderer::{DrawSurface, draw_state};
use crate::sim::{GameEvent, GameState, Outcome, TickInput, tick};

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Running,
    Ended(Outcome),
}

/// Game instance holding the simulation and its sound
pub struct Game<S: Sound> {
    state: GameState,
    shoot_sound: S,
}

impl<S: Sound> Game<S> {
    pub fn new(seed: u64, stage: Vec2, shoot_sound: S) -> Self {
        log::info!("Game initialized with seed: {seed}");
        Self {
            state: GameState::new(seed, stage),
            shoot_sound,
        }
    }

    /// Wrap an existing state (scenario setups, tests)
    pub fn from_state(state: GameState, shoot_sound: S) -> Self {
        Self { state, shoot_sound }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Sample input, advance one frame and draw it
    pub fn frame(
        &mut self,
        source: &impl InputSource,
        now_ms: f64,
        surface: &mut impl DrawSurface,
    ) -> FrameStatus {
        let input = TickInput::sample(source, now_ms);
        self.step(&input, surface)
    }

    /// Advance one frame with pre-sampled input and draw it
    pub fn step(&mut self, input: &TickInput, surface: &mut impl DrawSurface) -> FrameStatus {
        let was_over = self.state.is_over();
        tick(&mut self.state, input);
        let frame = self.state.frame;

        for event in self.state.drain_events() {
            match event {
                GameEvent::PlayerFired => self.shoot_sound.restart(),
                GameEvent::InvaderFired { id } => log::trace!("Invader {id} fired"),
                GameEvent::InvaderDestroyed { id } => log::debug!("Invader {id} destroyed"),
                GameEvent::PlayerDestroyed { id } => log::info!("Player {id} destroyed"),
                GameEvent::Ended(outcome) => {
                    log::info!("Game ended ({outcome}) on frame {frame}")
                }
            }
        }

        // The final frame is still drawn; nothing after it
        if !was_over {
            draw_state(&self.state, surface);
        }

        match self.state.outcome() {
            Some(outcome) => FrameStatus::Ended(outcome),
            None => FrameStatus::Running,
        }
    }
}
