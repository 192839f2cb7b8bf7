//! Game state and core simulation types

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};
use super::patrol::PatrolController;
use super::registry::Registry;
use super::shield::Shield;
use crate::consts::*;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Every player entity was destroyed
    GameOver,
    /// Every invader was destroyed
    YouWin,
}

impl Outcome {
    /// Id of the page element announcing this outcome
    pub fn element_id(&self) -> &'static str {
        match self {
            Outcome::GameOver => "game-over",
            Outcome::YouWin => "you-win",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Terminal; nothing changes after this
    Ended(Outcome),
}

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlayerFired,
    InvaderFired { id: EntityId },
    PlayerDestroyed { id: EntityId },
    InvaderDestroyed { id: EntityId },
    Ended(Outcome),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Stage dimensions (pixels)
    pub stage: Vec2,
    /// Simulation frame counter
    pub frame: u64,
    pub phase: GamePhase,
    pub registry: Registry,
    pub patrol: PatrolController,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an empty stage; used directly by tests to build scenarios
    pub fn empty(seed: u64, stage: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            stage,
            frame: 0,
            phase: GamePhase::Playing,
            registry: Registry::new(),
            patrol: PatrolController::default(),
            events: Vec::new(),
        }
    }

    /// Create a new game: invader grid, player, then shields
    pub fn new(seed: u64, stage: Vec2) -> Self {
        let mut state = Self::empty(seed, stage);

        for invader in invader_grid() {
            state.registry.add(invader);
        }
        state.registry.add(Entity::player(stage));
        for bit in shields(stage) {
            state.registry.add(bit);
        }
        state.registry.commit();

        log::debug!(
            "New game (seed {seed}): {} entities on a {}x{} stage",
            state.registry.len(),
            stage.x,
            stage.y
        );
        state
    }

    /// Create a new game on the standard stage
    pub fn standard(seed: u64) -> Self {
        Self::new(seed, Vec2::new(STAGE_WIDTH, STAGE_HEIGHT))
    }

    /// Add an entity; it becomes live at the end of the current pass
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        self.registry.add(entity)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Ended(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Playing => None,
            GamePhase::Ended(outcome) => Some(outcome),
        }
    }

    /// Enter the terminal phase. Only the first call has any effect.
    pub fn end(&mut self, outcome: Outcome) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::Ended(outcome);
        self.events.push(GameEvent::Ended(outcome));
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// The player entity, if it survives
    pub fn player(&self) -> Option<&Entity> {
        self.registry.iter().find(|e| e.is_player())
    }
}

/// 8 columns, rows staggered by column index
fn invader_grid() -> impl Iterator<Item = Entity> {
    (0..INVADER_COUNT).map(|i| {
        Entity::invader(Vec2::new(
            INVADER_SPACING + (i % INVADER_COLUMNS) as f32 * INVADER_SPACING,
            INVADER_SPACING + (i % INVADER_ROWS) as f32 * INVADER_SPACING,
        ))
    })
}

/// Three bunkers: left edge, middle, right edge of the stage
fn shields(stage: Vec2) -> impl Iterator<Item = Entity> {
    let y = stage.y - SHIELD_OFFSET_Y;
    (0..SHIELD_COUNT).flat_map(move |i| {
        let i = i as f32;
        let x = (60.0 - 60.0 * i) + (stage.x / 2.0) * i;
        Shield::new(Vec2::new(x, y)).into_bits()
    })
}
