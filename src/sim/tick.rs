//! Per-frame simulation tick
//!
//! One call advances the game by exactly one frame:
//! collisions, edge tracking and patrol, game-over check, entity updates,
//! win check.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::entity::{EntityId, FrameContext, FrameOutput};
use super::state::{GameState, Outcome};
use crate::input::{InputSource, LogicalKey};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Frame timestamp (milliseconds, monotonic)
    pub now_ms: f64,
}

impl TickInput {
    /// Snapshot the held keys once for this frame
    pub fn sample(source: &impl InputSource, now_ms: f64) -> Self {
        Self {
            left: source.is_held(LogicalKey::Left),
            right: source.is_held(LogicalKey::Right),
            fire: source.is_held(LogicalKey::Fire),
            now_ms,
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_over() {
        return;
    }
    state.frame += 1;

    // Remove everything that collided or left the stage
    let destroyed = resolve_collisions(&mut state.registry, state.stage);
    state.events.extend(destroyed);

    // Turn the patrol around before anyone moves
    state.patrol.track_edges(&state.registry);
    if state.patrol.update_dir(&state.registry, state.stage) {
        log::trace!("Patrol reversed to {} on frame {}", state.patrol.dir, state.frame);
    }

    if state.registry.count_players() == 0 {
        state.end(Outcome::GameOver);
        return;
    }

    let invaders: Vec<(EntityId, Vec2)> = state
        .registry
        .iter()
        .filter(|e| e.is_invader())
        .map(|e| (e.id, e.center))
        .collect();
    let ctx = FrameContext {
        stage: state.stage,
        patrol_dir: state.patrol.dir,
        input,
        invaders: &invaders,
    };

    let mut out = FrameOutput::default();
    for entity in state.registry.iter_mut() {
        entity.update(&ctx, &mut state.rng, &mut out);
    }

    for entity in out.spawned {
        state.registry.add(entity);
    }
    state.registry.commit();
    state.events.extend(out.events);

    if state.registry.count_invaders() == 0 {
        state.end(Outcome::YouWin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::{Entity, EntityKind, GameEvent, GamePhase};

    const STAGE: Vec2 = Vec2::new(300.0, 300.0);

    fn input_at(frame: u64) -> TickInput {
        TickInput {
            now_ms: frame as f64 * FRAME_MS,
            ..Default::default()
        }
    }

    #[test]
    fn test_patrol_flips_before_invader_update() {
        let mut state = GameState::empty(5, STAGE);
        let invader = state.spawn(Entity::invader(Vec2::new(29.0, 50.0)));
        state.spawn(Entity::player(STAGE));
        state.registry.commit();
        assert_eq!(state.patrol.dir, 1.0);

        tick(&mut state, &input_at(1));
        assert_eq!(state.patrol.dir, -1.0);

        // The invader saw the new direction during its own update
        let invader = state.registry.get(invader).unwrap();
        assert_eq!(invader.center.y, 60.0);
        assert!((invader.center.x - 28.7).abs() < 1e-4);
        let EntityKind::Invader(ref patrol) = invader.kind else {
            panic!("expected an invader");
        };
        assert!(patrol.speed.x < 0.0);
    }

    #[test]
    fn test_game_over_suppresses_updates() {
        let mut state = GameState::empty(5, STAGE);
        let invader = state.spawn(Entity::invader(Vec2::new(100.0, 50.0)));
        state.spawn(Entity::player(STAGE));
        // Enemy bullet already overlapping the player
        state.spawn(Entity::bullet(
            Vec2::new(150.0, 280.0),
            Vec2::splat(3.0),
            Vec2::new(0.0, 2.0),
        ));
        state.registry.commit();

        tick(&mut state, &input_at(1));

        assert_eq!(state.phase, GamePhase::Ended(Outcome::GameOver));
        // Update pass skipped: the invader did not drift
        assert_eq!(state.registry.get(invader).unwrap().center.x, 100.0);
        let events: Vec<_> = state.drain_events().collect();
        assert!(events.contains(&GameEvent::Ended(Outcome::GameOver)));
        assert!(events.iter().any(|e| matches!(e, GameEvent::PlayerDestroyed { .. })));

        // Terminal: further ticks change nothing
        let frame = state.frame;
        tick(&mut state, &input_at(2));
        assert_eq!(state.frame, frame);
        assert_eq!(state.registry.get(invader).unwrap().center.x, 100.0);
    }

    #[test]
    fn test_win_detected_same_frame() {
        let mut state = GameState::empty(5, STAGE);
        state.spawn(Entity::invader(Vec2::new(100.0, 50.0)));
        state.spawn(Entity::bullet(Vec2::new(100.0, 52.0), Vec2::splat(3.0), Vec2::ZERO));
        state.spawn(Entity::player(STAGE));
        state.registry.commit();

        tick(&mut state, &input_at(1));
        assert_eq!(state.outcome(), Some(Outcome::YouWin));
        // Remaining entities are left in place
        assert_eq!(state.registry.count_players(), 1);
    }

    #[test]
    fn test_game_over_wins_over_you_win() {
        let mut state = GameState::empty(5, STAGE);
        state.spawn(Entity::invader(Vec2::new(100.0, 50.0)));
        state.spawn(Entity::bullet(Vec2::new(100.0, 52.0), Vec2::splat(3.0), Vec2::ZERO));
        state.spawn(Entity::player(STAGE));
        state.spawn(Entity::bullet(Vec2::new(150.0, 280.0), Vec2::splat(3.0), Vec2::ZERO));
        state.registry.commit();

        tick(&mut state, &input_at(1));
        assert_eq!(state.outcome(), Some(Outcome::GameOver));
    }

    #[test]
    fn test_player_bullet_spawned_after_pass() {
        let mut state = GameState::standard(7);
        let before = state.registry.len();

        let input = TickInput {
            fire: true,
            now_ms: 0.0,
            ..Default::default()
        };
        tick(&mut state, &input);

        let bullets: Vec<_> = state
            .registry
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Bullet { speed } if speed.y < 0.0))
            .collect();
        assert_eq!(bullets.len(), 1);
        // Spawned this frame, not yet moved
        assert_eq!(bullets[0].center, Vec2::new(150.0, 270.0));
        assert!(state.registry.len() > before);
        assert!(state.drain_events().any(|e| e == GameEvent::PlayerFired));
    }

    #[test]
    fn test_bullet_leaves_stage() {
        let mut state = GameState::empty(5, STAGE);
        state.spawn(Entity::player(STAGE));
        state.spawn(Entity::invader(Vec2::new(100.0, 30.0)));
        let bullet = state.spawn(Entity::bullet(
            Vec2::new(200.0, 6.0),
            Vec2::new(3.0, 5.0),
            Vec2::new(0.0, -6.0),
        ));
        state.registry.commit();

        // Moves to y = 0: still on stage
        tick(&mut state, &input_at(1));
        assert_eq!(state.registry.get(bullet).unwrap().center.y, 0.0);

        // Moves to y = -6, removed by the next collision pass
        tick(&mut state, &input_at(2));
        assert!(state.registry.get(bullet).is_some());
        tick(&mut state, &input_at(3));
        assert!(state.registry.get(bullet).is_none());
    }

    #[test]
    fn test_player_walks_left() {
        let mut state = GameState::empty(5, STAGE);
        let player = state.spawn(Entity::player(STAGE));
        state.spawn(Entity::invader(Vec2::new(100.0, 30.0)));
        state.registry.commit();

        for frame in 1..=10 {
            let input = TickInput {
                left: true,
                ..input_at(frame)
            };
            tick(&mut state, &input);
        }
        assert_eq!(state.registry.get(player).unwrap().center.x, 130.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::standard(99999);
        let mut state2 = GameState::standard(99999);

        for frame in 1..=600 {
            let input = TickInput {
                fire: frame % 40 == 0,
                left: (frame / 100) % 2 == 0,
                right: (frame / 100) % 2 == 1,
                now_ms: frame as f64 * FRAME_MS,
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.registry.len(), state2.registry.len());
        let centers1: Vec<_> = state1.registry.iter().map(|e| e.center).collect();
        let centers2: Vec<_> = state2.registry.iter().map(|e| e.center).collect();
        assert_eq!(centers1, centers2);
    }

    #[test]
    fn test_invaders_stay_inside_stage_while_patrolling() {
        let mut state = GameState::empty(11, STAGE);
        for i in 0..8 {
            state.spawn(Entity::invader(Vec2::new(30.0 + i as f32 * 30.0, 30.0)));
        }
        state.spawn(Entity::player(STAGE));
        state.registry.commit();

        for frame in 1..=1000 {
            tick(&mut state, &input_at(frame));
            if state.is_over() {
                break;
            }
            for invader in state.registry.iter().filter(|e| e.is_invader()) {
                assert!(invader.center.x > 20.0 && invader.center.x < 290.0);
            }
        }
    }
}
