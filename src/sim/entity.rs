//! Entity data model
//!
//! Every simulated object is an `Entity`: a center point, a full size (the
//! collision box extends `size / 2` either side of the center) and a tagged
//! `EntityKind` carrying the variant-specific state.

use glam::Vec2;
use rand::Rng;

use super::state::GameEvent;
use super::tick::TickInput;
use crate::consts::*;

/// Registry-assigned identifier, used for lookups that must not own the entity
pub type EntityId = u32;

/// Read-only view of the world handed to every entity during the update pass
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Stage dimensions (pixels)
    pub stage: Vec2,
    /// Shared horizontal direction of the invader group (+1 right, -1 left)
    pub patrol_dir: f32,
    /// Input sampled once for this frame
    pub input: &'a TickInput,
    /// Invader positions at the start of the update pass
    pub invaders: &'a [(EntityId, Vec2)],
}

impl FrameContext<'_> {
    /// True if another invader sits below `center` within `width` horizontally
    pub fn has_invader_below(&self, id: EntityId, center: Vec2, width: f32) -> bool {
        self.invaders.iter().any(|&(other, pos)| {
            other != id && pos.y > center.y && (pos.x - center.x).abs() < width
        })
    }
}

/// Side effects produced by entities during one update pass
#[derive(Debug, Default)]
pub struct FrameOutput {
    /// New entities, added to the registry after the pass
    pub spawned: Vec<Entity>,
    pub events: Vec<GameEvent>,
}

/// Player cannon state
#[derive(Debug, Clone)]
pub struct Player {
    /// Horizontal pixels per frame
    pub speed: f32,
    /// Cooldown between shots (milliseconds)
    pub fire_rate_ms: f64,
    pub can_fire: bool,
    /// Frame timestamp at which firing is re-enabled
    pub reload_at: Option<f64>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            fire_rate_ms: PLAYER_FIRE_RATE_MS,
            can_fire: true,
            reload_at: None,
        }
    }
}

impl Player {
    fn update(&mut self, center: &mut Vec2, size: Vec2, ctx: &FrameContext, out: &mut FrameOutput) {
        let input = ctx.input;

        // The cooldown only lapses at a frame boundary
        if let Some(ready_at) = self.reload_at {
            if input.now_ms >= ready_at {
                self.can_fire = true;
                self.reload_at = None;
            }
        }

        let half_x = size.x / 2.0;
        if input.left {
            center.x = (center.x - self.speed).max(half_x);
        } else if input.right {
            center.x = (center.x + self.speed).min(ctx.stage.x - half_x);
        }

        if input.fire && self.can_fire {
            self.can_fire = false;
            self.reload_at = Some(input.now_ms + self.fire_rate_ms);

            out.spawned.push(Entity::bullet(
                Vec2::new(center.x, center.y - size.y),
                Vec2::new(BULLET_SIZE, PLAYER_BULLET_HEIGHT),
                Vec2::new(0.0, PLAYER_BULLET_SPEED),
            ));
            out.events.push(GameEvent::PlayerFired);
        }
    }
}

/// Invader patrol state
#[derive(Debug, Clone)]
pub struct Invader {
    /// x: lateral drift per frame, y: descent when the patrol turns
    pub speed: Vec2,
}

impl Default for Invader {
    fn default() -> Self {
        Self {
            speed: Vec2::new(INVADER_DRIFT, INVADER_DESCENT),
        }
    }
}

impl Invader {
    fn update(
        &mut self,
        id: EntityId,
        center: &mut Vec2,
        size: Vec2,
        ctx: &FrameContext,
        rng: &mut impl Rng,
        out: &mut FrameOutput,
    ) {
        // The invader snapshot was taken before anyone moved
        let start = *center;

        // Patrol turned around: drop a row and follow it
        if self.speed.x.signum() != ctx.patrol_dir.signum() {
            center.y += self.speed.y;
            self.speed.x = -self.speed.x;
        }
        center.x += self.speed.x;

        if rng.random_bool(INVADER_FIRE_CHANCE) && !ctx.has_invader_below(id, start, size.x) {
            let drift = rng.random::<f32>() - 0.5;
            out.spawned.push(Entity::bullet(
                Vec2::new(center.x, center.y + size.y),
                Vec2::splat(BULLET_SIZE),
                Vec2::new(drift, INVADER_BULLET_SPEED),
            ));
            out.events.push(GameEvent::InvaderFired { id });
        }
    }
}

/// Entity variants
#[derive(Debug, Clone)]
pub enum EntityKind {
    Player(Player),
    Invader(Invader),
    /// Linear projectile; leaving the stage is handled by the collision pass
    Bullet { speed: Vec2 },
    /// Static piece of a shield
    ShieldBit,
}

/// A simulated object
#[derive(Debug, Clone)]
pub struct Entity {
    /// Assigned by `Registry::add`
    pub id: EntityId,
    pub center: Vec2,
    /// Full extents of the collision box
    pub size: Vec2,
    /// Set once when the entity is destroyed
    pub deleted: bool,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(center: Vec2, size: Vec2, kind: EntityKind) -> Self {
        assert!(
            size.x > 0.0 && size.y > 0.0,
            "entity size must be positive, got {size}"
        );
        Self {
            id: 0,
            center,
            size,
            deleted: false,
            kind,
        }
    }

    /// Player cannon centered at the bottom of the stage
    pub fn player(stage: Vec2) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        Self::new(
            Vec2::new(stage.x / 2.0, stage.y - size.y),
            size,
            EntityKind::Player(Player::default()),
        )
    }

    pub fn invader(center: Vec2) -> Self {
        Self::new(
            center,
            Vec2::splat(INVADER_SIZE),
            EntityKind::Invader(Invader::default()),
        )
    }

    pub fn bullet(center: Vec2, size: Vec2, speed: Vec2) -> Self {
        Self::new(center, size, EntityKind::Bullet { speed })
    }

    pub fn shield_bit(center: Vec2) -> Self {
        Self::new(center, Vec2::splat(SHIELD_BIT_SIZE), EntityKind::ShieldBit)
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    #[inline]
    pub fn is_invader(&self) -> bool {
        matches!(self.kind, EntityKind::Invader(_))
    }

    /// Half extents of the collision box
    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Advance this entity by one frame
    pub fn update(&mut self, ctx: &FrameContext, rng: &mut impl Rng, out: &mut FrameOutput) {
        let Self {
            id,
            center,
            size,
            kind,
            ..
        } = self;

        match kind {
            EntityKind::Player(player) => player.update(center, *size, ctx, out),
            EntityKind::Invader(invader) => invader.update(*id, center, *size, ctx, rng, out),
            EntityKind::Bullet { speed } => *center += *speed,
            EntityKind::ShieldBit => {}
        }
    }

    /// Destroy hook. Runs at most once; later calls return `None`.
    pub fn destroy(&mut self) -> Option<GameEvent> {
        if self.deleted {
            return None;
        }
        self.deleted = true;

        match self.kind {
            EntityKind::Player(_) => Some(GameEvent::PlayerDestroyed { id: self.id }),
            EntityKind::Invader(_) => Some(GameEvent::InvaderDestroyed { id: self.id }),
            EntityKind::Bullet { .. } | EntityKind::ShieldBit => None,
        }
    }
}
