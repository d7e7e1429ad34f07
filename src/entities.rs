//! All game entity types — pure data, no logic.

use crate::config::Config;
use crate::scene::Scene;
use crate::wizard::Wizard;

#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    Fireball,
    Cloud,
    Bug,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    /// Waiting for the start control.
    Idle,
    Running,
    /// Terminal: the loop has been cancelled.
    Over,
}

/// Deferred one-shot state changes, checked once per frame until they complete.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingEffect {
    /// Leave the firing state once the fire key has been released.
    ClearFiringState,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

/// Axis-aligned rectangle in play-area pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, size: Size) -> Self {
        Rect {
            left: x,
            top: y,
            right: x + size.width,
            bottom: y + size.height,
        }
    }
}

// ── Scene entities ───────────────────────────────────────────────────

/// A fireball, cloud or bug. Only position and kind matter.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    pub kind: EntityKind,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Per-run bookkeeping, replaced wholesale every time a session starts.
#[derive(Clone, Debug, Default)]
pub struct GameSession {
    /// Id of the scheduled next frame; `None` once the loop is cancelled.
    pub loop_id: Option<u64>,
    pub next_render_queue: Vec<PendingEffect>,
    /// `None` until the first shot of the session.
    pub last_fireball_timestamp: Option<u64>,
    pub last_cloud_timestamp: u64,
    /// Interval before the next cloud, re-rolled with jitter at each spawn.
    pub cloud_interval: u64,
    pub last_bug_timestamp: u64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct EntireGameStateInfo {
    pub config: Config,
    pub wizard: Wizard,
    pub scene: Scene,
    pub session: GameSession,
    pub score: u64,
    pub status: GameStatus,
    /// Frames processed in the current session.
    pub frame: u64,
}
