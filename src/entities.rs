/// All game entity types — pure data, no logic.
///
/// World coordinates are floats with Y pointing up; the terminal layer maps
/// them onto cells.

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Apple,
    GoldenApple,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Score and lives for one run.  Only the basket logic in `compute::basket`
/// mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
    /// Best score seen since the process started.  Never written to disk.
    pub best_score: u32,
}

impl Session {
    pub fn new(starting_lives: u32, best_score: u32) -> Self {
        Self { score: 0, lives: starting_lives, status: GameStatus::Playing, best_score }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Playing
    }
}

// ── Tree (spawner) ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub x: f32,
    pub y: f32,
    pub moving_right: bool,
    /// Seconds accumulated toward the next drop attempt.
    pub drop_timer: f32,
    pub apples_dropped: u32,
    /// Drop count at which the next golden apple is released.
    pub next_golden_at: u32,
}

// ── Falling items ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Height before the last fall step; the swept contact test uses it.
    pub prev_y: f32,
    pub kind: ItemKind,
    pub fall_speed: f32,
    pub destroy_y: f32,
}

/// Collision radius shared by every falling item.
pub const ITEM_RADIUS: f32 = 0.5;

// ── Basket ────────────────────────────────────────────────────────────────────

/// Axis-aligned catch volume centred on `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Basket {
    pub x: f32,
    pub y: f32,
    pub half_width: f32,
    pub half_height: f32,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Everything the player did since the previous tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickInput {
    /// Raw horizontal pointer movement, in world units, before sensitivity.
    pub pointer_dx: f32,
    pub restart: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// How every item that ever existed ended up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outcomes {
    pub spawned: u32,
    pub caught: u32,
    pub missed: u32,
    /// Removed by a restart without being caught or missed.
    pub cleared: u32,
}

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub session: Session,
    pub tree: Tree,
    /// `None` when the scene has no catch zone; misses are then unreported.
    pub basket: Option<Basket>,
    pub items: Vec<Item>,
    pub outcomes: Outcomes,
    pub frame: u64,
    pub next_id: u32,
}
