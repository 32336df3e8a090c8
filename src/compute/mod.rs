/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.
///
/// - `tree`: lateral movement and apple drops
/// - `item`: falling, contact detection
/// - `basket`: catch / miss accounting, restart

pub mod basket;
pub mod item;
pub mod tree;

use log::info;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Basket, GameState, Outcomes, Session, TickInput};

pub use basket::{catch_apple, miss_apple, move_basket, restart};
pub use item::{contacts, fall, spawn_item, swept_contacts, trigger_contacts, Contact, ContactPath};
pub use tree::{check_boundaries, choose_kind, move_tree, update_tree};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state.  `best_score` carries the in-memory best
/// across runs.
pub fn init_state(config: GameConfig, best_score: u32, rng: &mut impl Rng) -> GameState {
    let tree = tree::new_tree(&config.tree, rng);
    let basket = Basket {
        x: config.basket.start_x,
        y: config.basket.y,
        half_width: config.basket.half_width,
        half_height: config.basket.half_height,
    };
    GameState {
        session: Session::new(config.rules.starting_lives, best_score),
        tree,
        basket: Some(basket),
        items: Vec::new(),
        outcomes: Outcomes::default(),
        frame: 0,
        next_id: 1,
        config,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by `dt` seconds.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A restart request consumes the whole tick.  Once the game is over the
/// world is frozen until restarted.
pub fn tick(state: &GameState, input: &TickInput, dt: f32, rng: &mut impl Rng) -> GameState {
    if input.restart {
        return restart(state);
    }
    if !state.session.is_active() {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Player moves the basket ───────────────────────────────────────────
    if let Some(b) = &state.basket {
        next.basket = Some(move_basket(
            b,
            input.pointer_dx,
            state.config.basket.sensitivity,
            state.config.world.half_width,
        ));
    }

    // ── 2. Tree moves and maybe drops something ──────────────────────────────
    let (tree, dropped) = update_tree(&state.tree, &state.config.tree, dt, rng);
    next.tree = tree;
    if let Some(kind) = dropped {
        let (x, y) = (next.tree.x, next.tree.y + state.config.tree.spawn_offset_y);
        next = spawn_item(&next, kind, x, y);
    }

    // ── 3. Items fall ────────────────────────────────────────────────────────
    next.items = fall(&next.items, dt);

    // ── 4. Catches (trigger + swept, de-duplicated) ──────────────────────────
    for contact in contacts(&next) {
        next.items.retain(|i| i.id != contact.item_id);
        next.outcomes.caught += 1;
        next.session = catch_apple(&next.session, contact.kind, &next.config.rules);
    }

    // ── 5. Misses ────────────────────────────────────────────────────────────
    let (gone, kept): (Vec<_>, Vec<_>) = next.items.into_iter().partition(|i| i.y < i.destroy_y);
    next.items = kept;
    for item in gone {
        next.outcomes.missed += 1;
        if next.basket.is_some() {
            next.session = miss_apple(&next.session);
        } else {
            log::warn!("apple {} fell with no basket to report the miss to", item.id);
        }
    }

    if state.session.is_active() && !next.session.is_active() {
        info!("game over with score {}", next.session.score);
    }

    next
}
