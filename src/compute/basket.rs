/// The player's basket: scoring, lives and the game-over / restart cycle.

use log::{debug, info};

use crate::config::RulesConfig;
use crate::entities::{Basket, GameState, GameStatus, ItemKind, Session};

pub fn move_basket(basket: &Basket, pointer_dx: f32, sensitivity: f32, half_width: f32) -> Basket {
    let x = (basket.x + pointer_dx * sensitivity).clamp(-half_width, half_width);
    Basket { x, ..basket.clone() }
}

/// Award points for a caught item.  Ignored once the game is over.
pub fn catch_apple(session: &Session, kind: ItemKind, rules: &RulesConfig) -> Session {
    if !session.is_active() {
        return session.clone();
    }
    let points = match kind {
        ItemKind::Apple => rules.points_per_apple,
        ItemKind::GoldenApple => rules.points_per_golden_apple,
    };
    let score = session.score.saturating_add(points);
    debug!("caught {kind:?} for {points}, score {score}");
    Session { score, best_score: session.best_score.max(score), ..session.clone() }
}

/// Take a life for an item that hit the ground.  The last life ends the game;
/// after that misses are ignored.
pub fn miss_apple(session: &Session) -> Session {
    if !session.is_active() {
        return session.clone();
    }
    let lives = session.lives.saturating_sub(1);
    debug!("missed, {lives} lives left");
    let status = if lives == 0 { GameStatus::GameOver } else { GameStatus::Playing };
    Session { lives, status, ..session.clone() }
}

/// Back to a fresh run: score 0, full lives, every falling item removed.
/// The basket and tree stay where they are; the tree's drop timer starts over.
pub fn restart(state: &GameState) -> GameState {
    let cleared = state.items.len() as u32;
    info!("restart, clearing {cleared} items");

    let mut next = state.clone();
    next.session = Session::new(state.config.rules.starting_lives, state.session.best_score);
    next.items.clear();
    next.tree.drop_timer = 0.0;
    next.outcomes.cleared += cleared;
    next
}
