/// The apple tree: wanders left and right and drops apples on a timer.

use log::debug;
use rand::Rng;

use crate::config::TreeConfig;
use crate::entities::{ItemKind, Tree};

/// How far inside the boundary the tree is put back after touching it.
const BOUNDARY_NUDGE: f32 = 0.1;

pub fn new_tree(cfg: &TreeConfig, rng: &mut impl Rng) -> Tree {
    Tree {
        x: cfg.start_x,
        y: cfg.y,
        moving_right: true,
        drop_timer: 0.0,
        apples_dropped: 0,
        next_golden_at: golden_gap(cfg, rng),
    }
}

fn golden_gap(cfg: &TreeConfig, rng: &mut impl Rng) -> u32 {
    rng.gen_range(cfg.golden_min..=cfg.golden_max)
}

// ── Movement ─────────────────────────────────────────────────────────────────

pub fn move_tree(tree: &Tree, speed: f32, dt: f32) -> Tree {
    let step = speed * dt;
    let x = if tree.moving_right { tree.x + step } else { tree.x - step };
    Tree { x, ..tree.clone() }
}

/// Bounce off either edge, nudging the tree back inside so it can't stick.
pub fn check_boundaries(tree: &Tree, boundary: f32) -> Tree {
    if tree.x <= -boundary {
        Tree { x: -boundary + BOUNDARY_NUDGE, moving_right: true, ..tree.clone() }
    } else if tree.x >= boundary {
        Tree { x: boundary - BOUNDARY_NUDGE, moving_right: false, ..tree.clone() }
    } else {
        tree.clone()
    }
}

// ── Drops ────────────────────────────────────────────────────────────────────

/// Count a drop and decide what falls.  Golden apples come every
/// `golden_min..=golden_max` drops; the next one is scheduled as soon as one
/// is released.
pub fn choose_kind(tree: &Tree, cfg: &TreeConfig, rng: &mut impl Rng) -> (Tree, ItemKind) {
    let apples_dropped = tree.apples_dropped + 1;
    if apples_dropped >= tree.next_golden_at {
        let next_golden_at = apples_dropped + golden_gap(cfg, rng);
        debug!("golden apple on drop {apples_dropped}, next at {next_golden_at}");
        (Tree { apples_dropped, next_golden_at, ..tree.clone() }, ItemKind::GoldenApple)
    } else {
        (Tree { apples_dropped, ..tree.clone() }, ItemKind::Apple)
    }
}

/// One tick of tree behaviour.  Returns the updated tree and what, if
/// anything, it dropped this tick.
pub fn update_tree(
    tree: &Tree,
    cfg: &TreeConfig,
    dt: f32,
    rng: &mut impl Rng,
) -> (Tree, Option<ItemKind>) {
    let mut tree = move_tree(tree, cfg.speed, dt);

    if rng.gen::<f32>() < cfg.direction_change_chance {
        tree.moving_right = !tree.moving_right;
    }

    tree = check_boundaries(&tree, cfg.boundary_offset);

    tree.drop_timer += dt;
    if tree.drop_timer < cfg.drop_interval {
        return (tree, None);
    }
    tree.drop_timer = 0.0;

    if rng.gen::<f32>() < cfg.drop_chance {
        let (tree, kind) = choose_kind(&tree, cfg, rng);
        (tree, Some(kind))
    } else {
        (tree, None)
    }
}
