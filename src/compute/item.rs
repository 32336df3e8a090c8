/// Falling apples: instantiation, gravity and contact with the basket.

use std::collections::HashSet;

use log::debug;

use crate::entities::{Basket, GameState, Item, ItemKind, ITEM_RADIUS};

/// Which detection path reported a contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactPath {
    /// Overlap at the item's current position.
    Trigger,
    /// The item's path since the last tick crossed the basket.
    Swept,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Contact {
    pub item_id: u32,
    pub kind: ItemKind,
    pub path: ContactPath,
}

// ── Instantiation ────────────────────────────────────────────────────────────

/// Create an item of `kind` at `(x, y)` from its configured template.  With
/// no template for that kind nothing is created.
pub fn spawn_item(state: &GameState, kind: ItemKind, x: f32, y: f32) -> GameState {
    let template = match kind {
        ItemKind::Apple => &state.config.apple,
        ItemKind::GoldenApple => &state.config.golden_apple,
    };
    let Some(template) = template else {
        debug!("no template for {kind:?}, skipping drop");
        return state.clone();
    };

    let id = state.next_id;
    let mut items = state.items.clone();
    items.push(Item {
        id,
        x,
        y,
        prev_y: y,
        kind,
        fall_speed: template.fall_speed,
        destroy_y: template.destroy_y,
    });
    debug!("spawned {kind:?} #{id} at ({x:.2}, {y:.2})");

    let mut next = state.clone();
    next.items = items;
    next.next_id = id + 1;
    next.outcomes.spawned += 1;
    next
}

// ── Motion ───────────────────────────────────────────────────────────────────

pub fn fall(items: &[Item], dt: f32) -> Vec<Item> {
    items
        .iter()
        .map(|i| Item { prev_y: i.y, y: i.y - i.fall_speed * dt, ..i.clone() })
        .collect()
}

// ── Contacts ─────────────────────────────────────────────────────────────────

fn within_span(item: &Item, basket: &Basket) -> bool {
    (item.x - basket.x).abs() <= basket.half_width + ITEM_RADIUS
}

fn band(basket: &Basket) -> (f32, f32) {
    (
        basket.y - basket.half_height - ITEM_RADIUS,
        basket.y + basket.half_height + ITEM_RADIUS,
    )
}

pub fn trigger_contacts(items: &[Item], basket: &Basket) -> Vec<Contact> {
    let (low, high) = band(basket);
    items
        .iter()
        .filter(|i| within_span(i, basket) && i.y >= low && i.y <= high)
        .map(|i| Contact { item_id: i.id, kind: i.kind, path: ContactPath::Trigger })
        .collect()
}

/// Catches items that moved far enough in one tick to skip over the basket.
pub fn swept_contacts(items: &[Item], basket: &Basket) -> Vec<Contact> {
    let (low, high) = band(basket);
    items
        .iter()
        .filter(|i| within_span(i, basket) && i.y <= high && i.prev_y >= low)
        .map(|i| Contact { item_id: i.id, kind: i.kind, path: ContactPath::Swept })
        .collect()
}

/// Every item touching the basket this tick, reported once each regardless
/// of how many paths saw it.  Trigger contacts win ties.
pub fn contacts(state: &GameState) -> Vec<Contact> {
    let Some(basket) = &state.basket else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    trigger_contacts(&state.items, basket)
        .into_iter()
        .chain(swept_contacts(&state.items, basket))
        .filter(|c| seen.insert(c.item_id))
        .collect()
}
