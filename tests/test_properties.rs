use apple_picker::compute::{init_state, tick};
use apple_picker::config::GameConfig;
use apple_picker::entities::{GameState, TickInput};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A busy orchard: frequent drops and fast apples so every run resolves
/// plenty of catches and misses.
fn busy_config() -> GameConfig {
    let mut cfg = GameConfig::default();
    cfg.tree.drop_interval = 0.05;
    cfg.tree.drop_chance = 1.0;
    cfg.tree.speed = 15.0;
    cfg.tree.direction_change_chance = 0.05;
    cfg.tree.golden_min = 2;
    cfg.tree.golden_max = 4;
    cfg.rules.starting_lives = 20;
    cfg
}

fn accounted(state: &GameState) -> bool {
    let o = &state.outcomes;
    o.spawned == o.caught + o.missed + o.cleared + state.items.len() as u32
}

fn step() -> impl Strategy<Value = (f32, f32, bool)> {
    (-2.0f32..2.0, 0.0f32..0.1, prop::bool::weighted(0.01))
}

proptest! {
    #[test]
    fn lives_and_score_move_one_way_while_active(
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 1..400),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state(busy_config(), 0, &mut rng);
        let starting = state.config.rules.starting_lives;

        for (dx, dt, restart) in steps {
            let input = TickInput { pointer_dx: dx, restart };
            let next = tick(&state, &input, dt, &mut rng);

            prop_assert!(next.session.lives <= starting);
            if !restart && state.session.is_active() {
                prop_assert!(next.session.lives <= state.session.lives);
                prop_assert!(next.session.score >= state.session.score);
            }
            if !state.session.is_active() && !restart {
                prop_assert_eq!(&next.session, &state.session);
            }
            state = next;
        }
    }

    #[test]
    fn every_item_has_exactly_one_fate(
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 1..400),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state(busy_config(), 0, &mut rng);

        for (dx, dt, restart) in steps {
            let input = TickInput { pointer_dx: dx, restart };
            state = tick(&state, &input, dt, &mut rng);
            prop_assert!(accounted(&state));
            // Unique ids: nothing is resolved twice or left dangling
            let mut ids: Vec<u32> = state.items.iter().map(|i| i.id).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), state.items.len());
        }
    }

    #[test]
    fn tree_stays_inside_its_boundary(
        seed in any::<u64>(),
        dts in prop::collection::vec(0.0f32..0.1, 1..600),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state(busy_config(), 0, &mut rng);
        let bound = state.config.tree.boundary_offset;

        for dt in dts {
            state = tick(&state, &TickInput::default(), dt, &mut rng);
            prop_assert!(state.tree.x.abs() <= bound);
        }
    }
}

#[test]
fn busy_run_eventually_ends() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut state = init_state(busy_config(), 0, &mut rng);
    // Basket parked far from the tree's path never catches anything.
    state.basket.as_mut().unwrap().x = 40.0;
    state.config.world.half_width = 40.0;

    for _ in 0..10_000 {
        if !state.session.is_active() {
            break;
        }
        state = tick(&state, &TickInput::default(), 0.05, &mut rng);
    }
    assert!(!state.session.is_active());
    assert_eq!(state.session.lives, 0);
    assert_eq!(state.session.score, 0);
    assert!(accounted(&state));
}
