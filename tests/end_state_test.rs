//! Difficulty tier and end-state tests: tier selection, the one-way lose
//! transition, and the frozen world that follows it.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use starfall::core::arcade::Body;
use starfall::core::logic::{process_input, tick, GameInput};
use starfall::core::types::*;

fn world_without_stars(seed: u64) -> (World, ChaCha8Rng) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = World::new(&mut rng);
    world.stars.clear();
    world.live_stars = 0;
    (world, rng)
}

/// A star resting on the ground, one tick away from forfeiture.
fn doomed_star(x: f64) -> Star {
    let mut body = Body::new(x, GROUND_TOP - STAR_HEIGHT, STAR_WIDTH, STAR_HEIGHT);
    body.bounce_y = 0.6;
    Star {
        body,
        still: STILLNESS_LIMIT,
    }
}

#[test]
fn test_tier_selection_boundaries() {
    assert_eq!(Tier::from_counter(80), Tier::Steady);
    assert_eq!(Tier::from_counter(75), Tier::Careful);
    assert_eq!(Tier::from_counter(65), Tier::Danger);
    assert_eq!(Tier::from_counter(59), Tier::Critical);
}

#[test]
fn test_world_tier_follows_counter() {
    for (counter, expected) in [
        (100, Tier::Steady),
        (79, Tier::Careful),
        (64, Tier::Danger),
        (55, Tier::Critical),
    ] {
        let (mut world, mut rng) = world_without_stars(20);
        world.counter = counter;
        tick(&mut world, PHYSICS_TICK_MS, &mut rng);
        assert_eq!(world.tier, expected);
        assert_eq!(world.phase, GamePhase::Playing);
    }
}

#[test]
fn test_neglect_chain_triggers_lose() {
    // Counter at 54: one forfeited star lands at 49, under the threshold.
    let (mut world, mut rng) = world_without_stars(21);
    world.counter = 54;
    world.stars.push(doomed_star(300.0));
    world.live_stars = 1;

    tick(&mut world, PHYSICS_TICK_MS, &mut rng);

    assert_eq!(world.counter, 49);
    assert_eq!(world.phase, GamePhase::Ended);
    assert_eq!(world.tier, Tier::Critical);
    assert!((world.ledges[0].platform.vy).abs() < f64::EPSILON);
    assert!((world.ledges[1].platform.vy).abs() < f64::EPSILON);
    assert_eq!(world.player.frame, IDLE_FRAME);
}

#[test]
fn test_counter_can_pass_threshold_without_losing() {
    // At 55 the penalty leaves 50, which is not below the threshold.
    let (mut world, mut rng) = world_without_stars(22);
    world.counter = 55;
    world.stars.push(doomed_star(300.0));
    world.live_stars = 1;

    tick(&mut world, PHYSICS_TICK_MS, &mut rng);

    assert_eq!(world.counter, 50);
    assert_eq!(world.phase, GamePhase::Playing);
}

#[test]
fn test_ended_world_ticks_are_noops() {
    let (mut world, mut rng) = world_without_stars(23);
    world.counter = 54;
    world.stars.push(doomed_star(300.0));
    world.live_stars = 1;
    tick(&mut world, PHYSICS_TICK_MS, &mut rng);
    assert_eq!(world.phase, GamePhase::Ended);

    let snapshot = world.clone();
    for _ in 0..50 {
        assert!(!tick(&mut world, PHYSICS_TICK_MS, &mut rng));
    }
    assert_eq!(world, snapshot);
}

#[test]
fn test_ended_world_ignores_input() {
    let (mut world, mut rng) = world_without_stars(24);
    world.counter = 40;
    tick(&mut world, PHYSICS_TICK_MS, &mut rng);
    assert_eq!(world.phase, GamePhase::Ended);

    let snapshot = world.clone();
    process_input(&mut world, GameInput::Left);
    process_input(&mut world, GameInput::Jump);
    process_input(&mut world, GameInput::Quit);
    assert_eq!(world, snapshot);
}

#[test]
fn test_lose_is_terminal_even_if_counter_recovers() {
    let (mut world, mut rng) = world_without_stars(25);
    world.counter = 40;
    tick(&mut world, PHYSICS_TICK_MS, &mut rng);
    assert_eq!(world.phase, GamePhase::Ended);

    world.counter = 100;
    let snapshot = world.clone();
    tick(&mut world, 1000, &mut rng);
    assert_eq!(world, snapshot);
    assert_eq!(world.phase, GamePhase::Ended);
}

#[test]
fn test_full_game_neglect_run_ends() {
    // Leave the game unattended: neglect penalties alone must eventually
    // end the run, and the ending must stick.
    let mut rng = ChaCha8Rng::seed_from_u64(26);
    let mut world = World::new(&mut rng);

    let mut frames = 0u64;
    while world.phase == GamePhase::Playing {
        tick(&mut world, PHYSICS_TICK_MS, &mut rng);
        frames += 1;
        assert!(frames < 200_000, "unattended run never ended");
    }

    assert!(world.counter < LOSE_THRESHOLD);
    let snapshot = world.clone();
    tick(&mut world, PHYSICS_TICK_MS, &mut rng);
    assert_eq!(world, snapshot);
}
