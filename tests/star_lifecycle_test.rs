//! Star lifecycle tests: spawning, falling, bouncing to rest, collection,
//! the neglect penalty, and the respawn policy, all through full physics.

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

#[test]
fn test_batch_spacing_and_bounce_range() {
    let (mut world, mut rng) = world_without_stars(10);
    world.spawn_star_batch(&mut rng, 8);

    assert_eq!(world.live_stars, 8);
    let spacing = WORLD_WIDTH / 8.0;
    for (i, star) in world.stars.iter().enumerate() {
        let expected = STAR_SPAWN_MARGIN + i as f64 * spacing;
        assert!((star.body.x - expected).abs() < 1e-9);
        assert!(star.body.bounce_y >= STAR_BOUNCE_MIN);
        assert!(star.body.bounce_y < STAR_BOUNCE_MIN + STAR_BOUNCE_SPREAD);
        assert_eq!(star.still, 0);
    }
}

#[test]
fn test_star_falls_bounces_and_rests() {
    let (mut world, mut rng) = world_without_stars(11);
    world.spawn_star_batch(&mut rng, 1);
    world.stars[0].body.x = 300.0; // keep it away from the player

    let mut bounced = false;
    let mut rested = false;
    for _ in 0..1500 {
        tick(&mut world, PHYSICS_TICK_MS, &mut rng);
        let star = &world.stars[0];
        if star.body.vy < 0.0 {
            bounced = true;
        }
        if star.still > 10 {
            rested = true;
            // Resting exactly on the ground platform.
            assert!((star.body.bottom() - GROUND_TOP).abs() < 1.0);
            break;
        }
    }
    assert!(bounced);
    assert!(rested);
}

#[test]
fn test_neglected_star_costs_five() {
    let (mut world, mut rng) = world_without_stars(12);
    world.spawn_star_batch(&mut rng, 1);
    world.stars[0].body.x = 300.0;

    for _ in 0..3000 {
        tick(&mut world, PHYSICS_TICK_MS, &mut rng);
        if world.counter != COUNTER_START {
            break;
        }
    }

    assert_eq!(world.counter, COUNTER_START - NEGLECT_PENALTY);
    assert_eq!(world.score, 0);
}

#[test]
fn test_falling_star_onto_player_is_collected() {
    let (mut world, mut rng) = world_without_stars(13);
    world.spawn_star_batch(&mut rng, 1);
    world.stars[0].body.x = world.player.body.x;
    world.stars[0].body.y = 300.0;

    for _ in 0..300 {
        tick(&mut world, PHYSICS_TICK_MS, &mut rng);
        if world.score > 0 {
            break;
        }
    }

    assert_eq!(world.score, 1);
    // Counter was already full, so collection cannot push it past the cap.
    assert_eq!(world.counter, COUNTER_MAX);
}

#[test]
fn test_collection_replenishes_depleted_counter() {
    let (mut world, mut rng) = world_without_stars(14);
    world.counter = 70;
    world.spawn_star_batch(&mut rng, 1);
    world.stars[0].body.x = world.player.body.x;
    world.stars[0].body.y = 300.0;

    for _ in 0..300 {
        tick(&mut world, PHYSICS_TICK_MS, &mut rng);
        if world.score > 0 {
            break;
        }
    }

    assert_eq!(world.counter, 71);
}

#[test]
fn test_respawn_batch_size_within_bounds() {
    let (mut world, mut rng) = world_without_stars(15);

    // Observe several respawn cycles by repeatedly draining the sky.
    for _ in 0..10 {
        for _ in 0..100 {
            tick(&mut world, PHYSICS_TICK_MS, &mut rng);
            if world.live_stars > 0 {
                break;
            }
        }
        assert!(world.live_stars < MAX_STAR_BATCH);
        assert_eq!(world.live_stars as usize, world.stars.len());

        world.stars.clear();
        world.live_stars = 0;
    }
}

#[test]
fn test_walking_player_harvests_grounded_star() {
    // A star resting a short walk to the right gets picked up by contact.
    let (mut world, mut rng) = world_without_stars(16);
    let mut body = Body::new(150.0, GROUND_TOP - STAR_HEIGHT, STAR_WIDTH, STAR_HEIGHT);
    body.bounce_y = 0.55;
    world.stars.push(Star { body, still: 20 });
    world.live_stars = 1;

    for _ in 0..200 {
        process_input(&mut world, GameInput::Right);
        tick(&mut world, PHYSICS_TICK_MS, &mut rng);
        if world.score > 0 {
            break;
        }
    }

    assert_eq!(world.score, 1);
}
