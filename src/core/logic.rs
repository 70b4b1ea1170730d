//! Game logic: input processing, fixed-step ticking, and the per-frame
//! update that runs collisions, star collection, movement, the star
//! lifecycle, the ledge oscillators, and the counter evaluator in a fixed
//! order. Later stages observe the effects of earlier ones within the same
//! frame; a collected star is never stillness-ticked.

use crate::core::arcade;
use crate::core::types::*;
use rand::Rng;

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Left,
    Right,
    Jump,    // Space, Up or W
    Quit,    // Esc or Q; pressed twice to confirm
    Other,   // Any other key (cancels quit_pending)
}

/// Process a single input action.
pub fn process_input(world: &mut World, input: GameInput) {
    if world.phase == GamePhase::Ended {
        return; // Lose screen keys are handled by the shell.
    }

    match input {
        GameInput::Left => {
            if world.quit_pending {
                world.quit_pending = false;
                return;
            }
            world.moving_left = true;
            world.left_hold_ticks = INPUT_HOLD_TICKS;
            world.moving_right = false;
            world.right_hold_ticks = 0;
        }
        GameInput::Right => {
            if world.quit_pending {
                world.quit_pending = false;
                return;
            }
            world.moving_right = true;
            world.right_hold_ticks = INPUT_HOLD_TICKS;
            world.moving_left = false;
            world.left_hold_ticks = 0;
        }
        GameInput::Jump => {
            if world.quit_pending {
                world.quit_pending = false;
            } else {
                world.jump_queued = true;
            }
        }
        GameInput::Quit => {
            if world.quit_pending {
                world.quit_requested = true;
            } else {
                world.quit_pending = true;
            }
        }
        GameInput::Other => {
            if world.quit_pending {
                world.quit_pending = false;
            }
        }
    }
}

/// Advance the world. `dt_ms` is milliseconds since the last call;
/// internally steps the simulation in fixed 16ms increments (~60 FPS).
/// Returns true if any frame was stepped.
///
/// A world whose phase is `Ended` no longer changes: the call is a no-op.
pub fn tick<R: Rng>(world: &mut World, dt_ms: u64, rng: &mut R) -> bool {
    if world.phase == GamePhase::Ended {
        return false;
    }

    // Pause the simulation while the quit confirmation is up.
    if world.quit_pending {
        return false;
    }

    // Clamp dt to 100ms max to prevent physics explosion after pause/lag
    let dt_ms = dt_ms.min(100);

    world.accumulated_time_ms += dt_ms;
    let mut changed = false;

    while world.accumulated_time_ms >= PHYSICS_TICK_MS {
        world.accumulated_time_ms -= PHYSICS_TICK_MS;
        step_frame(world, rng);
        changed = true;

        if world.phase == GamePhase::Ended {
            break;
        }
    }

    changed
}

/// One simulated frame.
fn step_frame<R: Rng>(world: &mut World, rng: &mut R) {
    world.tick_count += 1;
    expire_input_holds(world);

    // Physics pre-step: ledges drift, gravity pulls the player and stars.
    for ledge in &mut world.ledges {
        arcade::move_platform(&mut ledge.platform, TICK_SECONDS);
    }
    arcade::integrate(&mut world.player.body, GRAVITY, TICK_SECONDS);
    for star in &mut world.stars {
        arcade::integrate(&mut star.body, GRAVITY, TICK_SECONDS);
    }

    // 1. Collide the player and the stars with the platforms.
    let platforms = [
        world.ground,
        world.ledges[0].platform,
        world.ledges[1].platform,
    ];
    for platform in &platforms {
        arcade::collide_platform(&mut world.player.body, platform);
    }
    arcade::clamp_to_world(&mut world.player.body, WORLD_WIDTH, WORLD_HEIGHT);
    for star in &mut world.stars {
        for platform in &platforms {
            arcade::collide_platform(&mut star.body, platform);
        }
    }

    // 2. Collect every star the player overlaps.
    collect_stars(world);

    // 3. Horizontal movement and walk animation.
    apply_movement(world);

    // 4. Jump from a surface. The queued jump survives until touchdown.
    if world.jump_queued && world.player.body.on_floor {
        world.player.body.vy = JUMP_VELOCITY;
        world.jump_queued = false;
    }

    // 5. Stillness bookkeeping and the neglect penalty.
    neglect_tick(world);

    // 6. Respawn once the sky is empty.
    if world.live_stars == 0 {
        let batch = rng.gen_range(0..MAX_STAR_BATCH);
        world.spawn_star_batch(rng, batch);
    }

    // 7. Ledge oscillation.
    for ledge in &mut world.ledges {
        oscillate_ledge(ledge);
    }

    // 8. Counter tier and the lose condition.
    evaluate_counter(world);
}

fn expire_input_holds(world: &mut World) {
    if world.left_hold_ticks > 0 {
        world.left_hold_ticks -= 1;
    } else {
        world.moving_left = false;
    }
    if world.right_hold_ticks > 0 {
        world.right_hold_ticks -= 1;
    } else {
        world.moving_right = false;
    }
}

/// Remove every star overlapping the player: one point each, and the
/// counter recovers by one while under its cap.
fn collect_stars(world: &mut World) {
    let player = world.player.body;
    let mut collected = 0u32;
    world.stars.retain(|star| {
        if arcade::overlaps(&star.body, &player) {
            collected += 1;
            false
        } else {
            true
        }
    });

    world.live_stars -= collected;
    for _ in 0..collected {
        world.score += 1;
        if world.counter < COUNTER_MAX {
            world.counter += 1;
        }
    }
}

fn apply_movement(world: &mut World) {
    let player = &mut world.player;
    player.body.vx = 0.0;

    if world.moving_left {
        player.body.vx = -RUN_SPEED;
        advance_walk_anim(player, world.tick_count);
        player.frame = WALK_LEFT_FRAMES[player.anim_cycle];
    } else if world.moving_right {
        player.body.vx = RUN_SPEED;
        advance_walk_anim(player, world.tick_count);
        player.frame = WALK_RIGHT_FRAMES[player.anim_cycle];
    } else {
        player.anim_cycle = 0;
        player.frame = IDLE_FRAME;
    }
}

fn advance_walk_anim(player: &mut Player, tick_count: u64) {
    if tick_count.is_multiple_of(WALK_ANIM_TICKS) {
        player.anim_cycle = (player.anim_cycle + 1) % WALK_LEFT_FRAMES.len();
    }
}

/// Count resting ticks per star and forfeit the ones left too long. The
/// penalty has no floor clamp: the counter may go negative and feed the
/// lose check in the same frame.
fn neglect_tick(world: &mut World) {
    for star in &mut world.stars {
        if star.body.vy.abs() < STILLNESS_EPSILON {
            star.still += 1;
        } else {
            star.still = 0;
        }
    }

    let mut neglected = 0u32;
    world.stars.retain(|star| {
        if star.still > STILLNESS_LIMIT {
            neglected += 1;
            false
        } else {
            true
        }
    });

    world.live_stars -= neglected;
    world.counter -= neglected as i32 * NEGLECT_PENALTY;
}

/// Flip the ledge's vertical velocity when its position leaves the band.
/// The position is not snapped back; the next frame moves it inward.
fn oscillate_ledge(ledge: &mut Ledge) {
    let (low, high) = ledge.band;
    if ledge.platform.y > high || ledge.platform.y < low {
        ledge.platform.vy = -ledge.platform.vy;
    }
}

/// Re-derive the counter tier, then check the one-way lose transition:
/// below 50 the run ends, the ledges freeze, and the player drops back to
/// the idle frame.
fn evaluate_counter(world: &mut World) {
    world.tier = Tier::from_counter(world.counter);

    if world.counter < LOSE_THRESHOLD {
        world.phase = GamePhase::Ended;
        for ledge in &mut world.ledges {
            ledge.platform.vy = 0.0;
        }
        world.player.body.vx = 0.0;
        world.player.frame = IDLE_FRAME;
        world.player.anim_cycle = 0;
        world.moving_left = false;
        world.moving_right = false;
        world.left_hold_ticks = 0;
        world.right_hold_ticks = 0;
        world.jump_queued = false;
    }
}
