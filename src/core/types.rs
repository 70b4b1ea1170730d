//! Starfall data structures.
//!
//! The world is simulated in continuous units (640x600, y grows downward)
//! and projected onto the terminal grid at render time. All tuning values
//! live here so the logic module stays free of magic numbers.

use crate::core::arcade::{Body, Platform};
use rand::Rng;

/// World dimensions in simulation units.
pub const WORLD_WIDTH: f64 = 640.0;
pub const WORLD_HEIGHT: f64 = 600.0;

/// Physics tick interval in milliseconds (~60 FPS).
pub const PHYSICS_TICK_MS: u64 = 16;

/// Seconds per physics tick.
pub const TICK_SECONDS: f64 = PHYSICS_TICK_MS as f64 / 1000.0;

/// Downward acceleration applied to the player and stars, units/sec^2.
pub const GRAVITY: f64 = 300.0;

/// Top edge of the ground platform. The ground spans the full world width.
pub const GROUND_TOP: f64 = WORLD_HEIGHT - 64.0;
pub const GROUND_HEIGHT: f64 = 64.0;

/// Ledge dimensions and starting placement.
pub const LEDGE_WIDTH: f64 = 400.0;
pub const LEDGE_HEIGHT: f64 = 32.0;
pub const LEDGE1_SPAWN: (f64, f64) = (400.0, 400.0);
pub const LEDGE1_VELOCITY: f64 = -40.0;
pub const LEDGE2_SPAWN: (f64, f64) = (-150.0, 250.0);
pub const LEDGE2_VELOCITY: f64 = 60.0;

/// Vertical bands the ledges oscillate inside. A ledge whose y leaves its
/// band has its velocity sign flipped.
pub const LEDGE1_BAND: (f64, f64) = (225.0, 400.0);
pub const LEDGE2_BAND: (f64, f64) = (200.0, 450.0);

/// Player body and movement tuning.
pub const PLAYER_WIDTH: f64 = 32.0;
pub const PLAYER_HEIGHT: f64 = 48.0;
pub const PLAYER_SPAWN: (f64, f64) = (32.0, WORLD_HEIGHT - 150.0);
pub const PLAYER_BOUNCE: f64 = 0.2;
pub const RUN_SPEED: f64 = 150.0;
pub const JUMP_VELOCITY: f64 = -350.0;

/// Star body tuning. Each star gets a bounce coefficient drawn uniformly
/// from [STAR_BOUNCE_MIN, STAR_BOUNCE_MIN + STAR_BOUNCE_SPREAD).
pub const STAR_WIDTH: f64 = 24.0;
pub const STAR_HEIGHT: f64 = 22.0;
pub const STAR_BOUNCE_MIN: f64 = 0.5;
pub const STAR_BOUNCE_SPREAD: f64 = 0.2;
pub const STAR_SPAWN_MARGIN: f64 = 10.0;

/// Exclusive upper bound on the size of a respawned star batch.
pub const MAX_STAR_BATCH: u32 = 13;

/// A star whose vertical speed magnitude stays under this threshold is
/// counted as resting.
pub const STILLNESS_EPSILON: f64 = 2.0;

/// Resting ticks after which an uncollected star is forfeited.
pub const STILLNESS_LIMIT: u32 = 100;

/// Counter cost of a forfeited star. Applied without a floor clamp.
pub const NEGLECT_PENALTY: i32 = 5;

/// Resource counter range and the losing threshold.
pub const COUNTER_START: i32 = 100;
pub const COUNTER_MAX: i32 = 100;
pub const LOSE_THRESHOLD: i32 = 50;

/// Physics ticks a movement key stays active after a key press (~200ms).
/// Bridges the gap between terminal key-repeat events so holding a key
/// feels continuous rather than stuttery.
pub const INPUT_HOLD_TICKS: u32 = 12;

/// Spritesheet frame indices: four walk frames per direction plus one
/// idle frame, advanced at ~10 FPS while moving.
pub const WALK_LEFT_FRAMES: [usize; 4] = [0, 1, 2, 3];
pub const WALK_RIGHT_FRAMES: [usize; 4] = [5, 6, 7, 8];
pub const IDLE_FRAME: usize = 4;
pub const WALK_ANIM_TICKS: u64 = 6;

/// Whether the run is still being played or has reached the lose screen.
/// The transition to `Ended` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Ended,
}

/// Counter tier, evaluated high-to-low. Selects the warning message and its
/// color in the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Steady,
    Careful,
    Danger,
    Critical,
}

impl Tier {
    pub fn from_counter(counter: i32) -> Self {
        if counter >= 80 {
            Tier::Steady
        } else if counter >= 70 {
            Tier::Careful
        } else if counter >= 60 {
            Tier::Danger
        } else {
            Tier::Critical
        }
    }

    /// Message prefix shown before the counter value.
    pub fn prefix(&self) -> &'static str {
        match self {
            Tier::Steady => "Let's go! ",
            Tier::Careful => "Be careful! ",
            Tier::Danger => "You're playing with fire here! ",
            Tier::Critical => "DON'T GO BELOW 50!!!! ",
        }
    }
}

/// The player sprite. `frame` is the current spritesheet frame index.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    pub frame: usize,
    pub anim_cycle: usize,
}

impl Player {
    pub fn new() -> Self {
        let mut body = Body::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1, PLAYER_WIDTH, PLAYER_HEIGHT);
        body.bounce_y = PLAYER_BOUNCE;
        Self {
            body,
            frame: IDLE_FRAME,
            anim_cycle: 0,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A collectible star. `still` counts consecutive resting ticks; a star
/// left resting past [`STILLNESS_LIMIT`] is forfeited.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub body: Body,
    pub still: u32,
}

/// An oscillating platform bound to a vertical band.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledge {
    pub platform: Platform,
    pub band: (f64, f64),
}

/// Main game state. Owned by the shell and advanced by
/// [`crate::core::logic::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub phase: GamePhase,
    pub player: Player,
    pub ground: Platform,
    pub ledges: [Ledge; 2],
    pub stars: Vec<Star>,
    /// Count of alive stars, kept in lockstep with `stars`. Reaching zero
    /// triggers a respawn batch.
    pub live_stars: u32,

    pub score: u32,
    pub counter: i32,
    pub tier: Tier,

    // Input state. Movement flags persist for INPUT_HOLD_TICKS after a
    // key press; the jump stays queued until the player touches down.
    pub moving_left: bool,
    pub left_hold_ticks: u32,
    pub moving_right: bool,
    pub right_hold_ticks: u32,
    pub jump_queued: bool,

    /// True after a first Esc; a second Esc confirms, any other key cancels.
    pub quit_pending: bool,
    pub quit_requested: bool,

    // Timing
    pub accumulated_time_ms: u64,
    pub tick_count: u64,
}

impl World {
    /// Create a fresh world with an initial random star batch already
    /// falling.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let ground = Platform::new(0.0, GROUND_TOP, WORLD_WIDTH, GROUND_HEIGHT);

        let mut ledge1 = Platform::new(LEDGE1_SPAWN.0, LEDGE1_SPAWN.1, LEDGE_WIDTH, LEDGE_HEIGHT);
        ledge1.vy = LEDGE1_VELOCITY;
        let mut ledge2 = Platform::new(LEDGE2_SPAWN.0, LEDGE2_SPAWN.1, LEDGE_WIDTH, LEDGE_HEIGHT);
        ledge2.vy = LEDGE2_VELOCITY;

        let mut world = Self {
            phase: GamePhase::Playing,
            player: Player::new(),
            ground,
            ledges: [
                Ledge {
                    platform: ledge1,
                    band: LEDGE1_BAND,
                },
                Ledge {
                    platform: ledge2,
                    band: LEDGE2_BAND,
                },
            ],
            stars: Vec::new(),
            live_stars: 0,

            score: 0,
            counter: COUNTER_START,
            tier: Tier::from_counter(COUNTER_START),

            moving_left: false,
            left_hold_ticks: 0,
            moving_right: false,
            right_hold_ticks: 0,
            jump_queued: false,

            quit_pending: false,
            quit_requested: false,

            accumulated_time_ms: 0,
            tick_count: 0,
        };

        let initial = rng.gen_range(0..MAX_STAR_BATCH);
        world.spawn_star_batch(rng, initial);
        world
    }

    /// Drop `count` stars evenly spaced across the horizontal span, each
    /// with a randomized bounce coefficient. A zero count is a legal no-op.
    pub fn spawn_star_batch<R: Rng>(&mut self, rng: &mut R, count: u32) {
        if count == 0 {
            return;
        }
        let spacing = WORLD_WIDTH / count as f64;
        for i in 0..count {
            let x = STAR_SPAWN_MARGIN + i as f64 * spacing;
            let mut body = Body::new(x, 0.0, STAR_WIDTH, STAR_HEIGHT);
            body.bounce_y = STAR_BOUNCE_MIN + rng.gen::<f64>() * STAR_BOUNCE_SPREAD;
            self.stars.push(Star { body, still: 0 });
        }
        self.live_stars += count;
    }
}
