//! Starfall - Terminal Arcade Platformer Library
//!
//! Exposes the simulation core and shell helpers for the binary and the
//! integration tests.

pub mod build_info;
pub mod core;
pub mod input;
pub mod ui;
pub mod utils;

pub use crate::core::types::{GamePhase, Tier, World, PHYSICS_TICK_MS};
