//! Terminal rendering.

pub mod scene;
