//! # Void detection module
//!
//! Tracks whether each side of the robot currently has a wall next to it.
//! Flags are driven by jumps in the side readings between consecutive ticks
//! rather than by the absolute readings, so a flag stays up for the whole
//! length of an opening and a single noisy reading cannot toggle it.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod params;
pub mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::Params;
pub use state::*;
