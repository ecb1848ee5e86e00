//! Locomotion control module
//!
//! Converts a facing-relative drive command into the four individual wheel
//! commands of the holonomic chassis.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod mix;
mod sample;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use mix::*;
pub use sample::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of drive wheels on the robot.
pub use comms_if::eqpt::mech::NUM_WHEELS;

/// The number of compass directions (and of facing-relative sides).
pub const NUM_DIRECTIONS: usize = 4;
