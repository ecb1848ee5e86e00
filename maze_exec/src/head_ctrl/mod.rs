//! # Heading control module
//!
//! Heading control holds the robot on the yaw captured at calibration. It is
//! a PID controller acting on the shortest signed angle between the target and
//! current yaw, whose output is turned into a rotation correction summed on
//! top of the alignment rotation.
//!
//! The raw PID output is limited, negated to match the rotation convention of
//! the mixer, and finally passed through a deadband so that small corrections
//! which would only make the motors whine are dropped.

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
