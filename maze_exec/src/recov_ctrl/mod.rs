//! # Recovery control module
//!
//! Recovery control tries to shake the robot loose when it looks to have been
//! lifted or wedged. It is open loop: time since entering recovery is split
//! into fixed length modes, and each mode picks a pseudo-random manoeuvre
//! which is held for the whole mode. Early and even modes drive along a random
//! direction, later odd modes spin on the spot.
//!
//! The generator is reseeded from the mode number on every tick, so the same
//! seed always replays the same sequence of manoeuvres.

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
