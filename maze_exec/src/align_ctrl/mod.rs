//! # Alignment control module
//!
//! Alignment control keeps the robot centred between the two side walls, using
//! the side distances captured at calibration as the reference.
//!
//! Two corrections are available:
//!
//! - Rotational alignment, used when the sum of the side distances differs from
//!   the calibrated sum (the robot sits askew across the corridor). The range
//!   sensors cannot tell which way the robot is skewed, so the rotation sign is
//!   searched for: at a fixed cooldown the error is compared with the last
//!   check and the sign flipped if things got worse. Forward motion is
//!   suppressed meanwhile.
//! - Lateral alignment, used when the robot is square but off-centre. It
//!   strafes toward the side with more room.
//!
//! Both are suppressed while either side wall is missing.

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
