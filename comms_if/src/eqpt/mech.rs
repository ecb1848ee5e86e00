//! # Mechanisms Equipment Commands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of drive wheels on the chassis.
pub const NUM_WHEELS: usize = 4;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Duty demands sent to the motor driver.
///
/// Each wheel has two windings. At most one of `cw_duty[i]` and `ccw_duty[i]` is non-zero for any
/// wheel, both being zero brings the wheel to rest.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MechDems {
    /// Duty applied to the clockwise winding of each wheel.
    pub cw_duty: [u8; NUM_WHEELS],

    /// Duty applied to the counter-clockwise winding of each wheel.
    pub ccw_duty: [u8; NUM_WHEELS],
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl MechDems {
    /// Returns true if every winding of every wheel is off.
    pub fn is_stopped(&self) -> bool {
        self.cw_duty.iter().chain(self.ccw_duty.iter()).all(|d| *d == 0)
    }
}
