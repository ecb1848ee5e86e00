//! Alignment control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for alignment control
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Params {

    /// Lateral shift above which the robot strafes back to the centre.
    pub lat_threshold: i32,

    /// Strafe speed used for lateral alignment.
    pub lat_speed: i32,

    /// Error in the sum of side distances above which the robot rotates to
    /// square up.
    pub rot_threshold: i32,

    /// Rotation speed used for rotational alignment.
    pub rot_speed: i32,

    /// Interval between checks of the rotation sign.
    ///
    /// Units: milliseconds
    pub toggle_cooldown_ms: u64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            lat_threshold: 30,
            lat_speed: 70,
            rot_threshold: 20,
            rot_speed: 80,
            toggle_cooldown_ms: 50
        }
    }
}
