//! Recovery control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for recovery control
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Params {

    /// Length of each recovery mode.
    ///
    /// Units: milliseconds
    pub mode_duration_ms: u64,

    /// Number of modes at the start of recovery which always drive rather than
    /// spin.
    pub num_drive_modes: u64,

    /// Forward speed used in driving modes.
    pub speed: i32,

    /// Rotation speed used in spinning modes.
    pub rotation_speed: i32,

    /// Base seed of the manoeuvre generator.
    pub seed: u64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            mode_duration_ms: 500,
            num_drive_modes: 5,
            speed: 120,
            rotation_speed: 80,
            seed: 0
        }
    }
}
