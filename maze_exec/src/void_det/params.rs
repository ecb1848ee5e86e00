//! Void detection parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for void detection
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Params {

    /// Change in a reading between two ticks needed to raise or clear the
    /// flag on that side.
    pub delta_threshold: u8,

    /// Reading at or above which a side is considered open when there is no
    /// history to compare against.
    pub open_dist: u8
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            delta_threshold: 40,
            open_dist: 200
        }
    }
}
