//! # Telecommand module
//!
//! This module provides telecommand functionality to the communications
//! interface. Telecommands are the discrete triggers given to the motion
//! controller, either by an operator or by a script.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand.
///
/// Serialised as JSON with a `"type"` tag, for example `{"type": "START"}` or
/// `{"type": "PAUSE", "duration_ms": 500}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tc {
    /// Begin driving.
    Start,

    /// Stop immediately, zeroing all wheels.
    Stop,

    /// Capture the current wall distances and heading as the new references.
    Recalibrate,

    /// Rotate the facing direction a quarter turn anticlockwise.
    TurnLeft,

    /// Rotate the facing direction a quarter turn clockwise.
    TurnRight,

    /// Hold still for the given duration, added on to any pause in progress.
    Pause {
        /// Duration of the pause in milliseconds
        duration_ms: u64
    }
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON or an unrecognised type: {0}")]
    InvalidJson(serde_json::Error)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {

    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        serde_json::from_str(json_str).map_err(TcParseError::InvalidJson)
    }

    /// Serialise the TC into a JSON packet
    pub fn to_json(&self) -> Result<String, TcParseError> {
        serde_json::to_string(self).map_err(TcParseError::InvalidJson)
    }
}
