//! # Sensor Equipment Frames

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Range reading reported when a sensor sees nothing within its range.
pub const NO_RETURN: u8 = u8::MAX;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One snapshot of all sensors.
///
/// The range sensors are fixed to the chassis and indexed by compass direction in the maze frame,
/// not by the robot's current facing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SensFrame {
    /// Time of the frame relative to the start of the recording.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// Range measured by the north sensor, `NO_RETURN` for open space.
    pub north: u8,

    /// Range measured by the east sensor, `NO_RETURN` for open space.
    pub east: u8,

    /// Range measured by the south sensor, `NO_RETURN` for open space.
    pub south: u8,

    /// Range measured by the west sensor, `NO_RETURN` for open space.
    pub west: u8,

    /// Yaw estimate from the inertial sensor.
    ///
    /// Units: degrees, any wrapping convention
    pub yaw_deg: f64,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl SensFrame {
    /// Get the range readings as an array in compass order (north, east, south, west).
    pub fn ranges(&self) -> [u8; 4] {
        [self.north, self.east, self.south, self.west]
    }
}
