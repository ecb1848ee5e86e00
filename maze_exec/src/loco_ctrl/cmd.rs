//! Commands passed into and out of LocoCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use comms_if::eqpt::mech::MechDems;
use super::{NUM_DIRECTIONS, NUM_WHEELS};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Facing of the robot in the maze frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

/// A side of the robot relative to its current facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Front = 0,
    Right = 1,
    Back = 2,
    Left = 3,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A facing-relative drive command.
///
/// Positive forward moves toward the facing, positive lateral moves toward the
/// robot's right, positive rotation is applied equally to every wheel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveCmd {
    pub forward: i32,
    pub lateral: i32,
    pub rotation: i32,
}

/// Signed speed demand for each wheel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelCmd {
    pub speeds: [i32; NUM_WHEELS],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Direction {
    /// All directions in ordinal order.
    pub const ALL: [Direction; NUM_DIRECTIONS] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Get the direction with the given ordinal, wrapping modulo 4.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % NUM_DIRECTIONS]
    }

    /// Ordinal of the direction (North = 0, clockwise).
    pub fn index(self) -> usize {
        self as usize
    }

    /// The direction a quarter turn anticlockwise of this one.
    pub fn turned_left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// The direction a quarter turn clockwise of this one.
    pub fn turned_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::North
    }
}

impl Side {
    /// All sides in ordinal order.
    pub const ALL: [Side; NUM_DIRECTIONS] = [
        Side::Front,
        Side::Right,
        Side::Back,
        Side::Left,
    ];

    /// Ordinal of the side (Front = 0, clockwise).
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Get the absolute direction a side points in when the robot faces `dir`.
pub fn side_to_absolute(dir: Direction, side: Side) -> Direction {
    Direction::from_index(dir.index() + side.index())
}

impl DriveCmd {
    /// A command that holds every wheel at rest.
    pub const STOP: DriveCmd = DriveCmd {
        forward: 0,
        lateral: 0,
        rotation: 0,
    };

    /// Create a new drive command.
    pub fn new(forward: i32, lateral: i32, rotation: i32) -> Self {
        Self {
            forward,
            lateral,
            rotation,
        }
    }

    /// Limit every axis into `[-limit, limit]`.
    pub fn clamped(self, limit: i32) -> Self {
        let limit = limit.abs();
        Self {
            forward: self.forward.clamp(-limit, limit),
            lateral: self.lateral.clamp(-limit, limit),
            rotation: self.rotation.clamp(-limit, limit),
        }
    }

    /// Returns true if the command moves nothing.
    pub fn is_stop(&self) -> bool {
        *self == Self::STOP
    }
}

impl WheelCmd {
    /// Limit every wheel speed into `[-limit, limit]`.
    ///
    /// Axes are limited before mixing but two of them can still sum on one
    /// wheel, so the mixed speeds need limiting as well.
    pub fn clamped(self, limit: i32) -> Self {
        let limit = limit.abs();
        let mut speeds = self.speeds;

        for s in speeds.iter_mut() {
            *s = (*s).clamp(-limit, limit);
        }

        Self { speeds }
    }

    /// Convert the signed speeds into the winding duties of the motor driver.
    ///
    /// Positive speeds drive the clockwise winding, negative speeds the
    /// counter-clockwise one. Magnitudes are saturated to `max_pwm`.
    pub fn to_duties(&self, max_pwm: u8) -> MechDems {
        let mut dems = MechDems::default();

        for (i, speed) in self.speeds.iter().enumerate() {
            let duty = speed.unsigned_abs().min(max_pwm as u32) as u8;

            if *speed > 0 {
                dems.cw_duty[i] = duty;
            } else if *speed < 0 {
                dems.ccw_duty[i] = duty;
            }
        }

        dems
    }
}
