//! Facing-relative range samples

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use comms_if::eqpt::sens::NO_RETURN;
use super::{side_to_absolute, Direction, Side, NUM_DIRECTIONS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The four range readings of one tick, indexed relative to the facing.
///
/// A reading of `NO_RETURN` means the sensor saw open space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DistanceSample {
    pub front: u8,
    pub right: u8,
    pub back: u8,
    pub left: u8,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DistanceSample {
    /// Create a new sample from facing-relative readings.
    pub fn new(front: u8, right: u8, back: u8, left: u8) -> Self {
        Self {
            front,
            right,
            back,
            left,
        }
    }

    /// Build a sample from compass-indexed readings (north, east, south,
    /// west) for a robot facing `dir`.
    pub fn from_absolute(readings: [u8; NUM_DIRECTIONS], dir: Direction) -> Self {
        let get = |side| readings[side_to_absolute(dir, side).index()];

        Self {
            front: get(Side::Front),
            right: get(Side::Right),
            back: get(Side::Back),
            left: get(Side::Left),
        }
    }

    /// Get the reading on the given side.
    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Front => self.front,
            Side::Right => self.right,
            Side::Back => self.back,
            Side::Left => self.left,
        }
    }

    /// Get all readings in side order (front, right, back, left).
    pub fn as_array(&self) -> [u8; NUM_DIRECTIONS] {
        [self.front, self.right, self.back, self.left]
    }

    /// Returns true if the sensor on the given side had no return.
    pub fn is_open(&self, side: Side) -> bool {
        self.get(side) == NO_RETURN
    }
}

impl Default for DistanceSample {
    /// A sample with nothing in range on any side.
    fn default() -> Self {
        Self::new(NO_RETURN, NO_RETURN, NO_RETURN, NO_RETURN)
    }
}
