//! Void detector state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Serialize;

// Internal
use super::Params;
use crate::loco_ctrl::{DistanceSample, Side, NUM_DIRECTIONS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Per-side void flags, true meaning there is no wall on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoidFlags {
    pub front: bool,
    pub right: bool,
    pub back: bool,
    pub left: bool
}

/// Hysteresis filter over the side readings.
#[derive(Debug, Clone)]
pub struct VoidDet {
    params: Params,

    /// Readings from the previous tick, in side order
    prev: Option<[u8; NUM_DIRECTIONS]>,

    flags: VoidFlags
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VoidFlags {
    /// Get the flag for the given side.
    pub fn get(&self, side: Side) -> bool {
        match side {
            Side::Front => self.front,
            Side::Right => self.right,
            Side::Back => self.back,
            Side::Left => self.left
        }
    }

    /// Set the flag for the given side.
    pub fn set(&mut self, side: Side, value: bool) {
        match side {
            Side::Front => self.front = value,
            Side::Right => self.right = value,
            Side::Back => self.back = value,
            Side::Left => self.left = value
        }
    }

    /// Number of sides currently flagged as void.
    pub fn count(&self) -> usize {
        Side::ALL.iter().filter(|s| self.get(**s)).count()
    }

    /// True if either the left or right side is void.
    pub fn lateral(&self) -> bool {
        self.left || self.right
    }
}

impl VoidDet {

    /// Create a new detector with no history.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            prev: None,
            flags: VoidFlags::default()
        }
    }

    /// Forget the reading history, the next sample will seed the flags.
    pub fn reset(&mut self) {
        self.prev = None;
    }

    /// Update the flags with the latest sample.
    pub fn update(&mut self, sample: &DistanceSample) -> VoidFlags {
        let readings = sample.as_array();

        match self.prev {
            None => {
                for side in Side::ALL.iter() {
                    self.flags.set(
                        *side,
                        readings[side.index()] >= self.params.open_dist
                    );
                }
            },
            Some(prev) => {
                let delta = self.params.delta_threshold as i32;

                for side in Side::ALL.iter() {
                    let change = readings[side.index()] as i32
                        - prev[side.index()] as i32;

                    if change > delta && !self.flags.get(*side) {
                        debug!("Void opened on {:?} side", side);
                        self.flags.set(*side, true);
                    }
                    else if change < -delta && self.flags.get(*side) {
                        debug!("Void closed on {:?} side", side);
                        self.flags.set(*side, false);
                    }
                }
            }
        }

        self.prev = Some(readings);

        self.flags
    }

    /// Get the current flags.
    pub fn flags(&self) -> VoidFlags {
        self.flags
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::sens::NO_RETURN;

    fn sides(l: u8, r: u8) -> DistanceSample {
        DistanceSample::new(60, r, 60, l)
    }

    #[test]
    fn test_seeded_from_first_sample() {
        let mut vd = VoidDet::new(Params::default());

        let f = vd.update(&DistanceSample::new(30, NO_RETURN, 210, 8));
        assert_eq!(f, VoidFlags { front: false, right: true, back: true, left: false });
        assert_eq!(f.count(), 2);
    }

    #[test]
    fn test_small_outlier_ignored() {
        let mut vd = VoidDet::new(Params::default());
        vd.update(&sides(10, 10));

        // A 30 unit spike and return stays under the 40 unit delta
        assert!(!vd.update(&sides(40, 10)).left);
        assert!(!vd.update(&sides(10, 10)).left);
    }

    #[test]
    fn test_sticky_opening() {
        let mut vd = VoidDet::new(Params::default());
        vd.update(&sides(10, 10));

        // Wall disappears
        assert!(vd.update(&sides(10, 120)).right);

        // Readings drifting about inside the opening keep the flag
        assert!(vd.update(&sides(10, 100)).right);
        assert!(vd.update(&sides(10, 130)).right);
        assert!(vd.update(&sides(10, 95)).right);

        // Wall comes back
        assert!(!vd.update(&sides(10, 12)).right);
        assert!(!vd.update(&sides(10, 14)).right);
    }

    #[test]
    fn test_reset_reseeds() {
        let mut vd = VoidDet::new(Params::default());
        vd.update(&sides(10, 10));
        assert!(vd.update(&sides(10, NO_RETURN)).right);

        // After a reset a far but not open reading clears the flag
        vd.reset();
        assert!(!vd.update(&sides(10, 150)).right);
        assert!(!vd.flags().lateral());
    }
}
