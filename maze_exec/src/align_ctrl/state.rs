//! Alignment controller state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::Params;
use crate::loco_ctrl::DistanceSample;
use crate::void_det::VoidFlags;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Side distances captured at calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlignTarget {
    pub left: u8,
    pub right: u8,
    pub sum: i32
}

/// Corrections produced by alignment control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignOutput {
    pub mode: AlignMode,

    /// Lateral correction, positive toward the robot's right
    pub lateral: i32,

    /// Rotation correction
    pub rotation: i32,

    /// Forward speed to use instead of the nominal one
    pub forward_override: Option<i32>
}

/// Alignment controller holding the rotation sign search.
#[derive(Debug, Clone)]
pub struct AlignCtrl {
    params: Params,

    /// Sign of the rotation correction, true for positive
    toggle: bool,

    /// Time the rotation sign was last checked, `None` outside rotational
    /// alignment
    ///
    /// Units: milliseconds
    last_check_ms: Option<u64>,

    /// Error magnitude at the last check
    prev_error: i32
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The correction applied on the last update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlignMode {
    /// A side wall is missing, nothing to align to
    Suppressed,

    /// Squaring up to the walls
    Rotational,

    /// Strafing back to the centre
    Lateral,

    /// Within both thresholds
    Centred
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AlignTarget {
    /// Capture the target from the side readings of a sample.
    pub fn from_sample(sample: &DistanceSample) -> Self {
        Self {
            left: sample.left,
            right: sample.right,
            sum: sample.left as i32 + sample.right as i32
        }
    }
}

impl Default for AlignMode {
    fn default() -> Self {
        AlignMode::Centred
    }
}

impl AlignCtrl {

    /// Create a new controller with a positive rotation sign.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            toggle: true,
            last_check_ms: None,
            prev_error: 0
        }
    }

    /// Compute the alignment corrections for the given sample.
    pub fn update(
        &mut self,
        sample: &DistanceSample,
        voids: &VoidFlags,
        target: &AlignTarget,
        now_ms: u64
    ) -> AlignOutput {
        if voids.lateral() {
            self.last_check_ms = None;
            return AlignOutput {
                mode: AlignMode::Suppressed,
                ..Default::default()
            }
        }

        let left = sample.left as i32;
        let right = sample.right as i32;

        // ---- ROTATIONAL ----

        let rot_error = (left + right - target.sum).abs();

        if rot_error > self.params.rot_threshold {
            self.check_toggle(rot_error, now_ms);

            let rotation = if self.toggle {
                self.params.rot_speed
            }
            else {
                -self.params.rot_speed
            };

            trace!(
                "AlignCtrl: rotational, err {}, rotation {}",
                rot_error, rotation
            );

            return AlignOutput {
                mode: AlignMode::Rotational,
                lateral: 0,
                rotation,
                forward_override: Some(0)
            }
        }

        self.last_check_ms = None;

        // ---- LATERAL ----

        let shift = (left - target.left as i32) + (target.right as i32 - right);

        if shift.abs() > self.params.lat_threshold {
            // Positive shift means there is more room on the left
            let lateral = -shift.signum() * self.params.lat_speed;

            trace!("AlignCtrl: lateral, shift {}, lateral {}", shift, lateral);

            return AlignOutput {
                mode: AlignMode::Lateral,
                lateral,
                rotation: 0,
                forward_override: None
            }
        }

        AlignOutput::default()
    }

    /// Get the current sign of the rotation correction.
    pub fn toggle(&self) -> bool {
        self.toggle
    }

    /// Flip the rotation sign if the error grew since the last check.
    fn check_toggle(&mut self, error: i32, now_ms: u64) {
        match self.last_check_ms {
            None => {
                self.last_check_ms = Some(now_ms);
                self.prev_error = error;
            },
            Some(t) => {
                if now_ms.saturating_sub(t) >= self.params.toggle_cooldown_ms {
                    if error > self.prev_error {
                        self.toggle = !self.toggle;
                    }

                    self.last_check_ms = Some(now_ms);
                    self.prev_error = error;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample(left: u8, right: u8) -> DistanceSample {
        DistanceSample::new(100, right, 100, left)
    }

    fn target() -> AlignTarget {
        AlignTarget::from_sample(&sample(20, 20))
    }

    #[test]
    fn test_centred() {
        let mut ac = AlignCtrl::new(Params::default());
        let out = ac.update(&sample(25, 15), &VoidFlags::default(), &target(), 0);

        assert_eq!(out, AlignOutput::default());
    }

    #[test]
    fn test_suppressed_by_void() {
        let mut ac = AlignCtrl::new(Params::default());
        let voids = VoidFlags { left: true, ..Default::default() };

        let out = ac.update(&sample(200, 5), &voids, &target(), 0);
        assert_eq!(out.mode, AlignMode::Suppressed);
        assert_eq!((out.lateral, out.rotation, out.forward_override), (0, 0, None));
    }

    #[test]
    fn test_lateral_toward_larger_side() {
        let mut ac = AlignCtrl::new(Params::default());
        let voids = VoidFlags::default();

        // Closer to the right wall, strafe left
        let out = ac.update(&sample(45, 5), &voids, &target(), 0);
        assert_eq!(out.mode, AlignMode::Lateral);
        assert_eq!(out.lateral, -70);
        assert_eq!(out.rotation, 0);
        assert_eq!(out.forward_override, None);

        // Closer to the left wall, strafe right
        let out = ac.update(&sample(5, 45), &voids, &target(), 10);
        assert_eq!(out.lateral, 70);
    }

    #[test]
    fn test_rotational_toggle() {
        let mut ac = AlignCtrl::new(Params::default());
        let voids = VoidFlags::default();

        // Skewed robot, sum of 80 against a target of 40
        let out = ac.update(&sample(40, 40), &voids, &target(), 0);
        assert_eq!(out.mode, AlignMode::Rotational);
        assert_eq!(out.rotation, 80);
        assert_eq!(out.forward_override, Some(0));

        // Error grows but the cooldown has not elapsed
        let out = ac.update(&sample(45, 45), &voids, &target(), 20);
        assert_eq!(out.rotation, 80);

        // Error grew since the first check, flip
        let out = ac.update(&sample(45, 45), &voids, &target(), 50);
        assert_eq!(out.rotation, -80);

        // Error shrinking, hold
        let out = ac.update(&sample(40, 40), &voids, &target(), 100);
        assert_eq!(out.rotation, -80);
        let out = ac.update(&sample(35, 35), &voids, &target(), 150);
        assert_eq!(out.rotation, -80);
    }

    #[test]
    fn test_rotational_reentry_starts_fresh() {
        let mut ac = AlignCtrl::new(Params::default());
        let voids = VoidFlags::default();

        ac.update(&sample(40, 40), &voids, &target(), 0);

        // Square again
        ac.update(&sample(20, 20), &voids, &target(), 30);

        // Back in rotational mode well after the cooldown, the first check
        // only seeds the search so the sign is kept
        let out = ac.update(&sample(50, 50), &voids, &target(), 500);
        assert_eq!(out.rotation, 80);
        assert!(ac.toggle());
    }
}
