//! Parameters structure for MotionCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use super::MotionCtrlError;
use crate::{align_ctrl, head_ctrl, recov_ctrl, void_det};
use crate::loco_ctrl::NUM_DIRECTIONS;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for motion control.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Params {

    // ---- DRIVE ----

    /// Limit applied to each drive axis and to the wheel duties.
    pub max_pwm: u8,

    /// Forward speed with a clear path ahead.
    pub base_speed: i32,

    /// Forward speed with an obstacle ahead.
    pub danger_speed: i32,

    /// Reverse speed while backing off.
    pub backoff_speed: i32,

    // ---- CLEARANCES ----

    /// Front reading below which a collision is imminent.
    pub min_front_dist: u8,

    /// Front reading below which the robot slows to the danger speed.
    pub max_front_dist: u8,

    // ---- TIMINGS ----

    /// Duration of the reverse after a collision.
    ///
    /// Units: milliseconds
    pub backoff_ms: u64,

    /// Duration of the pause that follows a reverse.
    ///
    /// Units: milliseconds
    pub pause_after_backoff_ms: u64,

    /// Consecutive ticks under the minimum front clearance needed to back off.
    pub collision_confirm_ticks: u32,

    // ---- LIFT DETECTION ----

    /// Number of void sides that suggest the robot has been lifted.
    ///
    /// An open area ahead with both side walls gone reads as three void
    /// sides, so anything below four treats open floor as a lift.
    pub lift_void_sides: usize,

    /// Consecutive ticks with that many void sides needed to start recovery.
    pub lift_confirm_ticks: u32,

    // ---- SUB MODULES ----

    pub head_ctrl: head_ctrl::Params,

    pub align_ctrl: align_ctrl::Params,

    pub void_det: void_det::Params,

    pub recov_ctrl: recov_ctrl::Params
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            max_pwm: 255,
            base_speed: 120,
            danger_speed: 80,
            backoff_speed: 80,
            min_front_dist: 7,
            max_front_dist: 15,
            backoff_ms: 400,
            pause_after_backoff_ms: 300,
            collision_confirm_ticks: 2,
            lift_void_sides: 4,
            lift_confirm_ticks: 5,
            head_ctrl: head_ctrl::Params::default(),
            align_ctrl: align_ctrl::Params::default(),
            void_det: void_det::Params::default(),
            recov_ctrl: recov_ctrl::Params::default()
        }
    }
}

impl Params {
    /// Check that the parameters are consistent with each other.
    pub fn validate(&self) -> Result<(), MotionCtrlError> {
        let invalid = |msg: &str| Err(MotionCtrlError::InvalidParams(msg.into()));

        if self.max_pwm == 0 {
            return invalid("max_pwm must be greater than zero")
        }
        if self.base_speed < 0 || self.danger_speed < 0 || self.backoff_speed < 0 {
            return invalid("speeds must not be negative, direction is set by the controller")
        }
        if self.min_front_dist > self.max_front_dist {
            return invalid("min_front_dist must not exceed max_front_dist")
        }
        if self.backoff_ms == 0 {
            return invalid("backoff_ms must be greater than zero")
        }
        if self.collision_confirm_ticks == 0 || self.lift_confirm_ticks == 0 {
            return invalid("confirmation tick counts must be at least one")
        }
        if self.lift_void_sides == 0 || self.lift_void_sides > NUM_DIRECTIONS {
            return invalid("lift_void_sides must be between 1 and 4")
        }

        let head = &self.head_ctrl;
        if head.max_integral < 0.0 || head.max_output < 0.0 {
            return invalid("head_ctrl limits must not be negative")
        }
        if head.deadband_min > head.deadband_max {
            return invalid("head_ctrl.deadband_min must not exceed head_ctrl.deadband_max")
        }
        if head.dt_epsilon_s <= 0.0 {
            return invalid("head_ctrl.dt_epsilon_s must be greater than zero")
        }

        let align = &self.align_ctrl;
        if align.lat_threshold < 0 || align.rot_threshold < 0 {
            return invalid("align_ctrl thresholds must not be negative")
        }

        if self.recov_ctrl.mode_duration_ms == 0 {
            return invalid("recov_ctrl.mode_duration_ms must be greater than zero")
        }

        Ok(())
    }
}
