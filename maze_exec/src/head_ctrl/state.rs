//! Heading controller state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::Params;
use util::maths::{ang_diff_deg, clamp_sym, deadband};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PID controller holding the calibrated heading.
#[derive(Debug, Clone)]
pub struct HeadCtrl {
    params: Params,

    /// The yaw to hold
    ///
    /// Units: degrees
    target_yaw_deg: f64,

    /// The integral accumulation
    integral: f64,

    /// Previous error
    prev_error: f64,

    /// Previous time the controller was updated or calibrated
    ///
    /// Units: milliseconds
    prev_time_ms: Option<u64>,

    report: StatusReport
}

/// Status report for the last heading control update.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct StatusReport {
    /// Wrapped heading error
    ///
    /// Units: degrees
    pub error_deg: f64,

    /// Integral accumulation after the update
    pub integral: f64,

    /// Limited controller output before the sign change and deadband
    pub raw_output: f64,

    /// True if the integral hit its limit
    pub integral_limited: bool,

    /// True if the output hit its limit
    pub output_limited: bool
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl HeadCtrl {

    /// Create a new controller with a zero target and no history.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            target_yaw_deg: 0.0,
            integral: 0.0,
            prev_error: 0.0,
            prev_time_ms: None,
            report: StatusReport::default()
        }
    }

    /// Hold the given yaw from now on, clearing the controller's history.
    pub fn calibrate(&mut self, yaw_deg: f64, now_ms: u64) {
        self.target_yaw_deg = yaw_deg;
        self.integral = 0.0;
        self.prev_error = 0.0;
        self.prev_time_ms = Some(now_ms);
        self.report = StatusReport::default();
    }

    /// Get the rotation correction for the current yaw.
    pub fn update(&mut self, yaw_deg: f64, now_ms: u64) -> f64 {
        let error = ang_diff_deg(self.target_yaw_deg - yaw_deg);

        // Time step since the last update. Without a previous time there is
        // no integral accumulation and no derivative.
        let dt = self.prev_time_ms.map(|t0| {
            let dt = (now_ms as f64 - t0 as f64) / 1000.0;
            if dt <= 0.0 {
                self.params.dt_epsilon_s
            }
            else {
                dt
            }
        });

        let mut integral_limited = false;
        let deriv = match dt {
            Some(t) => {
                let unlimited = self.integral + error * t;
                self.integral = clamp_sym(unlimited, self.params.max_integral);
                integral_limited = self.integral != unlimited;

                (error - self.prev_error) / t
            },
            None => 0.0
        };

        let unlimited = self.params.k_p * error
            + self.params.k_i * self.integral
            + self.params.k_d * deriv;
        let out = clamp_sym(unlimited, self.params.max_output);

        self.prev_error = error;
        self.prev_time_ms = Some(now_ms);

        let correction = deadband(
            -out,
            self.params.deadband_min,
            self.params.deadband_max
        );

        self.report = StatusReport {
            error_deg: error,
            integral: self.integral,
            raw_output: out,
            integral_limited,
            output_limited: out != unlimited
        };

        trace!(
            "HeadCtrl: err {:.2} deg, int {:.2}, out {:.2}, corr {:.2}",
            error, self.integral, out, correction
        );

        correction
    }

    /// Get the yaw being held.
    pub fn target_yaw_deg(&self) -> f64 {
        self.target_yaw_deg
    }

    /// Get the current integral accumulation.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Get the report from the last update.
    pub fn report(&self) -> StatusReport {
        self.report
    }
}
