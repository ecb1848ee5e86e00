//! Heading control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for heading control
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Params {

    /// Proportional gain
    pub k_p: f64,

    /// Integral gain
    pub k_i: f64,

    /// Derivative gain
    pub k_d: f64,

    /// Limit on the magnitude of the integral accumulation.
    ///
    /// Units: degree seconds
    pub max_integral: f64,

    /// Limit on the magnitude of the controller output before the deadband.
    pub max_output: f64,

    /// Corrections smaller than this are dropped.
    pub deadband_min: f64,

    /// Corrections larger than this are limited to it.
    pub deadband_max: f64,

    /// Time step used when the measured step is zero or negative.
    ///
    /// Units: seconds
    pub dt_epsilon_s: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            k_p: 3.0,
            k_i: 0.1,
            k_d: 0.2,
            max_integral: 50.0,
            max_output: 120.0,
            deadband_min: 50.0,
            deadband_max: 200.0,
            dt_epsilon_s: 0.001
        }
    }
}
