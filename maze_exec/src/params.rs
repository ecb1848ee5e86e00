//! # Maze Executable Parameters
//!
//! This module provide parameters for the maze executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MazeExecParams {

    /// Target period of one cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Minimum level of log records to output (`"info"`, `"debug"` or `"trace"`)
    pub log_level: String,

    /// Write the MotionCtrl archives every cycle
    pub archive_enabled: bool
}
