//! # Maze robot library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access the motion
//! control modules defined inside the maze executable crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Alignment control - keeps the robot centred between the side walls
pub mod align_ctrl;

/// Global data store for the executable
pub mod data_store;

/// Heading control - holds the calibrated yaw with a PID loop
pub mod head_ctrl;

/// Locomotion control module - mixes drive commands into individual wheel commands
pub mod loco_ctrl;

/// Motion control - the state machine composing all other control modules
pub mod motion_ctrl;

/// Executable parameters
pub mod params;

/// Recovery control - open loop manoeuvres to free a stuck or lifted robot
pub mod recov_ctrl;

/// Sensor replay - provides recorded sensor frames in place of the sensor drivers
pub mod sens_replay;

/// Telecommand processor - routes telecommands into the data store
pub mod tc_processor;

/// Void detection - flags sides of the robot with no adjacent wall
pub mod void_det;
