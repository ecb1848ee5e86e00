//! # Communications interface crate.
//!
//! Provides the interface types exchanged between the motion controller and
//! the world around it: telecommands coming in, sensor frames coming in and
//! wheel demands going out.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Telecommand definitions
pub mod tc;

/// Frame definitions for equipment (range sensors, yaw source and drive motors)
pub mod eqpt;
