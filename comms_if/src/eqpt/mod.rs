//! # Equipment Interface
//!
//! This module defines the interface structures exchanged with the equipment drivers. The drivers
//! themselves live outside this software.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod mech;
pub mod sens;
