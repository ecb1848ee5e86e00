//! # Motion control module
//!
//! Motion control is the top level of the controller. Each cycle it takes the
//! latest range sample, yaw and (optionally) a command, decides which mode the
//! robot is in, and produces the wheel demands for that mode by composing the
//! other control modules:
//!
//! | State        | Drive                                                 |
//! |--------------|-------------------------------------------------------|
//! | `Stopped`    | all wheels at rest                                    |
//! | `Paused`     | all wheels at rest until the countdown expires        |
//! | `BackingOff` | straight reverse until the countdown expires          |
//! | `Active`     | forward drive with alignment and heading corrections  |
//! | `Recovering` | open loop manoeuvres from recovery control            |
//!
//! Countdowns are decremented by the elapsed time supplied by the caller, so
//! the module never reads a clock of its own.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

#[cfg(test)]
mod scenarios;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
pub use params::Params;
pub use state::*;
use comms_if::tc::Tc;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during MotionCtrl initialisation.
#[derive(Debug, thiserror::Error)]
pub enum MotionCtrlError {
    #[error("Could not load the MotionCtrl parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Invalid MotionCtrl parameters: {0}")]
    InvalidParams(String),

    #[error("Could not initialise the MotionCtrl archive: {0}")]
    ArchiveInitError(String)
}

/// The mode the robot is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    /// Held at rest until started
    Stopped,

    /// Held at rest for the remaining time
    Paused(u64),

    /// Reversing for the remaining time
    BackingOff(u64),

    /// Driving with corrections
    Active,

    /// Trying to get unstuck
    Recovering
}

/// A trigger for the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MotionCmd {
    Start,
    Stop,
    Recalibrate,
    TurnLeft,
    TurnRight,

    /// Pause for the given number of milliseconds
    Pause(u64)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MotionState {
    /// Name of the state without its countdown.
    pub fn name(&self) -> &'static str {
        match self {
            MotionState::Stopped => "Stopped",
            MotionState::Paused(_) => "Paused",
            MotionState::BackingOff(_) => "BackingOff",
            MotionState::Active => "Active",
            MotionState::Recovering => "Recovering"
        }
    }

    /// Time left on the countdown, zero for states without one.
    pub fn remaining_ms(&self) -> u64 {
        match self {
            MotionState::Paused(t) | MotionState::BackingOff(t) => *t,
            _ => 0
        }
    }
}

impl Default for MotionState {
    fn default() -> Self {
        MotionState::Stopped
    }
}

impl From<Tc> for MotionCmd {
    fn from(tc: Tc) -> Self {
        match tc {
            Tc::Start => MotionCmd::Start,
            Tc::Stop => MotionCmd::Stop,
            Tc::Recalibrate => MotionCmd::Recalibrate,
            Tc::TurnLeft => MotionCmd::TurnLeft,
            Tc::TurnRight => MotionCmd::TurnRight,
            Tc::Pause { duration_ms } => MotionCmd::Pause(duration_ms)
        }
    }
}
