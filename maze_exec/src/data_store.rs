//! # Data Store

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::collections::VecDeque;

use comms_if::eqpt::sens::SensFrame;

use crate::motion_ctrl::{self, MotionCmd};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// Time at the start of this cycle since the start of execution
    ///
    /// Units: milliseconds
    pub now_ms: u64,

    /// Time since the start of the previous cycle
    ///
    /// Units: milliseconds
    pub elapsed_ms: u64,

    // Sensors
    /// Latest sensor frame
    pub sens_frame: Option<SensFrame>,

    // Commands
    /// Commands waiting to be given to MotionCtrl, one per cycle
    pub pending_cmds: VecDeque<MotionCmd>,

    // MotionCtrl
    pub motion_ctrl: motion_ctrl::MotionCtrl,
    pub motion_ctrl_input: motion_ctrl::InputData,
    pub motion_ctrl_output: motion_ctrl::OutputData,
    pub motion_ctrl_status_rpt: motion_ctrl::StatusReport,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Updates the cycle timing, clears those items that need clearing at the
    /// start of a cycle and gives the next pending command to MotionCtrl.
    pub fn cycle_start(&mut self, now_ms: u64) {
        self.elapsed_ms = now_ms.saturating_sub(self.now_ms);
        self.now_ms = now_ms;

        self.motion_ctrl_input = motion_ctrl::InputData {
            elapsed_ms: self.elapsed_ms,
            now_ms,
            cmd: self.pending_cmds.pop_front(),
            ..Default::default()
        };
        self.motion_ctrl_output = motion_ctrl::OutputData::default();
        self.motion_ctrl_status_rpt = motion_ctrl::StatusReport::default();
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        self.num_cycles += 1;
    }
}
