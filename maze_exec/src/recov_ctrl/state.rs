//! Recovery controller state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::Serialize;

// Internal
use super::Params;
use crate::loco_ctrl::{Direction, DriveCmd, NUM_DIRECTIONS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Open loop recovery manoeuvre generator.
#[derive(Debug, Clone)]
pub struct RecovCtrl {
    params: Params,

    /// Time spent in recovery
    ///
    /// Units: milliseconds
    counter_ms: u64,

    rng: SmallRng,

    report: StatusReport
}

/// Status report for the last recovery tick.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StatusReport {
    /// The current recovery mode
    pub mode: u64,

    /// True if the mode spins rather than drives
    pub spinning: bool
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RecovCtrl {

    /// Create a new recovery controller.
    pub fn new(params: Params) -> Self {
        let rng = SmallRng::seed_from_u64(params.seed);

        Self {
            params,
            counter_ms: 0,
            rng,
            report: StatusReport::default()
        }
    }

    /// Restart the manoeuvre sequence from the first mode.
    pub fn reset(&mut self) {
        self.counter_ms = 0;
        self.report = StatusReport::default();
    }

    /// Advance by `elapsed_ms` and get the manoeuvre to perform.
    ///
    /// The returned direction is absolute, the drive command shall be mixed
    /// along it rather than along the robot's facing.
    pub fn tick(&mut self, elapsed_ms: u64) -> (Direction, DriveCmd) {
        self.counter_ms = self.counter_ms.saturating_add(elapsed_ms);

        let mode = self.counter_ms / self.params.mode_duration_ms.max(1);

        if mode != self.report.mode {
            debug!("Recovery mode {} after {} ms", mode, self.counter_ms);
        }

        // Same draws for the whole of a mode
        self.rng = SmallRng::seed_from_u64(self.params.seed.wrapping_add(mode));
        let dir = Direction::from_index(self.rng.gen_range(0..NUM_DIRECTIONS));
        let positive = self.rng.gen_bool(0.5);

        let spinning = mode >= self.params.num_drive_modes && mode % 2 == 1;

        self.report = StatusReport {
            mode,
            spinning
        };

        let cmd = if spinning {
            let rotation = if positive {
                self.params.rotation_speed
            }
            else {
                -self.params.rotation_speed
            };

            DriveCmd::new(0, 0, rotation)
        }
        else {
            DriveCmd::new(self.params.speed, 0, 0)
        };

        (dir, cmd)
    }

    /// Get the report from the last tick.
    pub fn report(&self) -> StatusReport {
        self.report
    }
}
