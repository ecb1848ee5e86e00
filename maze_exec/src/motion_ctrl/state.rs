//! Implementations for the MotionCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use serde::Serialize;
use std::convert::Infallible;

// Internal
use super::{MotionCmd, MotionCtrlError, MotionState, Params};
use crate::{
    align_ctrl::{AlignCtrl, AlignMode, AlignOutput, AlignTarget},
    head_ctrl::HeadCtrl,
    loco_ctrl::{self, Direction, DistanceSample, DriveCmd, WheelCmd},
    recov_ctrl::RecovCtrl,
    void_det::{VoidDet, VoidFlags},
};
use comms_if::eqpt::mech::MechDems;
use util::{
    archive::{Archived, Archiver},
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Motion control module state
pub struct MotionCtrl {
    params: Params,

    state: MotionState,

    /// Facing of the robot in the maze
    dir: Direction,

    head_ctrl: HeadCtrl,
    align_ctrl: AlignCtrl,
    void_det: VoidDet,
    recov_ctrl: RecovCtrl,

    /// Side distances to align to, `None` until the first calibration
    align_target: Option<AlignTarget>,

    /// Pause to add once the current reverse has finished
    ///
    /// Units: milliseconds
    queued_pause_ms: u64,

    /// Consecutive ticks with the front under the minimum clearance
    num_collision_ticks: u32,

    /// Consecutive ticks with enough void sides to suggest a lift
    num_lift_ticks: u32,

    /// Time of the last processed tick
    ///
    /// Units: milliseconds
    now_ms: u64,

    report: StatusReport,
    arch_report: Archiver,

    output: OutputData,
    arch_output: Archiver,
}

/// Input data to Motion Control.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputData {
    /// Time since the previous tick
    ///
    /// Units: milliseconds
    pub elapsed_ms: u64,

    /// Monotonic time of this tick
    ///
    /// Units: milliseconds
    pub now_ms: u64,

    /// Facing-relative range readings
    pub dist: DistanceSample,

    /// Yaw estimate
    ///
    /// Units: degrees
    pub yaw_deg: f64,

    /// The command to execute, or `None` if there is no new command on this
    /// cycle.
    pub cmd: Option<MotionCmd>,
}

/// Output of MotionCtrl for the motor driver.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutputData {
    /// Direction the drive command was mixed along
    pub drive_dir: Direction,

    /// Limited drive command
    pub drive: DriveCmd,

    /// Signed wheel speeds
    pub wheels: WheelCmd,

    /// Winding duties for the motor driver
    pub dems: MechDems,
}

/// Status report for MotionCtrl processing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusReport {
    /// State at the end of the tick
    pub state: MotionState,

    /// Facing at the end of the tick
    pub dir: Direction,

    /// Void flags observed on this tick
    pub voids: VoidFlags,

    /// Alignment correction applied, if the robot was driving
    pub align: Option<AlignOutput>,

    /// Heading correction applied, if the robot was driving
    pub head_correction: Option<i32>,

    /// True if the command given on this tick could not be executed in the
    /// current state
    pub cmd_rejected: bool,

    /// True if the state changed during this tick
    pub state_changed: bool,
}

/// Flat record of one tick written to the output archive.
#[derive(Serialize)]
struct OutputRecord {
    time_ms: u64,
    drive_dir: Direction,
    forward: i32,
    lateral: i32,
    rotation: i32,
    wheel_0: i32,
    wheel_1: i32,
    wheel_2: i32,
    wheel_3: i32,
}

/// Flat record of one tick written to the status report archive.
#[derive(Serialize)]
struct ReportRecord {
    time_ms: u64,
    state: &'static str,
    remaining_ms: u64,
    dir: Direction,
    void_front: bool,
    void_right: bool,
    void_back: bool,
    void_left: bool,
    align_mode: Option<AlignMode>,
    head_correction: Option<i32>,
    head_error_deg: f64,
    head_integral: f64,
    recov_mode: u64,
    cmd_rejected: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for MotionCtrl {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl State for MotionCtrl {
    type InitData = &'static str;
    type InitError = MotionCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the MotionCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        // Load and check the parameters
        let params: Params = params::load(init_data)
            .map_err(MotionCtrlError::ParamLoadError)?;
        params.validate()?;

        *self = Self::new(params);

        // Initialise the archivers
        self.arch_report = Archiver::from_path(
            session, "motion_ctrl/status_report.csv"
        ).map_err(|e| MotionCtrlError::ArchiveInitError(e.to_string()))?;
        self.arch_output = Archiver::from_path(
            session, "motion_ctrl/output.csv"
        ).map_err(|e| MotionCtrlError::ArchiveInitError(e.to_string()))?;

        Ok(())
    }

    /// Perform cyclic processing of Motion Control.
    ///
    /// Nothing in the tick can fail, anomalies are handled by state
    /// transitions and limits.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let prev_state = self.state;
        self.now_ms = input_data.now_ms;

        // Clear the status report
        self.report = StatusReport::default();

        // Countdowns consume the elapsed time before anything else, so expiry
        // takes effect on this tick and a countdown started by this tick's
        // command runs in full.
        self.run_countdowns(input_data.elapsed_ms);

        // Handle the command before the void detector so that a recalibration
        // seeds the detector from this tick's sample.
        if let Some(cmd) = input_data.cmd {
            self.handle_cmd(cmd, input_data);
        }

        // The detector sees every sample so its history stays current
        // whichever state we are in.
        let voids = self.void_det.update(&input_data.dist);
        self.report.voids = voids;

        let (drive_dir, drive) = match self.state {
            MotionState::Stopped | MotionState::Paused(_) =>
                (self.dir, DriveCmd::STOP),
            MotionState::BackingOff(_) =>
                (self.dir, self.backoff_cmd()),
            MotionState::Active =>
                self.proc_active(input_data, &voids),
            MotionState::Recovering =>
                self.proc_recovering(input_data, &voids),
        };

        // Limit every axis before mixing
        let drive = drive.clamped(self.params.max_pwm as i32);
        let wheels = loco_ctrl::mix(drive_dir, &drive)
            .clamped(self.params.max_pwm as i32);

        let output = OutputData {
            drive_dir,
            drive,
            wheels,
            dems: wheels.to_duties(self.params.max_pwm),
        };

        self.report.state = self.state;
        self.report.dir = self.dir;
        self.report.state_changed = self.state.name() != prev_state.name();

        trace!(
            "MotionCtrl {:?} facing {:?}: {:?} -> {:?}",
            self.state, self.dir, drive, wheels.speeds
        );

        self.output = output;

        Ok((output, self.report))
    }
}

impl Archived for MotionCtrl {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let o = &self.output;
        self.arch_output.serialise(OutputRecord {
            time_ms: self.now_ms,
            drive_dir: o.drive_dir,
            forward: o.drive.forward,
            lateral: o.drive.lateral,
            rotation: o.drive.rotation,
            wheel_0: o.wheels.speeds[0],
            wheel_1: o.wheels.speeds[1],
            wheel_2: o.wheels.speeds[2],
            wheel_3: o.wheels.speeds[3],
        })?;

        let r = &self.report;
        let head = self.head_ctrl.report();
        self.arch_report.serialise(ReportRecord {
            time_ms: self.now_ms,
            state: r.state.name(),
            remaining_ms: r.state.remaining_ms(),
            dir: r.dir,
            void_front: r.voids.front,
            void_right: r.voids.right,
            void_back: r.voids.back,
            void_left: r.voids.left,
            align_mode: r.align.map(|a| a.mode),
            head_correction: r.head_correction,
            head_error_deg: head.error_deg,
            head_integral: head.integral,
            recov_mode: self.recov_ctrl.report().mode,
            cmd_rejected: r.cmd_rejected,
        })?;

        Ok(())
    }
}

impl MotionCtrl {

    /// Create a new controller in the `Stopped` state facing north.
    ///
    /// The archives are not opened, use `State::init` for that.
    pub fn new(params: Params) -> Self {
        Self {
            head_ctrl: HeadCtrl::new(params.head_ctrl.clone()),
            align_ctrl: AlignCtrl::new(params.align_ctrl.clone()),
            void_det: VoidDet::new(params.void_det.clone()),
            recov_ctrl: RecovCtrl::new(params.recov_ctrl.clone()),
            params,
            state: MotionState::Stopped,
            dir: Direction::North,
            align_target: None,
            queued_pause_ms: 0,
            num_collision_ticks: 0,
            num_lift_ticks: 0,
            now_ms: 0,
            report: StatusReport::default(),
            arch_report: Archiver::default(),
            output: OutputData::default(),
            arch_output: Archiver::default(),
        }
    }

    /// Get the current state.
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Get the current facing.
    pub fn direction(&self) -> Direction {
        self.dir
    }

    /// Get the facing the controller will have once `cmd` is handled.
    ///
    /// Callers rotating absolute readings into a facing-relative sample must
    /// use this rather than `direction()`, otherwise the sample on a turn
    /// tick is built for the old facing.
    pub fn facing_after(&self, cmd: Option<MotionCmd>) -> Direction {
        match cmd {
            Some(MotionCmd::TurnLeft) => self.dir.turned_left(),
            Some(MotionCmd::TurnRight) => self.dir.turned_right(),
            _ => self.dir
        }
    }

    /// Get the calibrated alignment target, if any.
    pub fn align_target(&self) -> Option<AlignTarget> {
        self.align_target
    }

    /// Get the parameters in use.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Execute a command.
    fn handle_cmd(&mut self, cmd: MotionCmd, input: &InputData) {
        debug!("MotionCtrl command: {:?}", cmd);

        match cmd {
            MotionCmd::Start => match self.state {
                MotionState::Stopped => self.set_state(MotionState::Active),
                _ => self.reject(cmd),
            },
            MotionCmd::Stop => {
                self.queued_pause_ms = 0;
                self.set_state(MotionState::Stopped)
            },
            MotionCmd::Recalibrate => {
                let target = AlignTarget::from_sample(&input.dist);
                info!(
                    "Calibrated: left {}, right {}, yaw {:.2} deg",
                    target.left, target.right, input.yaw_deg
                );

                self.align_target = Some(target);
                self.head_ctrl.calibrate(input.yaw_deg, input.now_ms);
                self.void_det.reset();
            },
            MotionCmd::TurnLeft | MotionCmd::TurnRight => {
                self.dir = self.facing_after(Some(cmd));
                info!("Now facing {:?}", self.dir);

                // Each side now sees through a different sensor
                self.void_det.reset();
            },
            MotionCmd::Pause(ms) => match self.state {
                MotionState::Stopped => self.reject(cmd),
                MotionState::Paused(t) =>
                    self.state = MotionState::Paused(t.saturating_add(ms)),
                MotionState::BackingOff(_) =>
                    self.queued_pause_ms = self.queued_pause_ms.saturating_add(ms),
                MotionState::Active | MotionState::Recovering =>
                    self.set_state(MotionState::Paused(ms)),
            },
        }
    }

    /// Decrement the active countdown and move on any that expire.
    fn run_countdowns(&mut self, elapsed_ms: u64) {
        match self.state {
            MotionState::Paused(t) => {
                let t = t.saturating_sub(elapsed_ms);
                if t == 0 {
                    self.set_state(MotionState::Active)
                }
                else {
                    self.state = MotionState::Paused(t)
                }
            },
            MotionState::BackingOff(t) => {
                let t = t.saturating_sub(elapsed_ms);
                if t == 0 {
                    let pause = self.params.pause_after_backoff_ms
                        .saturating_add(self.queued_pause_ms);
                    self.queued_pause_ms = 0;
                    self.set_state(MotionState::Paused(pause))
                }
                else {
                    self.state = MotionState::BackingOff(t)
                }
            },
            _ => ()
        }
    }

    /// Drive along the facing with alignment and heading corrections.
    fn proc_active(&mut self, input: &InputData, voids: &VoidFlags)
        -> (Direction, DriveCmd)
    {
        let front = input.dist.front;

        // ---- COLLISION ----

        if front < self.params.min_front_dist {
            self.num_collision_ticks += 1;
        }
        else {
            self.num_collision_ticks = 0;
        }

        if self.num_collision_ticks >= self.params.collision_confirm_ticks {
            warn!("Obstacle at {} ahead, backing off", front);
            self.set_state(MotionState::BackingOff(self.params.backoff_ms));
            return (self.dir, self.backoff_cmd())
        }

        // ---- LIFT ----

        if voids.count() >= self.params.lift_void_sides {
            self.num_lift_ticks += 1;
        }
        else {
            self.num_lift_ticks = 0;
        }

        if self.num_lift_ticks >= self.params.lift_confirm_ticks {
            warn!("{} sides void, starting recovery", voids.count());
            self.set_state(MotionState::Recovering);
            return self.recov_ctrl.tick(0)
        }

        // ---- CORRECTIONS ----

        let mut forward = if front < self.params.max_front_dist {
            self.params.danger_speed
        }
        else {
            self.params.base_speed
        };

        let align = match self.align_target {
            Some(ref target) => self.align_ctrl.update(
                &input.dist, voids, target, input.now_ms
            ),
            None => AlignOutput::default()
        };

        if let Some(f) = align.forward_override {
            forward = f;
        }

        let head = self.head_ctrl.update(input.yaw_deg, input.now_ms).round() as i32;

        self.report.align = Some(align);
        self.report.head_correction = Some(head);

        (self.dir, DriveCmd::new(forward, align.lateral, align.rotation + head))
    }

    /// Run recovery until the robot looks to be back on the ground.
    fn proc_recovering(&mut self, input: &InputData, voids: &VoidFlags)
        -> (Direction, DriveCmd)
    {
        if voids.count() < self.params.lift_void_sides {
            info!("Walls back in view, ending recovery");
            self.set_state(MotionState::Active);
            return self.proc_active(input, voids)
        }

        self.recov_ctrl.tick(input.elapsed_ms)
    }

    /// Straight reverse used while backing off.
    fn backoff_cmd(&self) -> DriveCmd {
        DriveCmd::new(-self.params.backoff_speed, 0, 0)
    }

    /// Move to a new state, resetting whatever the new state needs fresh.
    fn set_state(&mut self, state: MotionState) {
        // An empty pause is no pause at all
        let state = match state {
            MotionState::Paused(0) => MotionState::Active,
            s => s,
        };

        if state.name() != self.state.name() {
            info!("MotionCtrl {} -> {}", self.state.name(), state.name());
        }

        match state {
            MotionState::Active => {
                self.num_collision_ticks = 0;
                self.num_lift_ticks = 0;
            },
            MotionState::Recovering => self.recov_ctrl.reset(),
            _ => ()
        }

        self.state = state;
    }

    /// Note that a command cannot be executed in the current state.
    fn reject(&mut self, cmd: MotionCmd) {
        warn!("Cannot execute {:?} while {}", cmd, self.state.name());
        self.report.cmd_rejected = true;
    }
}
