//! Main maze robot executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Telecommand processing and handling
//!         - Sensor frame acquisition (from the replayed sensor log)
//!         - Motion control processing
//!         - Archiving of the wheel demands
//!
//! # Modules
//!
//! All modules (e.g. `motion_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use maze_lib::{
    data_store::DataStore,
    loco_ctrl::DistanceSample,
    motion_ctrl::MotionCmd,
    params::MazeExecParams,
    sens_replay::SensReplay,
    tc_processor,
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, trace, warn};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use util::{
    archive::Archived,
    logger::{level_from_str, logger_init},
    module::State,
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of consecutive cycle overruns after which a warning is raised on
/// every cycle rather than once.
const MAX_QUIET_CYCLE_OVERRUNS: u64 = 10;

// ---------------------------------------------------------------------------
// STRUCTURES
// ---------------------------------------------------------------------------

/// Run the maze robot motion controller against recorded sensor data.
#[derive(Debug, StructOpt)]
#[structopt(name = "maze_exec")]
struct Opt {
    /// Path to the telecommand script to execute
    #[structopt(short, long, parse(from_os_str))]
    script: PathBuf,

    /// Path to the sensor log to replay
    #[structopt(short = "S", long, parse(from_os_str))]
    sens: PathBuf,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "maze_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // ---- LOAD PARAMETERS ----

    let exec_params: MazeExecParams = util::params::load(
        "maze_exec.toml"
    ).wrap_err("Could not load exec params")?;

    // Initialise logger
    logger_init(level_from_str(&exec_params.log_level), &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Maze Robot Executable\n");
    info!("Session directory: {:?}", session.session_root);
    debug!("CLI arguments: {:?}", opt);
    info!("Exec parameters loaded\n");

    // ---- INITIALISE TC SOURCE ----

    info!("Loading script from {:?}", opt.script);

    let mut script = ScriptInterpreter::new(&opt.script)
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} TCs",
        script.get_duration(),
        script.get_num_tcs()
    );

    // ---- INITIALISE SENSOR SOURCE ----

    info!("Loading sensor log from {:?}", opt.sens);

    let mut replay = SensReplay::from_path(&opt.sens)
        .wrap_err("Failed to load the sensor log")?;

    info!(
        "Loaded sensor log lasts {:.02} s and contains {} frames\n",
        replay.duration(),
        replay.num_frames()
    );

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.motion_ctrl.init("motion_ctrl.toml", &session)
        .wrap_err("Failed to initialise MotionCtrl")?;
    info!("MotionCtrl init complete");

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s);
    let exec_start_instant = Instant::now();
    let mut script_finished = false;

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();
        let time_s = (cycle_start_instant - exec_start_instant).as_secs_f64();

        // ---- TELECOMMAND PROCESSING ----

        match script.get_pending_tcs(time_s) {
            PendingTcs::None => (),
            PendingTcs::Some(tc_vec) => {
                for tc in tc_vec.iter() {
                    tc_processor::exec(&mut ds, tc);
                }
            },
            PendingTcs::EndOfScript => {
                if !script_finished {
                    info!("End of TC script reached");
                    script_finished = true;
                }
            }
        }

        // Stop once there is nothing left to command and nothing left to see
        if script_finished && ds.pending_cmds.is_empty() && replay.is_finished(time_s) {
            info!("End of sensor log reached, stopping");
            break
        }

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(util::time::seconds_to_millis(time_s));

        // ---- DATA INPUT ----

        let frame = replay.sample_at(time_s);
        ds.sens_frame = Some(frame);

        // Rotate for the facing after this cycle's command, so a turn sees
        // the walls through the right sides
        ds.motion_ctrl_input.dist = DistanceSample::from_absolute(
            frame.ranges(),
            ds.motion_ctrl.facing_after(ds.motion_ctrl_input.cmd)
        );
        ds.motion_ctrl_input.yaw_deg = frame.yaw_deg;

        // ---- CONTROL ALGORITHM PROCESSING ----

        match ds.motion_ctrl.proc(&ds.motion_ctrl_input) {
            Ok((o, r)) => {
                ds.motion_ctrl_output = o;
                ds.motion_ctrl_status_rpt = r;
            },
            Err(e) => match e {}
        }

        trace!(
            "Demands: cw {:?}, ccw {:?}",
            ds.motion_ctrl_output.dems.cw_duty,
            ds.motion_ctrl_output.dems.ccw_duty
        );

        // ---- WRITE ARCHIVES ----

        if exec_params.archive_enabled {
            if let Err(e) = ds.motion_ctrl.write() {
                warn!("Could not write MotionCtrl archives: {}", e);
            }
        }

        // ---- CYCLE MANAGEMENT ----

        ds.cycle_end();

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                ds.num_consec_cycle_overruns += 1;

                if ds.num_consec_cycle_overruns == 1
                    || ds.num_consec_cycle_overruns > MAX_QUIET_CYCLE_OVERRUNS
                {
                    warn!(
                        "Cycle overran by {:.06} s",
                        cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                    );
                }
            }
        }
    }

    // ---- SHUTDOWN ----

    // Leave the wheels at rest
    let time_s = (Instant::now() - exec_start_instant).as_secs_f64();
    ds.pending_cmds.clear();
    ds.pending_cmds.push_back(MotionCmd::Stop);
    ds.cycle_start(util::time::seconds_to_millis(time_s));

    match ds.motion_ctrl.proc(&ds.motion_ctrl_input) {
        Ok((o, _)) => ds.motion_ctrl_output = o,
        Err(e) => match e {}
    }

    if exec_params.archive_enabled {
        ds.motion_ctrl.write().ok();
    }

    info!(
        "Final state {:?} after {} cycles, wheels at rest: {}",
        ds.motion_ctrl.state(),
        ds.num_cycles,
        ds.motion_ctrl_output.dems.is_stopped()
    );

    info!("End of execution");

    Ok(())
}
