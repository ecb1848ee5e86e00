//! # Telecommand processor module
//!
//! The telecommand processor handles various TCs coming from any source.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;

// Internal
use comms_if::tc::Tc;
use crate::data_store::DataStore;
use crate::motion_ctrl::MotionCmd;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Mutates the datastore to send commands to different modules. MotionCtrl
/// takes one command per cycle so commands are queued, except for `Stop`
/// which discards anything still queued and goes first.
pub fn exec(ds: &mut DataStore, tc: &Tc) {
    debug!("Recieved {:?} command", tc);

    match tc {
        Tc::Stop => {
            if !ds.pending_cmds.is_empty() {
                debug!("Discarding {} queued commands", ds.pending_cmds.len());
            }
            ds.pending_cmds.clear();
            ds.pending_cmds.push_back(MotionCmd::Stop);
        },
        _ => ds.pending_cmds.push_back(MotionCmd::from(*tc))
    }
}
