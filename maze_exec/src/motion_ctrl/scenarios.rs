//! Scenario tests for the motion state machine

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::*;
use crate::align_ctrl::AlignMode;
use crate::loco_ctrl::{Direction, DistanceSample, DriveCmd};
use comms_if::eqpt::sens::NO_RETURN;
use util::module::State;

// ---------------------------------------------------------------------------
// HELPERS
// ---------------------------------------------------------------------------

/// Tick period used by the scenarios
const TICK_MS: u64 = 20;

/// Drives a controller through a sequence of ticks.
struct Sim {
    mc: MotionCtrl,
    now_ms: u64,
    yaw_deg: f64,
}

impl Sim {
    fn new() -> Self {
        Self {
            mc: MotionCtrl::new(Params::default()),
            now_ms: 0,
            yaw_deg: 10.0,
        }
    }

    /// A calibrated controller driving down a 20/20 corridor.
    fn active() -> Self {
        let mut sim = Self::new();
        sim.tick(corridor(), Some(MotionCmd::Recalibrate));
        sim.tick(corridor(), Some(MotionCmd::Start));
        assert_eq!(sim.mc.state(), MotionState::Active);
        sim
    }

    fn tick(&mut self, dist: DistanceSample, cmd: Option<MotionCmd>) -> (OutputData, StatusReport) {
        self.tick_for(TICK_MS, dist, cmd)
    }

    fn tick_for(
        &mut self,
        elapsed_ms: u64,
        dist: DistanceSample,
        cmd: Option<MotionCmd>
    ) -> (OutputData, StatusReport) {
        self.now_ms += elapsed_ms;

        let input = InputData {
            elapsed_ms,
            now_ms: self.now_ms,
            dist,
            yaw_deg: self.yaw_deg,
            cmd,
        };

        self.mc.proc(&input).unwrap()
    }

    /// Tick with absolute N/E/S/W ranges, rotated as the executable does.
    fn tick_abs(&mut self, ranges: [u8; 4], cmd: Option<MotionCmd>) -> (OutputData, StatusReport) {
        let dist = DistanceSample::from_absolute(ranges, self.mc.facing_after(cmd));
        self.tick(dist, cmd)
    }
}

fn corridor() -> DistanceSample {
    DistanceSample::new(100, 20, 100, 20)
}

fn wall_ahead() -> DistanceSample {
    DistanceSample::new(5, 20, 100, 20)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[test]
fn test_stopped_until_started() {
    let mut sim = Sim::new();

    for _ in 0..5 {
        let (out, rpt) = sim.tick(corridor(), None);
        assert_eq!(out.drive, DriveCmd::STOP);
        assert!(out.dems.is_stopped());
        assert_eq!(rpt.state, MotionState::Stopped);
    }

    let (out, rpt) = sim.tick(corridor(), Some(MotionCmd::Start));
    assert_eq!(rpt.state, MotionState::Active);
    assert!(rpt.state_changed);
    assert_eq!(out.drive.forward, 120);
}

#[test]
fn test_straight_corridor() {
    let mut sim = Sim::active();

    for _ in 0..50 {
        let (out, rpt) = sim.tick(corridor(), None);

        assert_eq!(rpt.state, MotionState::Active);
        assert_eq!(out.drive, DriveCmd::new(120, 0, 0));
        assert_eq!(out.wheels.speeds, [0, 120, 0, -120]);
        assert_eq!(out.dems.cw_duty, [0, 120, 0, 0]);
        assert_eq!(out.dems.ccw_duty, [0, 0, 0, 120]);
        assert_eq!(rpt.align.map(|a| a.mode), Some(AlignMode::Centred));
        assert_eq!(rpt.head_correction, Some(0));
    }
}

#[test]
fn test_danger_speed() {
    let mut sim = Sim::active();

    let (out, _) = sim.tick(DistanceSample::new(12, 20, 100, 20), None);
    assert_eq!(out.drive.forward, 80);
}

#[test]
fn test_approaching_wall() {
    let params = Params::default();
    let mut sim = Sim::active();

    // One tick under the clearance is not enough
    let (out, rpt) = sim.tick(wall_ahead(), None);
    assert_eq!(rpt.state, MotionState::Active);
    assert_eq!(out.drive.forward, params.danger_speed);

    // The second tick confirms it
    let (out, rpt) = sim.tick(wall_ahead(), None);
    assert_eq!(rpt.state, MotionState::BackingOff(params.backoff_ms));
    assert_eq!(out.drive, DriveCmd::new(-params.backoff_speed, 0, 0));
    assert_eq!(out.wheels.speeds, [0, -80, 0, 80]);

    // Reverse for the whole duration, whatever the sensors say
    let backoff_ticks = params.backoff_ms / TICK_MS;
    for i in 1..backoff_ticks {
        let (out, rpt) = sim.tick(corridor(), None);
        assert_eq!(
            rpt.state,
            MotionState::BackingOff(params.backoff_ms - i * TICK_MS)
        );
        assert_eq!(out.drive, DriveCmd::new(-params.backoff_speed, 0, 0));
    }

    // Expiry moves straight on to the pause
    let (out, rpt) = sim.tick(corridor(), None);
    assert_eq!(rpt.state, MotionState::Paused(params.pause_after_backoff_ms));
    assert_eq!(out.drive, DriveCmd::STOP);

    let pause_ticks = params.pause_after_backoff_ms / TICK_MS;
    for _ in 1..pause_ticks {
        let (out, rpt) = sim.tick(corridor(), None);
        assert!(matches!(rpt.state, MotionState::Paused(_)));
        assert_eq!(out.drive, DriveCmd::STOP);
    }

    // And the pause expiry drives again on the same tick
    let (out, rpt) = sim.tick(corridor(), None);
    assert_eq!(rpt.state, MotionState::Active);
    assert_eq!(out.drive.forward, params.base_speed);
}

#[test]
fn test_collision_needs_consecutive_ticks() {
    let mut sim = Sim::active();

    for _ in 0..10 {
        sim.tick(wall_ahead(), None);
        let (_, rpt) = sim.tick(corridor(), None);
        assert_eq!(rpt.state, MotionState::Active);
    }
}

#[test]
fn test_off_centre() {
    let mut sim = Sim::active();

    // Closer to the right wall, strafe left toward the larger gap
    let (out, rpt) = sim.tick(DistanceSample::new(100, 5, 100, 45), None);
    assert_eq!(rpt.align.map(|a| a.mode), Some(AlignMode::Lateral));
    assert_eq!(out.drive, DriveCmd::new(120, -70, 0));

    // Closer to the left wall, strafe right
    let (out, _) = sim.tick(DistanceSample::new(100, 45, 100, 5), None);
    assert_eq!(out.drive.lateral, 70);
}

#[test]
fn test_skewed_stops_forward() {
    let mut sim = Sim::active();

    let (out, rpt) = sim.tick(DistanceSample::new(100, 35, 100, 35), None);
    assert_eq!(rpt.align.map(|a| a.mode), Some(AlignMode::Rotational));
    assert_eq!(out.drive.forward, 0);
    assert_eq!(out.drive.rotation.abs(), 80);
}

#[test]
fn test_void_side_suppresses_alignment() {
    let mut sim = Sim::active();

    // Opening on the left, the robot is far from centre by the readings but
    // there is nothing to centre against
    let (out, rpt) = sim.tick(DistanceSample::new(100, 10, 100, 180), None);
    assert!(rpt.voids.left);
    assert_eq!(rpt.align.map(|a| a.mode), Some(AlignMode::Suppressed));
    assert_eq!(out.drive, DriveCmd::new(120, 0, 0));
}

#[test]
fn test_heading_correction_added_to_rotation() {
    let mut sim = Sim::active();

    // Knocked 40 degrees off the calibrated heading
    sim.yaw_deg -= 40.0;
    let (out, rpt) = sim.tick(corridor(), None);

    let head = rpt.head_correction.unwrap();
    assert!(head < 0);
    assert_eq!(out.drive.rotation, head);
}

#[test]
fn test_lift_and_recover() {
    let params = Params::default();
    let mut sim = Sim::active();
    let lifted = DistanceSample::new(NO_RETURN, NO_RETURN, NO_RETURN, NO_RETURN);

    for _ in 1..params.lift_confirm_ticks {
        let (_, rpt) = sim.tick(lifted, None);
        assert_eq!(rpt.voids.count(), 4);
        assert_eq!(rpt.state, MotionState::Active);
    }

    let (out, rpt) = sim.tick(lifted, None);
    assert_eq!(rpt.state, MotionState::Recovering);
    assert_eq!(out.drive, DriveCmd::new(params.recov_ctrl.speed, 0, 0));

    // Still lifted, keep trying
    for _ in 0..20 {
        let (_, rpt) = sim.tick(lifted, None);
        assert_eq!(rpt.state, MotionState::Recovering);
    }

    // Put back down between walls
    let (out, rpt) = sim.tick(corridor(), None);
    assert!(rpt.voids.count() < params.lift_void_sides);
    assert_eq!(rpt.state, MotionState::Active);
    assert_eq!(out.drive_dir, Direction::North);
}

#[test]
fn test_open_area_is_not_a_lift() {
    let params = Params::default();
    let mut sim = Sim::new();

    // Walls on both sides, nothing in range ahead
    sim.tick(DistanceSample::new(NO_RETURN, 20, 60, 20), Some(MotionCmd::Recalibrate));
    sim.tick(DistanceSample::new(NO_RETURN, 20, 60, 20), Some(MotionCmd::Start));

    // Both side walls end
    let open = DistanceSample::new(NO_RETURN, NO_RETURN, 60, NO_RETURN);
    for _ in 0..(params.lift_confirm_ticks * 4) {
        let (out, rpt) = sim.tick(open, None);
        assert_eq!(rpt.voids.count(), 3);
        assert_eq!(rpt.state, MotionState::Active);
        assert_eq!(out.drive, DriveCmd::new(params.base_speed, 0, 0));
    }
}

#[test]
fn test_stop_from_any_state() {
    let mut sim = Sim::active();
    sim.tick(wall_ahead(), None);
    let (_, rpt) = sim.tick(wall_ahead(), None);
    assert!(matches!(rpt.state, MotionState::BackingOff(_)));

    let (out, rpt) = sim.tick(wall_ahead(), Some(MotionCmd::Stop));
    assert_eq!(rpt.state, MotionState::Stopped);
    assert_eq!(out.drive, DriveCmd::STOP);

    let (_, rpt) = sim.tick(corridor(), None);
    assert_eq!(rpt.state, MotionState::Stopped);
}

#[test]
fn test_start_rejected_when_running() {
    let mut sim = Sim::active();

    let (_, rpt) = sim.tick(corridor(), Some(MotionCmd::Start));
    assert!(rpt.cmd_rejected);
    assert_eq!(rpt.state, MotionState::Active);
}

#[test]
fn test_paused_precedence() {
    let mut sim = Sim::active();

    let (out, rpt) = sim.tick(corridor(), Some(MotionCmd::Pause(100)));
    assert_eq!(rpt.state, MotionState::Paused(100));
    assert_eq!(out.drive, DriveCmd::STOP);

    // Readings that would normally trigger a back off are ignored
    for _ in 0..4 {
        let (out, rpt) = sim.tick(wall_ahead(), None);
        assert!(matches!(rpt.state, MotionState::Paused(_)));
        assert_eq!(out.drive, DriveCmd::STOP);
    }

    let (out, rpt) = sim.tick(corridor(), None);
    assert_eq!(rpt.state, MotionState::Active);
    assert_eq!(out.drive.forward, 120);
}

#[test]
fn test_pause_accumulates() {
    let mut sim = Sim::active();

    sim.tick(corridor(), Some(MotionCmd::Pause(100)));
    let (_, rpt) = sim.tick(corridor(), Some(MotionCmd::Pause(50)));
    assert_eq!(rpt.state, MotionState::Paused(130));

    // Stopped robots cannot be paused
    sim.tick(corridor(), Some(MotionCmd::Stop));
    let (_, rpt) = sim.tick(corridor(), Some(MotionCmd::Pause(50)));
    assert!(rpt.cmd_rejected);
    assert_eq!(rpt.state, MotionState::Stopped);
}

#[test]
fn test_pause_during_backoff_is_queued() {
    let params = Params::default();
    let mut sim = Sim::active();
    sim.tick(wall_ahead(), None);
    sim.tick(wall_ahead(), None);

    sim.tick(corridor(), Some(MotionCmd::Pause(200)));

    let mut rpt = sim.tick(corridor(), None).1;
    while let MotionState::BackingOff(_) = rpt.state {
        rpt = sim.tick(corridor(), None).1;
    }

    assert_eq!(
        rpt.state,
        MotionState::Paused(params.pause_after_backoff_ms + 200)
    );
}

#[test]
fn test_long_tick_expires_countdown() {
    let mut sim = Sim::active();
    sim.tick(corridor(), Some(MotionCmd::Pause(100)));

    // A single late tick overshooting the countdown still expires it
    let (out, rpt) = sim.tick_for(1000, corridor(), None);
    assert_eq!(rpt.state, MotionState::Active);
    assert_eq!(out.drive.forward, 120);
}

#[test]
fn test_turns() {
    let mut sim = Sim::active();

    let (out, rpt) = sim.tick(corridor(), Some(MotionCmd::TurnRight));
    assert_eq!(rpt.dir, Direction::East);
    assert_eq!(out.wheels.speeds, [-120, 0, 120, 0]);

    sim.tick(corridor(), Some(MotionCmd::TurnLeft));
    let (out, rpt) = sim.tick(corridor(), Some(MotionCmd::TurnLeft));
    assert_eq!(rpt.dir, Direction::West);
    assert_eq!(out.wheels.speeds, [120, 0, -120, 0]);
}

#[test]
fn test_turn_keeps_walls() {
    // Open to the north, walls east and west, far wall south
    let ranges = [NO_RETURN, 20, 100, 20];
    let mut sim = Sim::new();
    sim.tick_abs(ranges, Some(MotionCmd::Recalibrate));
    sim.tick_abs(ranges, Some(MotionCmd::Start));

    let (_, rpt) = sim.tick_abs(ranges, Some(MotionCmd::TurnRight));
    assert_eq!(rpt.dir, Direction::East);

    // Facing east the south wall is on the right and the open north on the
    // left
    for _ in 0..5 {
        let (_, rpt) = sim.tick_abs(ranges, None);
        assert!(!rpt.voids.front);
        assert!(!rpt.voids.right);
        assert!(!rpt.voids.back);
        assert!(rpt.voids.left);
    }
}

#[test]
fn test_recalibrate_any_state() {
    let mut sim = Sim::new();
    assert!(sim.mc.align_target().is_none());

    sim.tick(DistanceSample::new(100, 30, 100, 10), Some(MotionCmd::Recalibrate));
    let target = sim.mc.align_target().unwrap();
    assert_eq!((target.left, target.right, target.sum), (10, 30, 40));
    assert_eq!(sim.mc.state(), MotionState::Stopped);
}

#[test]
fn test_wheels_within_limits() {
    let mut params = Params::default();
    params.base_speed = 400;
    params.max_pwm = 200;

    let mut sim = Sim::new();
    sim.mc = MotionCtrl::new(params);
    sim.tick(corridor(), Some(MotionCmd::Recalibrate));
    sim.tick(corridor(), Some(MotionCmd::Start));

    sim.yaw_deg += 90.0;
    let (out, _) = sim.tick(DistanceSample::new(100, 5, 100, 45), None);

    assert_eq!(out.drive.forward, 200);
    for speed in out.wheels.speeds.iter() {
        assert!(speed.abs() <= 200);
    }
    for i in 0..4 {
        assert!(out.dems.cw_duty[i] <= 200 && out.dems.ccw_duty[i] <= 200);
        assert!(out.dems.cw_duty[i] == 0 || out.dems.ccw_duty[i] == 0);
    }
}
