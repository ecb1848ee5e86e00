//! Holonomic drive mixing

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{Direction, DriveCmd, WheelCmd, NUM_WHEELS};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Mix a facing-relative drive command into individual wheel speeds.
///
/// The wheels sit at 90 degree increments around the chassis. The
/// contribution of each axis is computed for a north facing, then rotated by
/// `dir` so that forward always means toward the facing.
///
/// No limits are applied here, callers shall clamp each axis beforehand.
pub fn mix(dir: Direction, cmd: &DriveCmd) -> WheelCmd {
    let contrib = [
        -cmd.lateral + cmd.rotation,
        cmd.forward + cmd.rotation,
        cmd.lateral + cmd.rotation,
        -cmd.forward + cmd.rotation,
    ];

    let mut speeds = [0i32; NUM_WHEELS];

    for (i, speed) in speeds.iter_mut().enumerate() {
        *speed = contrib[(i + NUM_WHEELS - dir.index()) % NUM_WHEELS];
    }

    WheelCmd { speeds }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stop_for_all_directions() {
        for d in Direction::ALL.iter() {
            assert_eq!(mix(*d, &DriveCmd::STOP), WheelCmd::default());
        }
    }

    #[test]
    fn test_forward_north() {
        let w = mix(Direction::North, &DriveCmd::new(120, 0, 0));
        assert_eq!(w.speeds, [0, 120, 0, -120]);
    }

    #[test]
    fn test_pure_rotation() {
        for d in Direction::ALL.iter() {
            let w = mix(*d, &DriveCmd::new(0, 0, -60));
            assert_eq!(w.speeds, [-60; NUM_WHEELS]);
        }
    }

    #[test]
    fn test_rotational_symmetry() {
        let cmds = [
            DriveCmd::new(120, 0, 0),
            DriveCmd::new(80, -70, 15),
            DriveCmd::new(-80, 70, -200),
            DriveCmd::new(0, 255, 0),
        ];

        for cmd in cmds.iter() {
            let north = mix(Direction::North, cmd);

            for d in Direction::ALL.iter() {
                let rotated = mix(*d, cmd);

                for i in 0..NUM_WHEELS {
                    assert_eq!(
                        rotated.speeds[i],
                        north.speeds[(i + NUM_WHEELS - d.index()) % NUM_WHEELS],
                        "wheel {} facing {:?} for {:?}", i, d, cmd
                    );
                }
            }
        }
    }

    #[test]
    fn test_forward_east_uses_lateral_pair() {
        // Facing east the wheels that strafed when facing north now drive
        let w = mix(Direction::East, &DriveCmd::new(100, 0, 0));
        assert_eq!(w.speeds, [-100, 0, 100, 0]);
    }
}
