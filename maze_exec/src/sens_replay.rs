//! # Sensor replay
//!
//! Provides recorded sensor frames to the executable in place of the live
//! sensor drivers. Frames are loaded from a CSV file with the columns
//! `time_s,north,east,south,west,yaw_deg` and held until the next frame is
//! due, so the controller always sees the most recent frame.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal
use comms_if::eqpt::sens::SensFrame;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A recorded sequence of sensor frames.
pub struct SensReplay {
    frames: Vec<SensFrame>,

    /// Index of the frame currently being held
    cursor: usize,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SensReplayError {
    #[error("Could not find the sensor log at {0:?}")]
    LogNotFound(PathBuf),

    #[error("Could not read the sensor log: {0}")]
    CsvError(csv::Error),

    #[error("The sensor log contains no frames")]
    LogEmpty,

    #[error("Sensor log is out of order, frame at {0} s follows one at {1} s")]
    OutOfOrder(f64, f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SensReplay {

    /// Load a replay from the sensor log at the given path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SensReplayError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SensReplayError::LogNotFound(path.to_path_buf()))
        }

        let reader = csv::Reader::from_path(path)
            .map_err(SensReplayError::CsvError)?;

        Self::from_csv(reader)
    }

    /// Load a replay from any reader providing the CSV log.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SensReplayError> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, SensReplayError> {
        let mut frames: Vec<SensFrame> = Vec::new();

        for result in reader.deserialize() {
            let frame: SensFrame = result.map_err(SensReplayError::CsvError)?;

            if let Some(prev) = frames.last() {
                if frame.time_s < prev.time_s {
                    return Err(SensReplayError::OutOfOrder(frame.time_s, prev.time_s))
                }
            }

            frames.push(frame);
        }

        if frames.is_empty() {
            return Err(SensReplayError::LogEmpty)
        }

        Ok(Self {
            frames,
            cursor: 0,
        })
    }

    /// Get the frame to use at `time_s`.
    ///
    /// This is the latest frame recorded at or before `time_s`, or the first
    /// frame if the log starts later. Time is expected to move forward between
    /// calls.
    pub fn sample_at(&mut self, time_s: f64) -> SensFrame {
        while self.cursor + 1 < self.frames.len()
            && self.frames[self.cursor + 1].time_s <= time_s
        {
            self.cursor += 1;
        }

        self.frames[self.cursor]
    }

    /// True once `time_s` is past the last recorded frame.
    pub fn is_finished(&self, time_s: f64) -> bool {
        time_s > self.duration()
    }

    /// Get the time of the last frame in the log.
    pub fn duration(&self) -> f64 {
        match self.frames.last() {
            Some(f) => f.time_s,
            None => 0.0,
        }
    }

    /// Get the number of frames in the log.
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const LOG: &str = "\
time_s,north,east,south,west,yaw_deg
0.0,100,20,100,20,0.0
0.5,90,21,110,19,0.5
1.0,80,255,120,20,-1.5
";

    #[test]
    fn test_zero_order_hold() {
        let mut replay = SensReplay::from_reader(LOG.as_bytes()).unwrap();
        assert_eq!(replay.num_frames(), 3);
        assert_eq!(replay.duration(), 1.0);

        assert_eq!(replay.sample_at(0.0).north, 100);
        assert_eq!(replay.sample_at(0.49).north, 100);
        assert_eq!(replay.sample_at(0.5).north, 90);

        let f = replay.sample_at(2.0);
        assert_eq!(f.ranges(), [80, 255, 120, 20]);
        assert_eq!(f.yaw_deg, -1.5);

        assert!(!replay.is_finished(1.0));
        assert!(replay.is_finished(1.01));
    }

    #[test]
    fn test_late_start_holds_first_frame() {
        let log = "time_s,north,east,south,west,yaw_deg\n2.0,50,50,50,50,0.0\n";
        let mut replay = SensReplay::from_reader(log.as_bytes()).unwrap();

        assert_eq!(replay.sample_at(0.0).north, 50);
    }

    #[test]
    fn test_bad_logs() {
        let header = "time_s,north,east,south,west,yaw_deg\n";
        assert!(matches!(
            SensReplay::from_reader(header.as_bytes()),
            Err(SensReplayError::LogEmpty)
        ));

        let out_of_order = format!("{}1.0,1,1,1,1,0\n0.5,1,1,1,1,0\n", header);
        assert!(matches!(
            SensReplay::from_reader(out_of_order.as_bytes()),
            Err(SensReplayError::OutOfOrder(_, _))
        ));

        // Ranges are unsigned bytes
        let bad_range = format!("{}0.0,300,1,1,1,0\n", header);
        assert!(matches!(
            SensReplay::from_reader(bad_range.as_bytes()),
            Err(SensReplayError::CsvError(_))
        ));
    }
}
