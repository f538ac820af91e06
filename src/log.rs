//! Measurement log: the data interface between simulator and estimator
//!
//! One `LogEntry` is recorded per time step, holding the observations taken
//! at that pose and the motion applied afterwards. Insertion order is
//! chronological order, so a log of T entries spans T + 1 poses.

/// Noisy relative observation of one landmark from the agent's pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Index of the observed landmark
    pub landmark: usize,
    /// Offset pose_x - landmark_x plus measurement noise
    pub dx: f64,
    /// Offset pose_y - landmark_y plus measurement noise
    pub dy: f64,
}

/// Commanded displacement applied between two consecutive poses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub dx: f64,
    pub dy: f64,
}

impl Motion {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// One time step of the log: observations at pose t, then the motion
/// linking pose t to pose t + 1
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub observations: Vec<Observation>,
    pub motion: Motion,
}

/// Ordered sequence of log entries
#[derive(Debug, Clone, Default)]
pub struct MeasurementLog {
    entries: Vec<LogEntry>,
}

impl MeasurementLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a MeasurementLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_preserves_insertion_order() {
        let mut log = MeasurementLog::new();
        for i in 0..3 {
            log.push(LogEntry {
                observations: vec![Observation {
                    landmark: i,
                    dx: i as f64,
                    dy: 0.0,
                }],
                motion: Motion::new(1.0, 0.0),
            });
        }

        assert_eq!(log.len(), 3);
        for (i, entry) in log.iter().enumerate() {
            assert_eq!(entry.observations[0].landmark, i);
        }
    }

    #[test]
    fn test_empty_log() {
        let log = MeasurementLog::new();
        assert!(log.is_empty());
        assert_eq!(log.iter().count(), 0);
    }
}
