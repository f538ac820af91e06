// Data-collection driver
//
// Alternates sense and move on the simulator for a fixed number of time
// steps, appending one log entry per accepted motion. Headings are drawn
// uniformly; when the world boundary rejects a move the heading is redrawn
// and the step retried, so a log of T entries always spans T + 1 poses.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use std::f64::consts::PI;

use crate::common::{SlamError, SlamResult};
use crate::log::{LogEntry, MeasurementLog, Motion};
use crate::simulator::RobotSimulator;

// Heading redraws per step before giving up. A step that fits the world at
// all is accepted within a handful of draws; only a step longer than any
// in-bounds displacement exhausts this.
const MAX_HEADING_DRAWS: usize = 1000;

/// Drive the simulator for `time_steps` steps of length `step_distance`,
/// collecting the full measurement log.
///
/// Fails with `SlamError::Configuration` if `step_distance` is too long to
/// fit inside the world from the agent's position in any direction.
pub fn collect_log(
    robot: &mut RobotSimulator,
    time_steps: usize,
    step_distance: f64,
    seed: u64,
) -> SlamResult<MeasurementLog> {
    let mut rng = StdRng::seed_from_u64(seed);
    let heading = Uniform::new(0.0, 2.0 * PI);

    let mut log = MeasurementLog::new();
    let mut angle = heading.sample(&mut rng);

    while log.len() < time_steps {
        let observations = robot.sense();

        // Keep the heading until the boundary forces a turn
        let mut dx = step_distance * angle.cos();
        let mut dy = step_distance * angle.sin();
        let mut draws = 0;
        while !robot.attempt_move(dx, dy) {
            draws += 1;
            if draws >= MAX_HEADING_DRAWS {
                return Err(SlamError::Configuration(format!(
                    "no heading admits a step of {} after {} draws; step_distance \
                     must fit inside the world",
                    step_distance, draws
                )));
            }
            angle = heading.sample(&mut rng);
            dx = step_distance * angle.cos();
            dy = step_distance * angle.sin();
        }

        log.push(LogEntry {
            observations,
            motion: Motion::new(dx, dy),
        });
    }

    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::RobotConfig;

    #[test]
    fn test_collect_log_entry_count() {
        let mut robot = RobotSimulator::new(RobotConfig::default(), 1).unwrap();
        robot.place_landmarks(5);
        let log = collect_log(&mut robot, 30, 1.0, 2).unwrap();
        assert_eq!(log.len(), 30);
    }

    #[test]
    fn test_step_longer_than_world_is_rejected() {
        // No heading can keep a 20-long step inside a 10-wide world, so the
        // driver must give up instead of redrawing headings forever.
        let config = RobotConfig {
            world_size: 10.0,
            sensing_range: None,
            motion_noise: 0.0,
            measurement_noise: 0.0,
        };
        let mut robot = RobotSimulator::new(config, 9).unwrap();
        robot.place_landmarks(1);

        assert!(matches!(
            collect_log(&mut robot, 5, 20.0, 10),
            Err(SlamError::Configuration(_))
        ));
    }

    #[test]
    fn test_unbounded_sensing_observes_all_landmarks_each_step() {
        let config = RobotConfig {
            sensing_range: None,
            ..RobotConfig::default()
        };
        let mut robot = RobotSimulator::new(config, 3).unwrap();
        robot.place_landmarks(4);
        let log = collect_log(&mut robot, 10, 1.0, 4).unwrap();

        for entry in &log {
            assert_eq!(entry.observations.len(), 4);
        }
    }

    #[test]
    fn test_motions_have_commanded_step_length() {
        let mut robot = RobotSimulator::new(RobotConfig::default(), 5).unwrap();
        robot.place_landmarks(3);
        let log = collect_log(&mut robot, 10, 2.0, 6).unwrap();

        for entry in &log {
            let len = (entry.motion.dx.powi(2) + entry.motion.dy.powi(2)).sqrt();
            assert!((len - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_agent_stays_inside_world() {
        // Small world with large steps forces frequent boundary rejections;
        // the pose must stay in bounds throughout.
        let config = RobotConfig {
            world_size: 10.0,
            sensing_range: None,
            motion_noise: 0.5,
            measurement_noise: 0.5,
        };
        let mut robot = RobotSimulator::new(config, 7).unwrap();
        robot.place_landmarks(2);

        collect_log(&mut robot, 50, 4.0, 8).unwrap();
        let pose = robot.current_pose();
        assert!(pose.x >= 0.0 && pose.x <= 10.0);
        assert!(pose.y >= 0.0 && pose.y <= 10.0);
    }
}
