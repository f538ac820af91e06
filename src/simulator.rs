// Agent simulator for landmark SLAM
//
// A point agent lives in a square world [0, W] x [0, W], moves with additive
// uniform noise under a hard boundary-rejection policy, and senses fixed
// landmarks as noisy relative offsets limited to a sensing range.
//
// Reference:
// - Probabilistic Robotics (Thrun, Burgard, Fox)

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

use crate::common::{Point2D, SlamError, SlamResult};
use crate::log::Observation;

/// Simulator configuration
#[derive(Debug, Clone, Copy)]
pub struct RobotConfig {
    /// Side length of the square world, coordinate domain [0, world_size]
    pub world_size: f64,
    /// Maximum per-axis observation offset; `None` disables the limit
    pub sensing_range: Option<f64>,
    /// Motion noise scale, uniform in [-motion_noise, motion_noise)
    pub motion_noise: f64,
    /// Measurement noise scale, uniform in [-measurement_noise, measurement_noise)
    pub measurement_noise: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        RobotConfig {
            world_size: 100.0,
            sensing_range: Some(30.0),
            motion_noise: 1.0,
            measurement_noise: 1.0,
        }
    }
}

impl RobotConfig {
    fn validate(&self) -> SlamResult<()> {
        if self.world_size <= 0.0 {
            return Err(SlamError::Configuration(format!(
                "world_size must be positive, got {}",
                self.world_size
            )));
        }
        if self.motion_noise < 0.0 {
            return Err(SlamError::Configuration(format!(
                "motion_noise must be non-negative, got {}",
                self.motion_noise
            )));
        }
        if self.measurement_noise < 0.0 {
            return Err(SlamError::Configuration(format!(
                "measurement_noise must be non-negative, got {}",
                self.measurement_noise
            )));
        }
        if let Some(range) = self.sensing_range {
            if range < 0.0 {
                return Err(SlamError::Configuration(format!(
                    "sensing_range must be non-negative, got {}",
                    range
                )));
            }
        }
        Ok(())
    }
}

/// Agent simulator owning the true pose, the landmark map, and the noise source
pub struct RobotSimulator {
    config: RobotConfig,
    pose: Point2D,
    landmarks: Vec<Point2D>,
    rng: StdRng,
    unit_noise: Uniform<f64>,
}

impl RobotSimulator {
    /// Create a simulator with the agent at the exact world center.
    ///
    /// Fails with `SlamError::Configuration` on non-positive world size or
    /// negative noise scales.
    pub fn new(config: RobotConfig, seed: u64) -> SlamResult<Self> {
        config.validate()?;
        let center = config.world_size / 2.0;
        Ok(RobotSimulator {
            config,
            pose: Point2D::new(center, center),
            landmarks: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            unit_noise: Uniform::new(-1.0, 1.0),
        })
    }

    /// True agent pose. For logging and evaluation only; the estimator
    /// never reads it.
    pub fn current_pose(&self) -> Point2D {
        self.pose
    }

    /// Ground-truth landmark positions, for evaluation only.
    pub fn landmarks(&self) -> &[Point2D] {
        &self.landmarks
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Replace the landmark list with `count` landmarks drawn uniformly
    /// over the world, coordinates rounded to the nearest integer.
    pub fn place_landmarks(&mut self, count: usize) {
        let coord = Uniform::new_inclusive(0.0, self.config.world_size);
        self.landmarks = (0..count)
            .map(|_| {
                Point2D::new(
                    coord.sample(&mut self.rng).round(),
                    coord.sample(&mut self.rng).round(),
                )
            })
            .collect();
    }

    /// Replace the landmark list with explicitly chosen positions.
    pub fn set_landmarks(&mut self, landmarks: Vec<Point2D>) {
        self.landmarks = landmarks;
    }

    /// Attempt to displace the agent by (dx, dy) plus motion noise.
    ///
    /// The move is applied only if the noisy destination stays inside
    /// [0, world_size] on both axes; otherwise the pose is left unchanged
    /// and `false` is returned. Rejection is policy, not an error.
    pub fn attempt_move(&mut self, dx: f64, dy: f64) -> bool {
        let sigma = self.config.motion_noise;
        let x = self.pose.x + dx + self.unit_noise.sample(&mut self.rng) * sigma;
        let y = self.pose.y + dy + self.unit_noise.sample(&mut self.rng) * sigma;

        let w = self.config.world_size;
        if x < 0.0 || x > w || y < 0.0 || y > w {
            return false;
        }

        self.pose = Point2D::new(x, y);
        true
    }

    /// Observe every landmark within sensing range.
    ///
    /// Each observation is the offset pose - landmark plus per-axis
    /// measurement noise, reported in landmark-index order. A landmark is
    /// included only if both noisy axis offsets fall within the configured
    /// range (always included when the range is unbounded).
    pub fn sense(&mut self) -> Vec<Observation> {
        let sigma = self.config.measurement_noise;
        let mut observations = Vec::new();

        for (i, lm) in self.landmarks.iter().enumerate() {
            let dx = self.pose.x - lm.x + self.unit_noise.sample(&mut self.rng) * sigma;
            let dy = self.pose.y - lm.y + self.unit_noise.sample(&mut self.rng) * sigma;

            let in_range = match self.config.sensing_range {
                Some(range) => dx.abs() <= range && dy.abs() <= range,
                None => true,
            };

            if in_range {
                observations.push(Observation {
                    landmark: i,
                    dx,
                    dy,
                });
            }
        }

        observations
    }
}
