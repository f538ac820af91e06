//! landmark_slam - landmark detection and tracking in a bounded 2D world
//!
//! This crate simulates an agent moving through a square world while taking
//! noisy relative measurements of fixed landmarks, and reconstructs the full
//! trajectory together with the landmark map by solving the graph-SLAM
//! weighted least-squares problem over the recorded measurement log.

// Core modules
pub mod common;

// Simulation and estimation modules
pub mod driver;
pub mod estimator;
pub mod log;
pub mod simulator;

// Re-export common types for convenience
pub use common::Point2D;
pub use common::{SlamError, SlamResult};
pub use driver::collect_log;
pub use estimator::{solve, Estimate};
pub use log::{LogEntry, MeasurementLog, Motion, Observation};
pub use simulator::{RobotConfig, RobotSimulator};
