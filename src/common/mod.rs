//! Common types and error definitions for landmark_slam
//!
//! This module provides the foundational building blocks shared by the
//! simulator and the estimator.

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
