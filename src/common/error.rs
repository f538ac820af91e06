//! Error types for landmark_slam

use std::fmt;

/// Main error type for simulation and estimation
#[derive(Debug)]
pub enum SlamError {
    /// Invalid simulator parameter (non-positive world size, negative noise)
    Configuration(String),
    /// Measurement log is inconsistent with the declared problem size
    MalformedLog(String),
    /// A landmark has no observations and therefore no constraints
    UnobservableLandmark(usize),
    /// Numerical computation failed (matrix factorization, etc.)
    Numerical(String),
}

impl fmt::Display for SlamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlamError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            SlamError::MalformedLog(msg) => write!(f, "Malformed log: {}", msg),
            SlamError::UnobservableLandmark(idx) => {
                write!(f, "Landmark {} was never observed", idx)
            }
            SlamError::Numerical(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for SlamError {}

/// Result type alias for simulation and estimation operations
pub type SlamResult<T> = Result<T, SlamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SlamError::Configuration("world_size must be positive".to_string());
        assert_eq!(
            format!("{}", err),
            "Configuration error: world_size must be positive"
        );
    }

    #[test]
    fn test_unobservable_landmark_display() {
        let err = SlamError::UnobservableLandmark(2);
        assert_eq!(format!("{}", err), "Landmark 2 was never observed");
    }
}
