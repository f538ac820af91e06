// Constraint-based SLAM estimator
//
// Builds the graph-SLAM weighted least-squares problem over a completed
// measurement log: one 2D unknown per pose and per landmark, one relative
// constraint per motion and per observation, plus a high-confidence anchor
// on the first pose to fix the translation gauge. The x and y axes are
// independent and share a single information matrix with two right-hand
// sides.
//
// Ref:
// [A Tutorial on Graph-Based SLAM]
// http://www2.informatik.uni-freiburg.de/~stachnis/pdf/grisetti10titsmag.pdf

use nalgebra::{DMatrix, DVector};

use crate::common::{Point2D, SlamError, SlamResult};
use crate::log::MeasurementLog;

// Weight pinning pose 0 to the anchor. Large against the unit-order
// constraint weights, small enough to keep H well conditioned.
const ANCHOR_WEIGHT: f64 = 1.0e6;

/// Jointly estimated trajectory and landmark map
#[derive(Debug, Clone)]
pub struct Estimate {
    /// One estimated pose per time step, 0..=T
    pub poses: Vec<Point2D>,
    /// One estimated position per landmark index
    pub landmarks: Vec<Point2D>,
}

/// Inverse-variance weight for a noise scale, relative only.
/// A zero scale means an exact constraint; unit weight keeps it finite.
fn constraint_weight(noise: f64) -> f64 {
    if noise > 0.0 {
        1.0 / (noise * noise)
    } else {
        1.0
    }
}

/// Accumulate the relative constraint var[j] - var[i] = (dx, dy) into the
/// information matrix and both right-hand sides.
fn add_relative_constraint(
    h: &mut DMatrix<f64>,
    bx: &mut DVector<f64>,
    by: &mut DVector<f64>,
    i: usize,
    j: usize,
    dx: f64,
    dy: f64,
    weight: f64,
) {
    h[(i, i)] += weight;
    h[(j, j)] += weight;
    h[(i, j)] -= weight;
    h[(j, i)] -= weight;

    bx[i] -= weight * dx;
    bx[j] += weight * dx;
    by[i] -= weight * dy;
    by[j] += weight * dy;
}

/// Check the log against the declared problem size before assembly.
fn validate(log: &MeasurementLog, pose_count: usize, landmark_count: usize) -> SlamResult<()> {
    if pose_count == 0 {
        return Err(SlamError::MalformedLog(
            "pose_count must be at least 1".to_string(),
        ));
    }
    if log.len() + 1 != pose_count {
        return Err(SlamError::MalformedLog(format!(
            "log has {} entries, expected {} for {} poses",
            log.len(),
            pose_count - 1,
            pose_count
        )));
    }

    let mut observed = vec![false; landmark_count];
    for entry in log {
        for obs in &entry.observations {
            if obs.landmark >= landmark_count {
                return Err(SlamError::MalformedLog(format!(
                    "observation references landmark {} but only {} are declared",
                    obs.landmark, landmark_count
                )));
            }
            observed[obs.landmark] = true;
        }
    }
    if let Some(idx) = observed.iter().position(|&seen| !seen) {
        return Err(SlamError::UnobservableLandmark(idx));
    }

    Ok(())
}

/// Solve the full log for maximum-likelihood poses and landmark positions.
///
/// `pose_count` must equal `log.len() + 1`; `anchor` is the known location
/// of the first pose (conventionally the world center). The noise scales
/// act only as relative constraint weights.
pub fn solve(
    log: &MeasurementLog,
    pose_count: usize,
    landmark_count: usize,
    anchor: Point2D,
    motion_noise: f64,
    measurement_noise: f64,
) -> SlamResult<Estimate> {
    validate(log, pose_count, landmark_count)?;

    let n = pose_count + landmark_count;
    let mut h = DMatrix::<f64>::zeros(n, n);
    let mut bx = DVector::<f64>::zeros(n);
    let mut by = DVector::<f64>::zeros(n);

    let w_motion = constraint_weight(motion_noise);
    let w_measurement = constraint_weight(measurement_noise);

    for (t, entry) in log.iter().enumerate() {
        // pose[t] - landmark[k] = observed offset
        for obs in &entry.observations {
            let lm = pose_count + obs.landmark;
            add_relative_constraint(
                &mut h,
                &mut bx,
                &mut by,
                lm,
                t,
                obs.dx,
                obs.dy,
                w_measurement,
            );
        }

        // pose[t + 1] - pose[t] = commanded motion
        add_relative_constraint(
            &mut h,
            &mut bx,
            &mut by,
            t,
            t + 1,
            entry.motion.dx,
            entry.motion.dy,
            w_motion,
        );
    }

    // Anchor pose 0 to fix the translation gauge
    h[(0, 0)] += ANCHOR_WEIGHT;
    bx[0] += ANCHOR_WEIGHT * anchor.x;
    by[0] += ANCHOR_WEIGHT * anchor.y;

    let chol = h
        .cholesky()
        .ok_or_else(|| SlamError::Numerical("information matrix is not positive definite".to_string()))?;
    let xs = chol.solve(&bx);
    let ys = chol.solve(&by);

    let poses = (0..pose_count).map(|i| Point2D::new(xs[i], ys[i])).collect();
    let landmarks = (pose_count..n)
        .map(|i| Point2D::new(xs[i], ys[i]))
        .collect();

    Ok(Estimate { poses, landmarks })
}
