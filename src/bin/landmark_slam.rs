// Landmark SLAM demo
//
// Drives the simulator through a random walk, solves the collected log,
// and reports per-landmark reconstruction error against ground truth.

use gnuplot::{AxesCommon, Caption, Color, Figure, PointSize, PointSymbol};
use itertools::izip;
use std::fs::File;
use std::io::Write;

use landmark_slam::{collect_log, solve, Point2D, RobotConfig, RobotSimulator};

const WORLD_SIZE: f64 = 100.0;
const SENSING_RANGE: f64 = 50.0;
const MOTION_NOISE: f64 = 0.5;
const MEASUREMENT_NOISE: f64 = 0.5;
const N_LANDMARKS: usize = 5;
const TIME_STEPS: usize = 100;
const STEP_DISTANCE: f64 = 2.0;
const SEED: u64 = 42;

const SHOW_ANIMATION: bool = false;

fn main() {
    println!("Landmark SLAM start!");

    let config = RobotConfig {
        world_size: WORLD_SIZE,
        sensing_range: Some(SENSING_RANGE),
        motion_noise: MOTION_NOISE,
        measurement_noise: MEASUREMENT_NOISE,
    };
    let mut robot = RobotSimulator::new(config, SEED).expect("valid configuration");
    robot.place_landmarks(N_LANDMARKS);
    let true_landmarks: Vec<Point2D> = robot.landmarks().to_vec();

    let log = collect_log(&mut robot, TIME_STEPS, STEP_DISTANCE, SEED + 1)
        .expect("data collection failed");
    println!("collected {} log entries", log.len());

    let anchor = Point2D::new(WORLD_SIZE / 2.0, WORLD_SIZE / 2.0);
    let estimate = solve(
        &log,
        TIME_STEPS + 1,
        N_LANDMARKS,
        anchor,
        MOTION_NOISE,
        MEASUREMENT_NOISE,
    )
    .expect("solve failed");

    println!("\nLandmark reconstruction:");
    println!("{:>8} {:>16} {:>16} {:>8}", "index", "truth", "estimate", "error");
    for (i, truth, est) in izip!(0.., &true_landmarks, &estimate.landmarks) {
        println!(
            "{:>8} ({:6.2}, {:6.2}) ({:6.2}, {:6.2}) {:8.3}",
            i, truth.x, truth.y, est.x, est.y, truth.distance(est)
        );
    }

    let final_true = robot.current_pose();
    let final_est = estimate.poses.last().expect("at least one pose");
    println!("\nFinal pose error: {:.3}", final_true.distance(final_est));

    let est_x: Vec<f64> = estimate.poses.iter().map(|p| p.x).collect();
    let est_y: Vec<f64> = estimate.poses.iter().map(|p| p.y).collect();
    let lm_x: Vec<f64> = true_landmarks.iter().map(|p| p.x).collect();
    let lm_y: Vec<f64> = true_landmarks.iter().map(|p| p.y).collect();
    let est_lm_x: Vec<f64> = estimate.landmarks.iter().map(|p| p.x).collect();
    let est_lm_y: Vec<f64> = estimate.landmarks.iter().map(|p| p.y).collect();

    if SHOW_ANIMATION {
        let mut fig = Figure::new();
        fig.axes2d()
            .set_title("Landmark SLAM", &[])
            .set_x_label("x", &[])
            .set_y_label("y", &[])
            .set_aspect_ratio(gnuplot::Fix(1.0))
            .points(
                &lm_x,
                &lm_y,
                &[Caption("Landmarks"), Color("black"), PointSymbol('*'), PointSize(2.0)],
            )
            .points(
                &est_lm_x,
                &est_lm_y,
                &[Caption("Estimated landmarks"), Color("red"), PointSymbol('x'), PointSize(2.0)],
            )
            .lines(&est_x, &est_y, &[Caption("Estimated trajectory"), Color("red")]);
        fig.show_and_keep_running().expect("gnuplot failed");
    }

    let svg_path = "./img/landmark_slam.svg";
    std::fs::create_dir_all("./img").expect("Failed to create img directory");
    save_svg(svg_path, WORLD_SIZE, &est_x, &est_y, &lm_x, &lm_y, &est_lm_x, &est_lm_y);
    println!("Plot saved to {}", svg_path);
}

/// Save a fixed-scale SVG plot of the world; the domain is [0, W] on both
/// axes so no autoscaling is needed.
fn save_svg(
    path: &str,
    world_size: f64,
    est_x: &[f64],
    est_y: &[f64],
    lm_x: &[f64],
    lm_y: &[f64],
    est_lm_x: &[f64],
    est_lm_y: &[f64],
) {
    let size = 540.0;
    let margin = 20.0;
    let scale = (size - 2.0 * margin) / world_size;
    let tx = |x: f64| margin + x * scale;
    let ty = |y: f64| size - margin - y * scale;

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">
<rect width="100%" height="100%" fill="white"/>
<rect x="{m}" y="{m}" width="{w:.1}" height="{w:.1}" fill="none" stroke="#999"/>
"##,
        s = size,
        m = margin,
        w = world_size * scale
    ));

    // Estimated trajectory (red)
    if est_x.len() > 1 {
        svg.push_str("<polyline fill=\"none\" stroke=\"red\" stroke-width=\"1.5\" points=\"");
        for (x, y) in est_x.iter().zip(est_y.iter()) {
            svg.push_str(&format!("{:.1},{:.1} ", tx(*x), ty(*y)));
        }
        svg.push_str("\"/>\n");
    }

    // True landmarks (black circles)
    for (x, y) in lm_x.iter().zip(lm_y.iter()) {
        svg.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="black"/>"#,
            tx(*x),
            ty(*y)
        ));
        svg.push('\n');
    }

    // Estimated landmarks (red crosses)
    for (x, y) in est_lm_x.iter().zip(est_lm_y.iter()) {
        let (cx, cy) = (tx(*x), ty(*y));
        svg.push_str(&format!(
            r#"<path d="M {x1:.1} {y1:.1} L {x2:.1} {y2:.1} M {x1:.1} {y2:.1} L {x2:.1} {y1:.1}" stroke="red" stroke-width="1.5"/>"#,
            x1 = cx - 4.0,
            y1 = cy - 4.0,
            x2 = cx + 4.0,
            y2 = cy + 4.0
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");

    let mut file = File::create(path).expect("Failed to create SVG file");
    file.write_all(svg.as_bytes()).expect("Failed to write SVG");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_svg_writes_complete_document() {
        let path = std::env::temp_dir().join("landmark_slam_plot_test.svg");
        let path = path.to_str().expect("temp path");

        save_svg(
            path,
            10.0,
            &[5.0, 6.0, 6.0],
            &[5.0, 5.0, 6.0],
            &[5.0],
            &[5.0],
            &[5.1],
            &[4.9],
        );

        let svg = std::fs::read_to_string(path).expect("read plot back");
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r##"stroke="#999""##));
        assert!(svg.contains("<polyline"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
