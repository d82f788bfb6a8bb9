use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use plotters::prelude::*;
use thiserror::Error;

use crate::core::ballistics::Projectile;
use crate::core::sampler::{RunSummary, TrajectorySample};
use crate::core::window::AxisBounds;

const TRAJECTORY_COLOR: RGBColor = RGBColor(255, 165, 0);
const TITLE: &str = "Projectile Trajectory Simulation";

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Could not draw chart: {0}")]
    Draw(String),

    #[error("Could not create chart directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn draw_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Draw(err.to_string())
}

pub fn chart_file_name(now: DateTime<Local>) -> String {
    format!("trajectory_{}.png", now.format("%Y%m%d_%H%M%S"))
}

pub fn launch_legend(projectile: &Projectile) -> String {
    format!(
        "Speed: {} m/s, Angle: {}°, Height: {} m",
        projectile.initial_speed(),
        (projectile.launch_angle_deg() * 1e6).round() / 1e6,
        projectile.initial_height()
    )
}

pub fn summary_legend(summary: &RunSummary) -> String {
    format!(
        "Max Height: {:.2} m, Range: {:.2} m",
        summary.max_height_reached, summary.range_value
    )
}

pub fn save_chart(
    dir: &Path,
    size: (u32, u32),
    projectile: &Projectile,
    samples: &[TrajectorySample],
    summary: &RunSummary,
    bounds: AxisBounds,
) -> Result<PathBuf, ChartError> {
    std::fs::create_dir_all(dir).map_err(|source| ChartError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(chart_file_name(Local::now()));
    render_chart(&path, size, projectile, samples, summary, bounds)?;
    tracing::info!(path = %path.display(), samples = samples.len(), "chart written");
    Ok(path)
}

pub fn render_chart(
    path: &Path,
    size: (u32, u32),
    projectile: &Projectile,
    samples: &[TrajectorySample],
    summary: &RunSummary,
    bounds: AxisBounds,
) -> Result<(), ChartError> {
    let bounds = bounds.fit_samples(samples);
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&BLACK).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, ("sans-serif", 28).into_font().color(&WHITE))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..bounds.x_max, bounds.y_min..bounds.y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .axis_style(WHITE)
        .bold_line_style(WHITE.mix(0.15))
        .light_line_style(WHITE.mix(0.05))
        .label_style(("sans-serif", 14).into_font().color(&WHITE))
        .x_desc("Horizontal Distance (m)")
        .y_desc("Vertical Distance (m)")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.x, s.y)),
            TRAJECTORY_COLOR.stroke_width(2),
        ))
        .map_err(draw_err)?
        .label(launch_legend(projectile))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TRAJECTORY_COLOR));

    if let Some(apex) = samples.iter().max_by(|a, b| a.y.total_cmp(&b.y)) {
        chart
            .draw_series(std::iter::once(Circle::new(
                (apex.x, apex.y),
                4,
                WHITE.filled(),
            )))
            .map_err(draw_err)?
            .label(summary_legend(summary))
            .legend(|(x, y)| Circle::new((x + 10, y), 4, WHITE.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(BLACK.mix(0.8))
        .border_style(WHITE)
        .label_font(("sans-serif", 13).into_font().color(&WHITE))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ballistics::LaunchInputs;
    use crate::core::sampler::{StopPolicy, Termination, TrajectorySampler};
    use crate::core::window::DisplayThresholds;
    use chrono::TimeZone;

    #[test]
    fn file_name_carries_local_timestamp() {
        let now = Local
            .with_ymd_and_hms(2026, 10, 18, 9, 5, 7)
            .single()
            .expect("unambiguous time");
        assert_eq!(chart_file_name(now), "trajectory_20261018_090507.png");
    }

    #[test]
    fn legends_describe_launch_and_result() {
        let projectile = Projectile::new(LaunchInputs {
            speed_mps: 50.0,
            angle_deg: 45.0,
            height_m: 2.5,
        })
        .expect("valid launch");
        assert_eq!(
            launch_legend(&projectile),
            "Speed: 50 m/s, Angle: 45°, Height: 2.5 m"
        );

        let summary = RunSummary {
            max_height_reached: 34.376,
            max_range_reached: 250.0,
            range_value: 257.456,
            samples: 74,
            elapsed_s: 7.4,
            termination: Some(Termination::GroundImpact),
        };
        assert_eq!(
            summary_legend(&summary),
            "Max Height: 34.38 m, Range: 257.46 m"
        );
    }

    #[test]
    fn writes_png_for_a_finished_run() {
        let projectile = Projectile::new(LaunchInputs {
            speed_mps: 30.0,
            angle_deg: 60.0,
            height_m: 1.0,
        })
        .expect("valid launch");
        let (samples, summary) =
            TrajectorySampler::new(projectile, 0.05, StopPolicy::ground_impact())
                .expect("valid sampler")
                .collect()
                .expect("run completes");
        let bounds = AxisBounds::from_hints(&projectile, DisplayThresholds::default(), 50.0, 20.0);
        let dir = std::env::temp_dir().join(format!("parabolic_sim_chart_{}", std::process::id()));

        match save_chart(&dir, (640, 480), &projectile, &samples, &summary, bounds) {
            Ok(path) => {
                assert!(path.starts_with(&dir));
                let written = std::fs::metadata(&path).expect("chart file exists");
                assert!(written.len() > 0);
            }
            // Headless machines without system fonts cannot draw text.
            Err(ChartError::Draw(reason)) => eprintln!("skipping chart check: {reason}"),
            Err(err) => panic!("chart directory not usable: {err}"),
        }
        let _ = std::fs::remove_dir_all(&dir);
    }
}
