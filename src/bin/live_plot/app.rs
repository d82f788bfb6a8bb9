use macroquad::prelude::*;
use parabolic_sim::console::RunRequest;
use parabolic_sim::{LaunchInputs, SimulationConfig};
use parabolic_sim::logging::init_tracing;

use crate::constants::{
    BACKGROUND, BOTTOM_MARGIN, DEFAULT_ANGLE_DEG, DEFAULT_HEIGHT_M, DEFAULT_SPEED_MPS, GRID_COLOR,
    INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, LEFT_MARGIN, MSAA_SAMPLES, RIGHT_MARGIN,
    TOP_MARGIN, TRAJECTORY_COLOR,
};
use crate::render::{
    PlotFrame, draw_axis_tick_labels, draw_grid, draw_hud, draw_path, world_to_screen,
};
use crate::state::LiveRun;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Projectile Trajectory".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

fn request_from_args() -> Result<RunRequest, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        return Ok(RunRequest {
            inputs: LaunchInputs {
                speed_mps: DEFAULT_SPEED_MPS,
                angle_deg: DEFAULT_ANGLE_DEG,
                height_m: DEFAULT_HEIGHT_M,
            },
            time_step_s: None,
            thresholds: Default::default(),
        });
    }
    RunRequest::from_args(&args).map_err(|err| err.to_string())
}

pub(crate) async fn run() {
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = match SimulationConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "could not load configuration");
            return;
        }
    };
    let request = match request_from_args() {
        Ok(request) => request,
        Err(err) => {
            tracing::error!(
                %err,
                "usage: live_plot [<speed_mps> <angle_deg> <height_m> [time_step_s]]"
            );
            return;
        }
    };
    let mut live = match LiveRun::new(request, &config) {
        Ok(live) => live,
        Err(err) => {
            tracing::error!(%err, "invalid launch");
            return;
        }
    };

    // Closing the window cancels the run first; a second close exits.
    prevent_quit();

    loop {
        let quit = is_quit_requested() || is_key_pressed(KeyCode::Escape);
        if quit {
            if live.is_done() {
                break;
            }
            tracing::info!("window close requested, cancelling run");
            live.cancel();
        }

        live.update(get_frame_time());

        let frame = PlotFrame {
            left: LEFT_MARGIN,
            right: screen_width() - RIGHT_MARGIN,
            top: TOP_MARGIN,
            bottom: screen_height() - BOTTOM_MARGIN,
        };
        let window = live.world_window();

        clear_background(BACKGROUND);
        draw_grid(frame, GRID_COLOR);
        let origin = world_to_screen(vec2(0.0, 0.0), window, frame);
        draw_line(frame.left, origin.y, frame.right, origin.y, 2.0, LIGHTGRAY);
        draw_line(frame.left, frame.top, frame.left, frame.bottom, 2.0, LIGHTGRAY);
        draw_axis_tick_labels(frame, window);
        draw_path(&live.trail, window, frame, 3.0, TRAJECTORY_COLOR);

        if let Some(last) = live.trail.last().copied() {
            let p = world_to_screen(last, window, frame);
            draw_circle(p.x, p.y, 6.0, TRAJECTORY_COLOR);
            draw_circle_lines(p.x, p.y, 6.0, 2.0, WHITE);
        }

        draw_hud(
            &live.projectile,
            &live.summary(),
            &live.status_line,
            live.is_done(),
            screen_width(),
        );

        next_frame().await;
    }
}
