use macroquad::prelude::*;
use parabolic_sim::chart::{launch_legend, summary_legend};
use parabolic_sim::{Projectile, RunSummary};

use crate::constants::{LABEL_COLOR, STATUS_Y, TITLE_Y, X_GRID_LINES, Y_GRID_LINES};
use crate::state::WorldWindow;

#[derive(Clone, Copy)]
pub(crate) struct PlotFrame {
    pub(crate) left: f32,
    pub(crate) right: f32,
    pub(crate) top: f32,
    pub(crate) bottom: f32,
}

fn format_axis_value(value: f32, axis_span: f32) -> String {
    if axis_span >= 1000.0 {
        format!("{value:.0}")
    } else if axis_span >= 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn draw_ui_text(text: &str, x: f32, y: f32, font_size: u16, color: Color) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn world_to_screen(world: Vec2, window: WorldWindow, frame: PlotFrame) -> Vec2 {
    let plot_w = (frame.right - frame.left).max(1.0);
    let plot_h = (frame.bottom - frame.top).max(1.0);
    let y_span = (window.y_max - window.y_min).max(1.0);
    let x = frame.left + (world.x / window.x_max.max(1.0)) * plot_w;
    let y = frame.bottom - ((world.y - window.y_min) / y_span) * plot_h;
    vec2(x, y)
}

pub(crate) fn draw_grid(frame: PlotFrame, color: Color) {
    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = frame.left + t * (frame.right - frame.left);
        draw_line(x, frame.top, x, frame.bottom, 1.0, color);
    }
    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = frame.bottom - t * (frame.bottom - frame.top);
        draw_line(frame.left, y, frame.right, y, 1.0, color);
    }
}

pub(crate) fn draw_axis_tick_labels(frame: PlotFrame, window: WorldWindow) {
    let tick_font_size: u16 = 16;
    let y_span = window.y_max - window.y_min;

    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = frame.left + t * (frame.right - frame.left);
        let label = format_axis_value(t * window.x_max, window.x_max);
        let size = measure_text(&label, None, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            x - (size.width * 0.5),
            frame.bottom + 22.0,
            tick_font_size,
            LABEL_COLOR,
        );
    }

    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = frame.bottom - t * (frame.bottom - frame.top);
        let label = format_axis_value(window.y_min + t * y_span, y_span);
        let size = measure_text(&label, None, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            (frame.left - 8.0) - size.width,
            y + (size.height * 0.35),
            tick_font_size,
            LABEL_COLOR,
        );
    }

    draw_ui_text(
        "Horizontal Distance (m)",
        frame.right - 200.0,
        frame.bottom + 48.0,
        18,
        LABEL_COLOR,
    );
    draw_ui_text(
        "Vertical Distance (m)",
        frame.left + 10.0,
        frame.top - 8.0,
        18,
        LABEL_COLOR,
    );
}

pub(crate) fn draw_path(
    points: &[Vec2],
    window: WorldWindow,
    frame: PlotFrame,
    thickness: f32,
    color: Color,
) {
    if points.len() < 2 {
        return;
    }
    let mut prev = world_to_screen(points[0], window, frame);
    for point in points.iter().skip(1).copied() {
        let cur = world_to_screen(point, window, frame);
        draw_line(prev.x, prev.y, cur.x, cur.y, thickness, color);
        prev = cur;
    }
}

pub(crate) fn draw_hud(
    projectile: &Projectile,
    summary: &RunSummary,
    status_line: &str,
    done: bool,
    screen_w: f32,
) {
    draw_ui_text(
        "Projectile Trajectory Simulation",
        24.0,
        TITLE_Y,
        30,
        WHITE,
    );
    draw_ui_text(status_line, 24.0, STATUS_Y, 20, LABEL_COLOR);

    let legend = launch_legend(projectile);
    let legend_size = measure_text(&legend, None, 18, 1.0);
    draw_ui_text(
        &legend,
        screen_w - legend_size.width - 30.0,
        TITLE_Y,
        18,
        LABEL_COLOR,
    );

    if done {
        let result = summary_legend(summary);
        let result_size = measure_text(&result, None, 18, 1.0);
        draw_ui_text(
            &result,
            screen_w - result_size.width - 30.0,
            STATUS_Y,
            18,
            WHITE,
        );
        draw_ui_text(
            "Close the window or press Esc to exit",
            24.0,
            STATUS_Y + 24.0,
            16,
            GRAY,
        );
    }
}
