use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1280;
pub const INITIAL_WINDOW_HEIGHT: i32 = 720;
pub const MSAA_SAMPLES: i32 = 4;

pub const LEFT_MARGIN: f32 = 90.0;
pub const RIGHT_MARGIN: f32 = 30.0;
pub const TOP_MARGIN: f32 = 110.0;
pub const BOTTOM_MARGIN: f32 = 80.0;

pub const TITLE_Y: f32 = 40.0;
pub const STATUS_Y: f32 = 72.0;
pub const X_GRID_LINES: usize = 10;
pub const Y_GRID_LINES: usize = 8;
pub const MAX_SAMPLES_PER_FRAME: usize = 64;

pub const BACKGROUND: Color = Color::new(0.0, 0.0, 0.0, 1.0);
pub const GRID_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.12);
pub const LABEL_COLOR: Color = Color::new(0.85, 0.87, 0.9, 1.0);
pub const TRAJECTORY_COLOR: Color = Color::new(1.0, 0.65, 0.0, 1.0);

pub const DEFAULT_SPEED_MPS: f64 = 50.0;
pub const DEFAULT_ANGLE_DEG: f64 = 45.0;
pub const DEFAULT_HEIGHT_M: f64 = 0.0;
