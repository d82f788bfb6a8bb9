use crate::core::ballistics::Projectile;
use crate::core::sampler::TrajectorySample;

pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

pub const DEFAULT_X_PADDING_M: f64 = 500.0;
pub const DEFAULT_Y_PADDING_M: f64 = 200.0;

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;
const MIN_SPAN_M: f64 = 1.0;

/// User overrides for the axis limits; `None` means derive from the model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplayThresholds {
    pub height_m: Option<f64>,
    pub range_m: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds {
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AxisBounds {
    /// Initial chart limits from the closed-form hints plus padding, unless the user
    /// supplied thresholds.
    pub fn from_hints(
        projectile: &Projectile,
        thresholds: DisplayThresholds,
        x_padding_m: f64,
        y_padding_m: f64,
    ) -> Self {
        let x_max = thresholds
            .range_m
            .unwrap_or_else(|| projectile.max_range() + x_padding_m);
        let y_max = thresholds
            .height_m
            .unwrap_or_else(|| projectile.max_height() + y_padding_m);

        Self {
            x_max: x_max.max(MIN_SPAN_M),
            y_min: 0.0,
            y_max: y_max.max(MIN_SPAN_M),
        }
    }

    pub fn include(&mut self, x: f64, y: f64) {
        self.x_max = self.x_max.max(x);
        self.y_max = self.y_max.max(y);
        self.y_min = self.y_min.min(y);
    }

    pub fn fit_samples(mut self, samples: &[TrajectorySample]) -> Self {
        for sample in samples {
            self.include(sample.x, sample.y);
        }
        self
    }

    pub fn y_span(&self) -> f64 {
        (self.y_max - self.y_min).max(MIN_SPAN_M)
    }
}

/// Pads the raw extent and widens one axis so the window keeps a fixed x:y ratio.
pub fn fixed_ratio_axis_window(raw_max_x: f64, raw_max_y: f64) -> (f64, f64) {
    let raw_x_span = raw_max_x.max(MIN_SPAN_M);
    let raw_y_span = raw_max_y.max(MIN_SPAN_M);
    let x_pad = raw_x_span * X_PADDING_RATIO;
    let y_pad = raw_y_span * Y_PADDING_RATIO;

    let mut x_span = (raw_max_x + x_pad).max(MIN_SPAN_M);
    let mut y_span = (raw_max_y + y_pad).max(MIN_SPAN_M);

    if x_span / y_span < DISTANCE_TO_HEIGHT_RATIO {
        x_span = y_span * DISTANCE_TO_HEIGHT_RATIO;
    } else {
        y_span = x_span / DISTANCE_TO_HEIGHT_RATIO;
    }

    (x_span, y_span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ballistics::LaunchInputs;

    fn projectile(speed_mps: f64, angle_deg: f64, height_m: f64) -> Projectile {
        Projectile::new(LaunchInputs {
            speed_mps,
            angle_deg,
            height_m,
        })
        .expect("valid launch")
    }

    #[test]
    fn hints_are_padded_closed_form_maxima() {
        let p = projectile(50.0, 45.0, 0.0);
        let bounds = AxisBounds::from_hints(
            &p,
            DisplayThresholds::default(),
            DEFAULT_X_PADDING_M,
            DEFAULT_Y_PADDING_M,
        );
        assert!((bounds.x_max - (p.max_range() + 500.0)).abs() < 1e-9);
        assert!((bounds.y_max - (p.max_height() + 200.0)).abs() < 1e-9);
        assert_eq!(bounds.y_min, 0.0);
    }

    #[test]
    fn thresholds_override_hints() {
        let p = projectile(50.0, 45.0, 0.0);
        let bounds = AxisBounds::from_hints(
            &p,
            DisplayThresholds {
                height_m: Some(40.0),
                range_m: Some(300.0),
            },
            DEFAULT_X_PADDING_M,
            DEFAULT_Y_PADDING_M,
        );
        assert_eq!(bounds.x_max, 300.0);
        assert_eq!(bounds.y_max, 40.0);
    }

    #[test]
    fn degenerate_hints_keep_a_minimum_span() {
        let p = projectile(0.0, 0.0, 0.0);
        let bounds = AxisBounds::from_hints(&p, DisplayThresholds::default(), 0.0, 0.0);
        assert_eq!(bounds.x_max, 1.0);
        assert_eq!(bounds.y_max, 1.0);
    }

    #[test]
    fn fitting_grows_to_cover_samples() {
        let p = projectile(10.0, 0.0, 500.0);
        let bounds = AxisBounds::from_hints(&p, DisplayThresholds::default(), 0.0, 200.0)
            .fit_samples(&[
                TrajectorySample {
                    time: 0.0,
                    x: 0.0,
                    y: 500.0,
                },
                TrajectorySample {
                    time: 1.0,
                    x: 10.0,
                    y: -3.0,
                },
            ]);
        assert_eq!(bounds.y_max, 500.0);
        assert_eq!(bounds.y_min, -3.0);
        assert_eq!(bounds.x_max, 10.0);
        assert_eq!(bounds.y_span(), 503.0);
    }

    #[test]
    fn fixed_ratio_window_keeps_two_to_one() {
        let (x, y) = fixed_ratio_axis_window(255.1, 31.9);
        assert!((x / y - DISTANCE_TO_HEIGHT_RATIO).abs() < 1e-9);
        assert!(x >= 255.1);

        let (x, y) = fixed_ratio_axis_window(1.0, 100.0);
        assert!((x / y - DISTANCE_TO_HEIGHT_RATIO).abs() < 1e-9);
        assert!(y >= 100.0);
    }
}
