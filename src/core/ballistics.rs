use crate::core::error::{SimError, require_finite};

pub const EARTH_GRAVITY_MPS2: f64 = 9.8;

const MAX_LAUNCH_ANGLE_DEG: f64 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchInputs {
    pub speed_mps: f64,
    pub angle_deg: f64,
    pub height_m: f64,
}

/// Where and when the projectile comes back down to `y = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impact {
    pub time_s: f64,
    pub x_m: f64,
}

/// Velocity components are derived once in [`Projectile::new`] and never set again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    initial_speed: f64,
    launch_angle: f64,
    initial_height: f64,
    gravity: f64,
    initial_horizontal_velocity: f64,
    initial_vertical_velocity: f64,
}

pub fn velocity_components(speed_mps: f64, angle_rad: f64) -> (f64, f64) {
    let vx = speed_mps * angle_rad.cos();
    let vy = speed_mps * angle_rad.sin();
    (vx, vy)
}

/// `0.5 * v^2` for a velocity magnitude. Diagnostic only, never applied to the motion.
pub fn specific_energy(speed_mps: f64) -> f64 {
    0.5 * speed_mps * speed_mps
}

impl Projectile {
    pub fn new(inputs: LaunchInputs) -> Result<Self, SimError> {
        let speed = require_finite("initial speed", inputs.speed_mps)?;
        let angle_deg = require_finite("launch angle", inputs.angle_deg)?;
        let height = require_finite("initial height", inputs.height_m)?;

        if speed < 0.0 {
            return Err(SimError::invalid(
                "initial speed",
                speed,
                "cannot be negative",
            ));
        }
        if angle_deg.abs() > MAX_LAUNCH_ANGLE_DEG {
            return Err(SimError::invalid(
                "launch angle",
                angle_deg,
                "must be between -90 and 90 degrees",
            ));
        }

        let launch_angle = angle_deg.to_radians();
        let (vx, vy) = velocity_components(speed, launch_angle);

        Ok(Self {
            initial_speed: speed,
            launch_angle,
            initial_height: height,
            gravity: EARTH_GRAVITY_MPS2,
            initial_horizontal_velocity: vx,
            initial_vertical_velocity: vy,
        })
    }

    pub fn initial_speed(&self) -> f64 {
        self.initial_speed
    }

    pub fn launch_angle(&self) -> f64 {
        self.launch_angle
    }

    pub fn launch_angle_deg(&self) -> f64 {
        self.launch_angle.to_degrees()
    }

    pub fn initial_height(&self) -> f64 {
        self.initial_height
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn initial_horizontal_velocity(&self) -> f64 {
        self.initial_horizontal_velocity
    }

    pub fn initial_vertical_velocity(&self) -> f64 {
        self.initial_vertical_velocity
    }

    pub fn inputs(&self) -> LaunchInputs {
        LaunchInputs {
            speed_mps: self.initial_speed,
            angle_deg: self.launch_angle_deg(),
            height_m: self.initial_height,
        }
    }

    /// Position at `time_s`. Negative times are evaluated as-is.
    pub fn position(&self, time_s: f64) -> (f64, f64) {
        let x = self.initial_horizontal_velocity * time_s;
        let y = self.initial_height + (self.initial_vertical_velocity * time_s)
            - (0.5 * self.gravity * time_s * time_s);
        (x, y)
    }

    pub fn velocity(&self, time_s: f64) -> (f64, f64) {
        (
            self.initial_horizontal_velocity,
            self.initial_vertical_velocity - self.gravity * time_s,
        )
    }

    pub fn speed_at(&self, time_s: f64) -> f64 {
        let (vx, vy) = self.velocity(time_s);
        vx.hypot(vy)
    }

    /// Apex rise for a launch from ground level. Ignores the initial height, so it
    /// is only a display hint when the height is non-zero.
    pub fn max_height(&self) -> f64 {
        (self.initial_vertical_velocity * self.initial_vertical_velocity) / (2.0 * self.gravity)
    }

    /// Level-ground range. Only exact for a zero initial height.
    pub fn max_range(&self) -> f64 {
        (self.initial_speed * self.initial_speed) * (2.0 * self.launch_angle).sin() / self.gravity
    }

    pub fn time_of_flight(&self) -> f64 {
        2.0 * self.initial_vertical_velocity / self.gravity
    }

    pub fn peak_height(&self) -> f64 {
        if self.initial_vertical_velocity > 0.0 {
            self.initial_height + self.max_height()
        } else {
            self.initial_height
        }
    }

    /// Exact time at which `y` returns to zero on the way down.
    pub fn landing_time(&self) -> Option<f64> {
        let vy = self.initial_vertical_velocity;
        // Positive root of 0.5*g*t^2 - vy*t - h = 0
        let disc = vy * vy + 2.0 * self.gravity * self.initial_height;
        if disc < 0.0 {
            return None;
        }

        let t_land = (vy + disc.sqrt()) / self.gravity;
        (t_land >= 0.0).then_some(t_land)
    }

    pub fn impact(&self) -> Option<Impact> {
        self.landing_time().map(|time_s| Impact {
            time_s,
            x_m: self.position(time_s).0,
        })
    }
}
