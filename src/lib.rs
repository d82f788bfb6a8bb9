pub mod chart;
pub mod config;
pub mod console;
pub mod core;
pub mod logging;

pub use crate::config::{ConfigError, SimulationConfig};
pub use crate::core::ballistics::{EARTH_GRAVITY_MPS2, Impact, LaunchInputs, Projectile};
pub use crate::core::error::SimError;
pub use crate::core::sampler::{
    CancelFlag, RunSummary, StopPolicy, Termination, TrajectorySample, TrajectorySampler,
};
pub use crate::core::window::{AxisBounds, DisplayThresholds};
