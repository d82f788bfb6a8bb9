use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::core::ballistics::Projectile;
use crate::core::error::{SimError, require_positive};

pub const DEFAULT_TIME_STEP_S: f64 = 0.1;
pub const DEFAULT_MAX_SAMPLES: usize = 100_000;

/// Stop signal shared between the sampler and whoever owns the display.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Which conditions end a run. Any combination may be enabled.
#[derive(Clone, Debug)]
pub struct StopPolicy {
    pub ground_impact: bool,
    pub max_time_s: Option<f64>,
    pub cancel: Option<CancelFlag>,
}

impl StopPolicy {
    pub fn ground_impact() -> Self {
        Self {
            ground_impact: true,
            max_time_s: None,
            cancel: None,
        }
    }

    pub fn without_ground_impact(mut self) -> Self {
        self.ground_impact = false;
        self
    }

    pub fn with_time_bound(mut self, max_time_s: f64) -> Self {
        self.max_time_s = Some(max_time_s);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

impl Default for StopPolicy {
    fn default() -> Self {
        Self::ground_impact()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    GroundImpact,
    TimeBound,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectorySample {
    pub time: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub max_height_reached: f64,
    pub max_range_reached: f64,
    /// `x` of the last computed sample, including the one that ended the run.
    pub range_value: f64,
    pub samples: usize,
    pub elapsed_s: f64,
    /// `None` while the run is still in progress.
    pub termination: Option<Termination>,
}

pub struct TrajectorySampler {
    projectile: Projectile,
    time_step_s: f64,
    policy: StopPolicy,
    max_samples: usize,
    step_index: usize,
    max_height_reached: f64,
    max_range_reached: f64,
    range_value: f64,
    samples: usize,
    elapsed_s: f64,
    termination: Option<Termination>,
}

impl TrajectorySampler {
    pub fn new(
        projectile: Projectile,
        time_step_s: f64,
        policy: StopPolicy,
    ) -> Result<Self, SimError> {
        require_positive("time step", time_step_s)?;
        if let Some(max_time_s) = policy.max_time_s {
            require_positive("time bound", max_time_s)?;
        }

        Ok(Self {
            projectile,
            time_step_s,
            policy,
            max_samples: DEFAULT_MAX_SAMPLES,
            step_index: 0,
            max_height_reached: 0.0,
            max_range_reached: 0.0,
            range_value: 0.0,
            samples: 0,
            elapsed_s: 0.0,
            termination: None,
        })
    }

    /// Safety cap on computed samples.
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples.max(1);
        self
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    pub fn time_step(&self) -> f64 {
        self.time_step_s
    }

    pub fn is_finished(&self) -> bool {
        self.termination.is_some()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            max_height_reached: self.max_height_reached,
            max_range_reached: self.max_range_reached,
            range_value: self.range_value,
            samples: self.samples,
            elapsed_s: self.elapsed_s,
            termination: self.termination,
        }
    }

    pub fn cancel(&mut self) {
        self.finish(Termination::Cancelled);
    }

    /// Returns `Ok(None)` once a stop condition has been met; the sample that
    /// triggered it is never returned, but its `x` becomes the summary's
    /// `range_value`.
    pub fn next_sample(&mut self) -> Result<Option<TrajectorySample>, SimError> {
        if self.termination.is_some() {
            return Ok(None);
        }
        if self.step_index == 0 {
            self.check_sample_budget()?;
        }
        if self
            .policy
            .cancel
            .as_ref()
            .is_some_and(CancelFlag::is_cancelled)
        {
            self.finish(Termination::Cancelled);
            return Ok(None);
        }
        if self.step_index >= self.max_samples {
            warn!(
                samples = self.step_index,
                elapsed_s = self.elapsed_s,
                "trajectory hit the sample cap"
            );
            return Err(SimError::NonTerminatingTrajectory {
                samples: self.step_index,
            });
        }

        // Multiplying keeps the cursor free of accumulated rounding.
        let time = self.step_index as f64 * self.time_step_s;
        let (x, y) = self.projectile.position(time);
        self.step_index += 1;
        self.elapsed_s = time;
        self.range_value = x;

        if self.policy.ground_impact && y < 0.0 {
            self.finish(Termination::GroundImpact);
            return Ok(None);
        }
        if self.policy.max_time_s.is_some_and(|max| time > max) {
            self.finish(Termination::TimeBound);
            return Ok(None);
        }

        self.max_height_reached = self.max_height_reached.max(y);
        self.max_range_reached = self.max_range_reached.max(x);
        self.samples += 1;

        Ok(Some(TrajectorySample { time, x, y }))
    }

    /// A sink returning [`SimError::Cancelled`] ends the run gracefully with a
    /// cancelled summary; any other sink error is propagated.
    pub fn run<F>(mut self, mut on_sample: F) -> Result<RunSummary, SimError>
    where
        F: FnMut(TrajectorySample) -> Result<(), SimError>,
    {
        debug!(
            speed_mps = self.projectile.initial_speed(),
            angle_deg = self.projectile.launch_angle_deg(),
            height_m = self.projectile.initial_height(),
            time_step_s = self.time_step_s,
            "starting run"
        );

        while let Some(sample) = self.next_sample()? {
            match on_sample(sample) {
                Ok(()) => {}
                Err(SimError::Cancelled) => {
                    self.cancel();
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(self.summary())
    }

    pub fn collect(self) -> Result<(Vec<TrajectorySample>, RunSummary), SimError> {
        let mut samples = Vec::new();
        let summary = self.run(|sample| {
            samples.push(sample);
            Ok(())
        })?;
        Ok((samples, summary))
    }

    /// Computed samples needed to reach a known stop, counting the one that ends
    /// the run. `None` when only the cancel flag or the cap can stop it.
    pub fn required_samples(&self) -> Option<usize> {
        let landing = self
            .policy
            .ground_impact
            .then(|| self.projectile.landing_time().unwrap_or(0.0));
        let stop_time_s = match (landing, self.policy.max_time_s) {
            (Some(landing), Some(max_time)) => landing.min(max_time),
            (Some(landing), None) => landing,
            (None, Some(max_time)) => max_time,
            (None, None) => return None,
        };
        Some((stop_time_s / self.time_step_s).floor() as usize + 2)
    }

    fn check_sample_budget(&self) -> Result<(), SimError> {
        match self.required_samples() {
            Some(required) if required > self.max_samples => {
                warn!(
                    time_step_s = self.time_step_s,
                    required,
                    max_samples = self.max_samples,
                    "time step too small for the sample cap"
                );
                Err(SimError::SampleBudgetExceeded {
                    time_step_s: self.time_step_s,
                    required,
                    max_samples: self.max_samples,
                })
            }
            _ => Ok(()),
        }
    }

    fn finish(&mut self, termination: Termination) {
        if self.termination.is_none() {
            debug!(
                ?termination,
                samples = self.samples,
                elapsed_s = self.elapsed_s,
                range_m = self.range_value,
                "run finished"
            );
            self.termination = Some(termination);
        }
    }
}
