use macroquad::prelude::*;
use parabolic_sim::console::{RunRequest, termination_text};
use parabolic_sim::core::window::fixed_ratio_axis_window;
use parabolic_sim::{
    AxisBounds, CancelFlag, Projectile, RunSummary, SimError, SimulationConfig, TrajectorySampler,
};

use crate::constants::MAX_SAMPLES_PER_FRAME;

#[derive(Clone, Copy)]
pub(crate) struct WorldWindow {
    pub(crate) x_max: f32,
    pub(crate) y_min: f32,
    pub(crate) y_max: f32,
}

pub(crate) struct LiveRun {
    pub(crate) projectile: Projectile,
    pub(crate) trail: Vec<Vec2>,
    pub(crate) status_line: String,
    sampler: TrajectorySampler,
    cancel: CancelFlag,
    bounds: AxisBounds,
    pause_s: f32,
    pending_s: f32,
    failed: bool,
}

impl LiveRun {
    pub(crate) fn new(request: RunRequest, config: &SimulationConfig) -> Result<Self, SimError> {
        let projectile = Projectile::new(request.inputs)?;
        let cancel = CancelFlag::new();
        let time_step = request.time_step_s.unwrap_or(config.time_step);
        let sampler = TrajectorySampler::new(
            projectile,
            time_step,
            config.stop_policy().with_cancel(cancel.clone()),
        )?
        .with_max_samples(config.max_samples);
        let bounds = AxisBounds::from_hints(
            &projectile,
            request.thresholds,
            config.x_padding,
            config.y_padding,
        );

        Ok(Self {
            projectile,
            trail: Vec::new(),
            status_line: "In flight".to_string(),
            sampler,
            cancel,
            bounds,
            pause_s: config.frame_pause().as_secs_f32(),
            pending_s: 0.0,
            failed: false,
        })
    }

    pub(crate) fn is_done(&self) -> bool {
        self.failed || self.sampler.is_finished()
    }

    pub(crate) fn summary(&self) -> RunSummary {
        self.sampler.summary()
    }

    pub(crate) fn world_window(&self) -> WorldWindow {
        let (x_max, y_span) = fixed_ratio_axis_window(self.bounds.x_max, self.bounds.y_span());
        WorldWindow {
            x_max: x_max as f32,
            y_min: self.bounds.y_min as f32,
            y_max: (self.bounds.y_min + y_span) as f32,
        }
    }

    // The sampler sees the raised flag on this same call.
    pub(crate) fn cancel(&mut self) {
        if self.is_done() {
            return;
        }
        self.cancel.cancel();
        self.advance();
    }

    // One sample per elapsed pause, capped per frame.
    pub(crate) fn update(&mut self, frame_dt: f32) {
        if self.is_done() {
            return;
        }

        self.pending_s += frame_dt;
        let mut steps = 0;
        while self.pending_s >= self.pause_s && steps < MAX_SAMPLES_PER_FRAME && !self.is_done() {
            self.pending_s -= self.pause_s;
            self.advance();
            steps += 1;
        }
        if steps == MAX_SAMPLES_PER_FRAME {
            self.pending_s = 0.0;
        }
    }

    fn advance(&mut self) {
        match self.sampler.next_sample() {
            Ok(Some(sample)) => {
                self.trail.push(vec2(sample.x as f32, sample.y as f32));
                self.bounds.include(sample.x, sample.y);
            }
            Ok(None) => {
                let summary = self.sampler.summary();
                self.status_line = format!(
                    "Stopped: {} at t = {:.2} s",
                    termination_text(summary.termination),
                    summary.elapsed_s
                );
                tracing::info!(
                    termination = ?summary.termination,
                    max_height_m = summary.max_height_reached,
                    range_m = summary.range_value,
                    "live run finished"
                );
            }
            Err(err) => {
                tracing::warn!(%err, "live run aborted");
                self.status_line = format!("Stopped: {err}");
                self.failed = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parabolic_sim::{LaunchInputs, Termination};

    fn live_run(frame_pause_ms: u64) -> LiveRun {
        let request = RunRequest {
            inputs: LaunchInputs {
                speed_mps: 50.0,
                angle_deg: 45.0,
                height_m: 0.0,
            },
            time_step_s: None,
            thresholds: Default::default(),
        };
        let config = SimulationConfig {
            frame_pause_ms,
            ..Default::default()
        };
        LiveRun::new(request, &config).expect("valid launch")
    }

    #[test]
    fn emits_one_sample_per_elapsed_pause() {
        let mut live = live_run(10);
        live.update(0.055);
        assert_eq!(live.trail.len(), 5);
        assert!(!live.is_done());

        live.update(0.01);
        assert_eq!(live.trail.len(), 6);
    }

    #[test]
    fn long_frame_is_capped_and_drops_the_backlog() {
        let mut live = live_run(10);
        live.update(10.0);
        assert_eq!(live.trail.len(), MAX_SAMPLES_PER_FRAME);
        assert_eq!(live.pending_s, 0.0);
        assert!(!live.is_done());
    }

    #[test]
    fn closing_mid_flight_cancels_and_keeps_the_summary() {
        let mut live = live_run(10);
        live.update(0.055);
        live.cancel();

        assert!(live.is_done());
        let summary = live.summary();
        assert_eq!(summary.termination, Some(Termination::Cancelled));
        assert_eq!(summary.samples, 5);
        assert!(live.status_line.starts_with("Stopped: cancelled"));

        live.update(1.0);
        assert_eq!(live.trail.len(), 5);
    }

    #[test]
    fn uninterrupted_run_lands_on_the_ground() {
        let mut live = live_run(10);
        for _ in 0..10 {
            live.update(1.0);
        }
        assert!(live.is_done());
        assert_eq!(live.trail.len(), 73);
        assert_eq!(live.summary().termination, Some(Termination::GroundImpact));
        assert!(live.status_line.starts_with("Stopped: ground impact"));
    }
}
