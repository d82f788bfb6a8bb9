use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::core::ballistics::{LaunchInputs, Projectile};
use crate::core::sampler::{RunSummary, Termination};
use crate::core::window::DisplayThresholds;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Could not read input: {0}")]
    Io(#[from] io::Error),

    #[error("Input ended unexpectedly (EOF).")]
    UnexpectedEof,

    #[error("Invalid {label}: '{value}'. Expected a number.")]
    InvalidNumber { label: &'static str, value: String },

    #[error("Expected 3 or 4 arguments: <speed_mps> <angle_deg> <height_m> [time_step_s].")]
    ArgumentCount,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunRequest {
    pub inputs: LaunchInputs,
    pub time_step_s: Option<f64>,
    pub thresholds: DisplayThresholds,
}

impl RunRequest {
    // Program name excluded.
    pub fn from_args(args: &[String]) -> Result<Self, ConsoleError> {
        if !(3..=4).contains(&args.len()) {
            return Err(ConsoleError::ArgumentCount);
        }

        let time_step_s = match args.get(3) {
            Some(value) => Some(parse_f64(value, "time step")?),
            None => None,
        };

        Ok(Self {
            inputs: LaunchInputs {
                speed_mps: parse_f64(&args[0], "speed")?,
                angle_deg: parse_f64(&args[1], "angle")?,
                height_m: parse_f64(&args[2], "height")?,
            },
            time_step_s,
            thresholds: DisplayThresholds::default(),
        })
    }
}

pub fn parse_f64(value: &str, label: &'static str) -> Result<f64, ConsoleError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ConsoleError::InvalidNumber {
            label,
            value: value.to_string(),
        })
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        let bytes = self.input.read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn read_f64(&mut self, prompt: &str) -> Result<f64, ConsoleError> {
        loop {
            let line = self
                .read_line(prompt)?
                .ok_or(ConsoleError::UnexpectedEof)?;
            match line.parse::<f64>() {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(
                    self.output,
                    "Please enter a valid number (e.g., 45 or 12.5)."
                )?,
            }
        }
    }

    /// Like [`Console::read_f64`], but a blank line means `None`.
    pub fn read_optional_f64(&mut self, prompt: &str) -> Result<Option<f64>, ConsoleError> {
        loop {
            let line = self
                .read_line(prompt)?
                .ok_or(ConsoleError::UnexpectedEof)?;
            if line.is_empty() {
                return Ok(None);
            }
            match line.parse::<f64>() {
                Ok(v) => return Ok(Some(v)),
                Err(_) => writeln!(
                    self.output,
                    "Please enter a valid number, or leave blank for the default."
                )?,
            }
        }
    }

    /// Only `yes`/`y` (any case) count as agreement; EOF counts as no.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, ConsoleError> {
        Ok(self
            .read_line(prompt)?
            .is_some_and(|answer| matches!(answer.to_ascii_lowercase().as_str(), "yes" | "y")))
    }

    pub fn read_run_request(
        &mut self,
        default_time_step_s: f64,
    ) -> Result<RunRequest, ConsoleError> {
        let inputs = LaunchInputs {
            speed_mps: self.read_f64("Enter initial speed (m/s): ")?,
            angle_deg: self.read_f64("Enter launch angle (degrees): ")?,
            height_m: self.read_f64("Enter initial height (m): ")?,
        };
        let time_step_s =
            self.read_optional_f64(&format!("Enter time step (s) [{default_time_step_s}]: "))?;
        let thresholds = DisplayThresholds {
            height_m: self.read_optional_f64("Height axis limit (m) [auto]: ")?,
            range_m: self.read_optional_f64("Range axis limit (m) [auto]: ")?,
        };

        Ok(RunRequest {
            inputs,
            time_step_s,
            thresholds,
        })
    }

    pub fn print_summary(
        &mut self,
        projectile: &Projectile,
        summary: &RunSummary,
    ) -> Result<(), ConsoleError> {
        writeln!(self.output)?;
        write!(self.output, "{}", format_summary(projectile, summary))?;
        self.output.flush()?;
        Ok(())
    }
}

pub fn termination_text(termination: Option<Termination>) -> &'static str {
    match termination {
        Some(Termination::GroundImpact) => "ground impact",
        Some(Termination::TimeBound) => "time bound reached",
        Some(Termination::Cancelled) => "cancelled",
        None => "in flight",
    }
}

/// Measured results first; the closed-form values are listed as hints only.
pub fn format_summary(projectile: &Projectile, summary: &RunSummary) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "Max Height: {:.2} m\n",
        summary.max_height_reached
    ));
    text.push_str(&format!("Range: {:.2} m\n", summary.range_value));
    text.push_str(&format!(
        "Stopped: {} after {} samples (t = {:.2} s)\n",
        termination_text(summary.termination),
        summary.samples,
        summary.elapsed_s
    ));
    text.push_str(&format!(
        "Hints: max height {:.2} m | max range {:.2} m | time of flight {:.2} s\n",
        projectile.max_height(),
        projectile.max_range(),
        projectile.time_of_flight()
    ));
    if let Some(impact) = projectile.impact() {
        text.push_str(&format!(
            "Exact impact: x = {:.2} m at t = {:.2} s\n",
            impact.x_m, impact.time_s
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn reprompts_until_a_number_arrives() {
        let mut console = console("abc\n\n12.5\n");
        assert_eq!(console.read_f64("Speed: ").expect("number"), 12.5);
        let shown = String::from_utf8(console.output().clone()).expect("utf8");
        assert_eq!(shown.matches("Speed: ").count(), 3);
        assert!(shown.contains("Please enter a valid number"));
    }

    #[test]
    fn eof_is_an_error_for_required_numbers() {
        let mut console = console("");
        assert!(matches!(
            console.read_f64("Speed: "),
            Err(ConsoleError::UnexpectedEof)
        ));
    }

    #[test]
    fn blank_optional_means_default() {
        let mut console = console("\n0.05\n");
        assert_eq!(console.read_optional_f64("Step: ").expect("read"), None);
        assert_eq!(console.read_optional_f64("Step: ").expect("read"), Some(0.05));
    }

    #[test]
    fn only_yes_continues() {
        assert!(console("yes\n").confirm("Again? ").expect("read"));
        assert!(console(" Y \n").confirm("Again? ").expect("read"));
        assert!(!console("no\n").confirm("Again? ").expect("read"));
        assert!(!console("sure\n").confirm("Again? ").expect("read"));
        assert!(!console("").confirm("Again? ").expect("read"));
    }

    #[test]
    fn reads_full_run_request() {
        let mut console = console("50\n45\n0\n\n40\n\n");
        let request = console.read_run_request(0.1).expect("request");
        assert_eq!(
            request.inputs,
            LaunchInputs {
                speed_mps: 50.0,
                angle_deg: 45.0,
                height_m: 0.0,
            }
        );
        assert_eq!(request.time_step_s, None);
        assert_eq!(request.thresholds.height_m, Some(40.0));
        assert_eq!(request.thresholds.range_m, None);
    }

    #[test]
    fn parses_positional_arguments() {
        let request = RunRequest::from_args(&args(&["30", "60", "1.5", "0.02"])).expect("args");
        assert_eq!(request.inputs.speed_mps, 30.0);
        assert_eq!(request.inputs.angle_deg, 60.0);
        assert_eq!(request.inputs.height_m, 1.5);
        assert_eq!(request.time_step_s, Some(0.02));

        assert!(matches!(
            RunRequest::from_args(&args(&["30", "60"])),
            Err(ConsoleError::ArgumentCount)
        ));
        let err = RunRequest::from_args(&args(&["fast", "60", "0"])).expect_err("bad speed");
        assert!(err.to_string().contains("Invalid speed: 'fast'"));
    }

    #[test]
    fn summary_reports_measured_values() {
        let projectile = Projectile::new(LaunchInputs {
            speed_mps: 50.0,
            angle_deg: 45.0,
            height_m: 0.0,
        })
        .expect("valid launch");
        let summary = RunSummary {
            max_height_reached: 31.87,
            max_range_reached: 254.56,
            range_value: 258.09,
            samples: 73,
            elapsed_s: 7.3,
            termination: Some(Termination::GroundImpact),
        };

        let text = format_summary(&projectile, &summary);
        assert!(text.contains("Max Height: 31.87 m"));
        assert!(text.contains("Range: 258.09 m"));
        assert!(text.contains("Stopped: ground impact after 73 samples"));
        assert!(text.contains("max range 255.10 m"));
        assert!(text.contains("time of flight 7.22 s"));
    }
}
