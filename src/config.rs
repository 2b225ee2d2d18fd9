use crate::error::{NBackError, NbResult};
use clap::Args;
use std::time::Duration;

/// Tunable session parameters. Changing any of these on a live
/// controller forces a reset (no mid-session changes).
#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct GameParams {
    /// N-back lag: how many rounds back a cue must be compared against.
    #[arg(long, default_value_t = 2)]
    pub lag: usize,

    /// Seconds each round stays on screen before it expires.
    #[arg(long, default_value_t = 2.0)]
    pub round_secs: f64,

    /// Total session length in seconds.
    #[arg(long, default_value_t = 60)]
    pub session_secs: u64,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            lag: 2,
            round_secs: 2.0,
            session_secs: 60,
        }
    }
}

impl GameParams {
    pub fn validate(&self) -> NbResult<()> {
        if self.lag == 0 {
            return Err(NBackError::Config("lag must be at least 1".to_string()));
        }
        if !(self.round_secs > 0.0) {
            return Err(NBackError::Config(format!(
                "round duration must be positive, got {}",
                self.round_secs
            )));
        }
        if self.session_secs == 0 {
            return Err(NBackError::Config(
                "session duration must be positive".to_string(),
            ));
        }
        if self.round_secs > self.session_secs as f64 {
            return Err(NBackError::Config(format!(
                "round duration ({}s) exceeds session duration ({}s)",
                self.round_secs, self.session_secs
            )));
        }
        Ok(())
    }

    pub fn round_duration(&self) -> Duration {
        Duration::from_secs_f64(self.round_secs)
    }

    pub fn session_duration(&self) -> Duration {
        Duration::from_secs(self.session_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(GameParams::default().validate().is_ok());
    }

    #[test]
    fn zero_lag_rejected() {
        let params = GameParams {
            lag: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn round_longer_than_session_rejected() {
        let params = GameParams {
            round_secs: 90.0,
            session_secs: 60,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
