use crate::engine::Symbol;
use crate::error::NbResult;
use crate::scoring::AnswerResult;
use tracing::info;

/// Speaks the round's letter. Real synthesis lives outside the core;
/// the engine only asks for a symbol to be voiced or silenced.
pub trait Announcer {
    fn announce(&mut self, symbol: Symbol);
    /// Cancel any in-flight speech.
    fn hush(&mut self) {}
}

/// Fires device feedback for a terminal answer classification.
pub trait HapticSink {
    fn pulse(&mut self, result: AnswerResult);
}

/// Schedules the daily training reminder. Independent of session
/// state; the binary wires it up from stored preferences.
pub trait ReminderScheduler {
    fn schedule_daily(&mut self, hour: u8, minute: u8) -> NbResult<()>;
    fn cancel_daily(&mut self) -> NbResult<()>;
}

pub struct SilentAnnouncer;

impl Announcer for SilentAnnouncer {
    fn announce(&mut self, _symbol: Symbol) {}
}

pub struct NoHaptics;

impl HapticSink for NoHaptics {
    fn pulse(&mut self, _result: AnswerResult) {}
}

/// Logs reminder scheduling instead of touching an OS notification
/// service. Delivery is out of scope for the core.
pub struct LogReminder;

impl ReminderScheduler for LogReminder {
    fn schedule_daily(&mut self, hour: u8, minute: u8) -> NbResult<()> {
        info!(hour, minute, "daily reminder scheduled");
        Ok(())
    }

    fn cancel_daily(&mut self) -> NbResult<()> {
        info!("daily reminder cancelled");
        Ok(())
    }
}

/// Collaborators injected into the session controller.
pub struct Services {
    pub announcer: Box<dyn Announcer>,
    pub haptics: Box<dyn HapticSink>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            announcer: Box::new(SilentAnnouncer),
            haptics: Box::new(NoHaptics),
        }
    }
}
