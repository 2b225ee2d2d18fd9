pub mod clock;
pub mod services;

pub use self::clock::{
    Clock, DeadlineQueue, ManualClock, MonotonicClock, Scheduler, TimerId, TimerKind,
};
pub use self::services::{
    Announcer, HapticSink, LogReminder, NoHaptics, ReminderScheduler, Services, SilentAnnouncer,
};

use crate::config::GameParams;
use crate::engine::{RoundEngine, StimulusPair, StimulusSource};
use crate::error::NbResult;
use crate::scoring::{AnswerResult, Modality, ModalityTally, ScoreTracker, SessionOutcome};
use std::time::Duration;
use strum_macros::Display;
use tracing::{debug, info};

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Ended,
}

/// Read-only view of everything the presentation layer may observe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub round: usize,
    pub stimulus: Option<StimulusPair>,
    pub position_result: AnswerResult,
    pub symbol_result: AnswerResult,
    pub position_tally: ModalityTally,
    pub symbol_tally: ModalityTally,
    pub remaining_secs: u64,
    pub outcome: Option<SessionOutcome>,
}

/// Owns the game lifecycle: the countdown clock, the per-round timer
/// cadence, and the round engine and score tracker for exactly one
/// session at a time.
///
/// All mutation happens on the caller's thread. Timing is externally
/// driven: the host sleeps until [`SessionController::time_until_next`]
/// and then calls [`SessionController::run_due`]. Every scheduled
/// timer carries the controller's current generation; `reset` bumps
/// it, so a timer popped after a reset is recognized as stale and
/// dropped.
pub struct SessionController<C: Clock, S: Scheduler> {
    clock: C,
    scheduler: S,
    params: GameParams,
    services: Services,
    engine: RoundEngine,
    tracker: ScoreTracker,
    phase: SessionPhase,
    generation: u64,
    remaining_secs: u64,
    outcome: Option<SessionOutcome>,
}

impl SessionController<MonotonicClock, DeadlineQueue> {
    /// Controller with the wall clock and in-process deadline queue.
    pub fn with_defaults(params: GameParams) -> NbResult<Self> {
        Self::new(params, MonotonicClock::default(), DeadlineQueue::new())
    }
}

impl<C: Clock, S: Scheduler> SessionController<C, S> {
    pub fn new(params: GameParams, clock: C, scheduler: S) -> NbResult<Self> {
        params.validate()?;
        Ok(Self {
            engine: RoundEngine::new(params.lag, None),
            clock,
            scheduler,
            params,
            services: Services::default(),
            tracker: ScoreTracker::new(),
            phase: SessionPhase::Idle,
            generation: 0,
            remaining_secs: 0,
            outcome: None,
        })
    }

    pub fn with_services(mut self, services: Services) -> Self {
        self.services = services;
        self
    }

    /// Seeds the stimulus stream for reproducible sessions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.engine = RoundEngine::new(self.params.lag, Some(seed));
        self
    }

    /// Replaces the stimulus source entirely (scripted sequences).
    pub fn with_stimulus_source(mut self, source: Box<dyn StimulusSource>) -> Self {
        self.engine = RoundEngine::with_source(self.params.lag, source);
        self
    }

    pub fn params(&self) -> GameParams {
        self.params
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Starts a fresh session: resets all per-session state, begins
    /// the countdown, and produces round 1 immediately. The only
    /// failure is the scheduler refusing a timer.
    pub fn start(&mut self) -> NbResult<()> {
        self.reset();
        self.phase = SessionPhase::Running;
        self.remaining_secs = self.params.session_secs;
        info!(
            lag = self.params.lag,
            round_secs = self.params.round_secs,
            session_secs = self.params.session_secs,
            "session started"
        );
        if let Err(e) = self.advance_round() {
            self.reset();
            return Err(e);
        }
        let countdown = TimerId {
            kind: TimerKind::Countdown,
            generation: self.generation,
        };
        if let Err(e) = self
            .scheduler
            .schedule(countdown, self.clock.now() + Duration::from_secs(1))
        {
            self.reset();
            return Err(e);
        }
        Ok(())
    }

    /// Ends a running session early, finalizing the in-flight round
    /// and computing the outcome. No-op otherwise.
    pub fn stop(&mut self) {
        if self.phase == SessionPhase::Running {
            self.end_session();
        }
    }

    /// Returns to idle from any state: cancels both timers, clears
    /// history, tallies and outcome. Idempotent, always safe. The
    /// generation bump invalidates any timer already popped by the
    /// host but not yet dispatched.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.scheduler.cancel_all();
        self.services.announcer.hush();
        self.engine.reset();
        self.tracker.reset();
        self.remaining_secs = 0;
        self.outcome = None;
        self.phase = SessionPhase::Idle;
    }

    pub fn submit_position(&mut self, claims_match: bool) {
        self.submit(Modality::Position, claims_match);
    }

    pub fn submit_symbol(&mut self, claims_match: bool) {
        self.submit(Modality::Symbol, claims_match);
    }

    fn submit(&mut self, modality: Modality, claims_match: bool) {
        // Consistency guards, not user errors: ignore submissions
        // outside a running session or before any n-back target
        // exists.
        if self.phase != SessionPhase::Running {
            return;
        }
        let round = self.engine.current_round();
        if !self.engine.has_target(round) {
            return;
        }
        let expected = match modality {
            Modality::Position => self.engine.expected_position_match(round),
            Modality::Symbol => self.engine.expected_symbol_match(round),
        };
        if let Some(result) = self.tracker.submit(modality, claims_match, expected) {
            if result != AnswerResult::None {
                self.services.haptics.pulse(result);
            }
        }
    }

    /// Ground truth for the current round, once it has an n-back
    /// target: `(position_match, symbol_match)`.
    pub fn expected_matches(&self) -> Option<(bool, bool)> {
        let round = self.engine.current_round();
        if self.phase != SessionPhase::Running || !self.engine.has_target(round) {
            return None;
        }
        Some((
            self.engine.expected_position_match(round),
            self.engine.expected_symbol_match(round),
        ))
    }

    /// Dispatches one fired timer. Timers from an older generation
    /// (scheduled before the last reset) are discarded.
    pub fn on_timer(&mut self, id: TimerId) -> NbResult<()> {
        if id.generation != self.generation || self.phase != SessionPhase::Running {
            debug!(?id, "stale or out-of-phase timer dropped");
            return Ok(());
        }
        match id.kind {
            TimerKind::Round => {
                self.expire_round();
                self.advance_round()
            }
            TimerKind::Countdown => {
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                if self.remaining_secs == 0 {
                    self.end_session();
                    Ok(())
                } else {
                    let next = TimerId {
                        kind: TimerKind::Countdown,
                        generation: self.generation,
                    };
                    self.scheduler
                        .schedule(next, self.clock.now() + Duration::from_secs(1))
                }
            }
        }
    }

    /// Pops and dispatches every timer whose deadline has passed.
    pub fn run_due(&mut self) -> NbResult<()> {
        loop {
            let now = self.clock.now();
            match self.scheduler.pop_due(now) {
                Some(id) => self.on_timer(id)?,
                None => return Ok(()),
            }
        }
    }

    /// How long the host may sleep before the next timer is due.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.scheduler
            .next_due()
            .map(|(_, due)| due.saturating_sub(self.clock.now()))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            round: self.engine.current_round(),
            stimulus: self.engine.current().copied(),
            position_result: self.tracker.result(Modality::Position),
            symbol_result: self.tracker.result(Modality::Symbol),
            position_tally: self.tracker.tally(Modality::Position),
            symbol_tally: self.tracker.tally(Modality::Symbol),
            remaining_secs: self.remaining_secs,
            outcome: self.outcome,
        }
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    /// Changing the lag invalidates the current session.
    pub fn set_lag(&mut self, lag: usize) -> NbResult<()> {
        let candidate = GameParams {
            lag,
            ..self.params
        };
        candidate.validate()?;
        self.params = candidate;
        self.engine.set_lag(lag);
        self.reset();
        Ok(())
    }

    /// Changing the round duration invalidates the current session.
    pub fn set_round_duration(&mut self, round_secs: f64) -> NbResult<()> {
        let candidate = GameParams {
            round_secs,
            ..self.params
        };
        candidate.validate()?;
        self.params = candidate;
        self.reset();
        Ok(())
    }

    /// Changing the session duration invalidates the current session.
    pub fn set_session_duration(&mut self, session_secs: u64) -> NbResult<()> {
        let candidate = GameParams {
            session_secs,
            ..self.params
        };
        candidate.validate()?;
        self.params = candidate;
        self.reset();
        Ok(())
    }

    fn advance_round(&mut self) -> NbResult<()> {
        let pair = self.engine.start_round();
        self.tracker.begin_round();
        self.services.announcer.announce(pair.symbol);
        let round_timer = TimerId {
            kind: TimerKind::Round,
            generation: self.generation,
        };
        self.scheduler
            .schedule(round_timer, self.clock.now() + self.params.round_duration())
    }

    /// Missed-answer finalization for the round that just elapsed.
    /// Runs at expiry, before the next round exists, so each
    /// round/modality gets exactly one terminal classification.
    fn expire_round(&mut self) {
        let round = self.engine.current_round();
        let (expected_pos, expected_sym) = if self.engine.has_target(round) {
            (
                self.engine.expected_position_match(round),
                self.engine.expected_symbol_match(round),
            )
        } else {
            (false, false)
        };
        let newly_missed = self.tracker.finalize_round(expected_pos, expected_sym);
        for result in newly_missed.into_iter().filter(|r| *r == AnswerResult::Missed) {
            self.services.haptics.pulse(result);
        }
    }

    fn end_session(&mut self) {
        // The countdown ends the in-flight round early: treat it as
        // expiring so its pending answers still get classified.
        self.expire_round();
        self.scheduler.cancel_all();
        self.services.announcer.hush();
        let outcome = self.tracker.finish();
        info!(
            tier = %outcome.tier,
            accuracy = outcome.accuracy,
            rounds = self.engine.current_round(),
            "session ended"
        );
        self.outcome = Some(outcome);
        self.phase = SessionPhase::Ended;
    }
}
