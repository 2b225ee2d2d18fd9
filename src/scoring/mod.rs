pub mod tier;

pub use self::tier::PerformanceTier;

use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::debug;

/// One of the two independent judgment channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Modality {
    Position,
    Symbol,
}

/// Per-round submission state for one modality. Transitions at most
/// once per round: a submission locks the round's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerState {
    #[default]
    Unanswered,
    Submitted(bool),
}

/// Derived per-round classification, recomputed each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
pub enum AnswerResult {
    #[default]
    None,
    Correct,
    Wrong,
    Missed,
}

/// Running per-modality totals. Monotonically non-decreasing within
/// a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModalityTally {
    pub judged: u32,
    pub correct: u32,
}

impl ModalityTally {
    pub fn accuracy(&self) -> Option<f64> {
        if self.judged == 0 {
            None
        } else {
            Some(self.correct as f64 / self.judged as f64)
        }
    }
}

/// Final session outcome across both modalities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub position: ModalityTally,
    pub symbol: ModalityTally,
    pub accuracy: f64,
    pub tier: PerformanceTier,
}

impl SessionOutcome {
    pub fn combined(&self) -> ModalityTally {
        ModalityTally {
            judged: self.position.judged + self.symbol.judged,
            correct: self.position.correct + self.symbol.correct,
        }
    }
}

/// Reconciles user submissions against expected truth and keeps the
/// running tallies.
///
/// Only rounds where a real n-back match existed, or where the user
/// actively claimed one, count toward accuracy. A quiet round with no
/// expected match is a true negative and stays out of the
/// denominator.
#[derive(Debug, Default)]
pub struct ScoreTracker {
    states: [AnswerState; 2],
    results: [AnswerResult; 2],
    tallies: [ModalityTally; 2],
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(modality: Modality) -> usize {
        match modality {
            Modality::Position => 0,
            Modality::Symbol => 1,
        }
    }

    /// Clears per-round state for a fresh round. Tallies carry over.
    pub fn begin_round(&mut self) {
        self.states = [AnswerState::Unanswered; 2];
        self.results = [AnswerResult::None; 2];
    }

    /// Records a submission for the current round. Returns the
    /// classification, or `None` if the modality was already answered
    /// this round (the duplicate is ignored).
    pub fn submit(
        &mut self,
        modality: Modality,
        claims_match: bool,
        expected: bool,
    ) -> Option<AnswerResult> {
        let i = Self::slot(modality);
        if self.states[i] != AnswerState::Unanswered {
            return None;
        }
        self.states[i] = AnswerState::Submitted(claims_match);

        let result = match (expected, claims_match) {
            (true, true) => AnswerResult::Correct,
            (false, true) => AnswerResult::Wrong,
            (true, false) => AnswerResult::Missed,
            (false, false) => AnswerResult::None,
        };
        if expected || claims_match {
            self.tallies[i].judged += 1;
            if result == AnswerResult::Correct {
                self.tallies[i].correct += 1;
            }
        }
        self.results[i] = result;
        debug!(%modality, claims_match, expected, %result, "answer scored");
        Some(result)
    }

    /// Closes out the expiring round: any modality still unanswered
    /// with an expected match becomes a missed answer, counted exactly
    /// as if the user had said "no match". Returns the results that
    /// were newly recorded as missed.
    pub fn finalize_round(&mut self, expected_position: bool, expected_symbol: bool) -> [AnswerResult; 2] {
        let expected = [expected_position, expected_symbol];
        let mut newly = [AnswerResult::None; 2];
        for i in 0..2 {
            if self.states[i] == AnswerState::Unanswered && expected[i] {
                self.results[i] = AnswerResult::Missed;
                self.tallies[i].judged += 1;
                newly[i] = AnswerResult::Missed;
            }
        }
        newly
    }

    pub fn result(&self, modality: Modality) -> AnswerResult {
        self.results[Self::slot(modality)]
    }

    pub fn tally(&self, modality: Modality) -> ModalityTally {
        self.tallies[Self::slot(modality)]
    }

    /// Sums tallies across modalities and classifies the session.
    pub fn finish(&self) -> SessionOutcome {
        let position = self.tallies[0];
        let symbol = self.tallies[1];
        let judged = position.judged + symbol.judged;
        let correct = position.correct + symbol.correct;
        let accuracy = if judged == 0 {
            0.0
        } else {
            correct as f64 / judged as f64
        };
        SessionOutcome {
            position,
            symbol,
            accuracy,
            tier: PerformanceTier::from_accuracy(judged, accuracy),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
