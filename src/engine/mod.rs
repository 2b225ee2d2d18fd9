pub mod stimulus;

pub use self::stimulus::{GridPos, StimulusPair, Symbol, ALPHABET, GRID_SIZE};

use tracing::debug;

/// Where new stimulus pairs come from. The production source draws
/// uniformly at random; tests substitute a scripted sequence.
pub trait StimulusSource {
    fn next(&mut self) -> StimulusPair;
}

/// Independent uniform draws over the 9 grid cells and the alphabet.
pub struct RandomSource {
    rng: fastrand::Rng,
}

impl RandomSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        Self { rng }
    }
}

impl StimulusSource for RandomSource {
    fn next(&mut self) -> StimulusPair {
        StimulusPair {
            position: GridPos::new(self.rng.u8(0..GRID_SIZE), self.rng.u8(0..GRID_SIZE)),
            symbol: Symbol::new(self.rng.u8(0..ALPHABET.len() as u8)),
        }
    }
}

/// A fixed sequence of pairs, cycling if exhausted. Used by tests and
/// the deterministic simulation command.
pub struct ScriptedSource {
    pairs: Vec<StimulusPair>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(pairs: Vec<StimulusPair>) -> Self {
        assert!(!pairs.is_empty(), "scripted source needs at least one pair");
        Self { pairs, cursor: 0 }
    }
}

impl StimulusSource for ScriptedSource {
    fn next(&mut self) -> StimulusPair {
        let pair = self.pairs[self.cursor % self.pairs.len()];
        self.cursor += 1;
        pair
    }
}

/// Produces the stimulus sequence and the ground truth for n-back
/// match queries.
///
/// History is append-only and 1-based at the API surface: after k
/// calls to [`RoundEngine::start_round`], `current_round() == k` and
/// `stimulus(k)` is the latest pair. History is only cleared by
/// [`RoundEngine::reset`].
pub struct RoundEngine {
    lag: usize,
    history: Vec<StimulusPair>,
    source: Box<dyn StimulusSource>,
}

impl RoundEngine {
    pub fn new(lag: usize, seed: Option<u64>) -> Self {
        Self::with_source(lag, Box::new(RandomSource::new(seed)))
    }

    pub fn with_source(lag: usize, source: Box<dyn StimulusSource>) -> Self {
        Self {
            lag,
            history: Vec::new(),
            source,
        }
    }

    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Changing the lag invalidates all prior history.
    pub fn set_lag(&mut self, lag: usize) {
        self.lag = lag;
        self.reset();
    }

    /// 1-based index of the latest round; 0 before the first round.
    pub fn current_round(&self) -> usize {
        self.history.len()
    }

    /// Draws the next pair, appends it to history and advances the
    /// round counter.
    pub fn start_round(&mut self) -> StimulusPair {
        let pair = self.source.next();
        self.history.push(pair);
        debug!(
            round = self.history.len(),
            position = %pair.position,
            symbol = %pair.symbol,
            "round started"
        );
        pair
    }

    /// The pair shown in `round` (1-based), if that round has happened.
    pub fn stimulus(&self, round: usize) -> Option<&StimulusPair> {
        if round == 0 {
            return None;
        }
        self.history.get(round - 1)
    }

    pub fn current(&self) -> Option<&StimulusPair> {
        self.history.last()
    }

    /// Whether `round` has a defined n-back target. Rounds at or
    /// below the lag have nothing to compare against.
    pub fn has_target(&self, round: usize) -> bool {
        round > self.lag && round <= self.history.len()
    }

    /// True iff `round` has a target and its position equals the
    /// position `lag` rounds earlier. False (not an error) otherwise.
    pub fn expected_position_match(&self, round: usize) -> bool {
        match (self.stimulus(round), self.target(round)) {
            (Some(cur), Some(back)) => cur.position == back.position,
            _ => false,
        }
    }

    /// Symbol analogue of [`RoundEngine::expected_position_match`].
    pub fn expected_symbol_match(&self, round: usize) -> bool {
        match (self.stimulus(round), self.target(round)) {
            (Some(cur), Some(back)) => cur.symbol == back.symbol,
            _ => false,
        }
    }

    fn target(&self, round: usize) -> Option<&StimulusPair> {
        if !self.has_target(round) {
            return None;
        }
        self.stimulus(round - self.lag)
    }

    /// Clears history and the round counter. The stimulus source is
    /// kept, so a seeded engine keeps consuming the same stream.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}
