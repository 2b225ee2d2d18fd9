pub mod config;
pub mod engine;
pub mod error;
pub mod scoring;
pub mod session;
pub mod store;

pub use config::GameParams;
pub use engine::{GridPos, RoundEngine, StimulusPair, Symbol};
pub use error::{NBackError, NbResult};
pub use scoring::{AnswerResult, ModalityTally, PerformanceTier, ScoreTracker, SessionOutcome};
pub use session::{SessionController, SessionPhase, SessionSnapshot};
// cmd and reports are binary modules (declared in main.rs).
