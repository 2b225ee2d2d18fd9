use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// End-of-session classification over combined accuracy. Ordered best
/// first, so `min` picks the better of two tiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "title_case")]
pub enum PerformanceTier {
    Excellent,
    Great,
    Good,
    Fair,
    NeedsPractice,
}

impl PerformanceTier {
    /// Maps an accuracy ratio to a tier. Zero judged answers always
    /// land in the lowest tier.
    pub fn from_accuracy(judged: u32, accuracy: f64) -> Self {
        if judged == 0 {
            return Self::NeedsPractice;
        }
        if accuracy >= 0.90 {
            Self::Excellent
        } else if accuracy >= 0.75 {
            Self::Great
        } else if accuracy >= 0.60 {
            Self::Good
        } else if accuracy >= 0.40 {
            Self::Fair
        } else {
            Self::NeedsPractice
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Excellent => "Outstanding! Your working memory is razor sharp.",
            Self::Great => "Great session! You're well above average.",
            Self::Good => "Good work. Keep at it and you'll level up soon.",
            Self::Fair => "Not bad. Regular practice will push this higher.",
            Self::NeedsPractice => "Everyone starts somewhere. Try a shorter lag.",
        }
    }

    /// Suggested lag for the next session when adaptive challenge is
    /// enabled. A recommendation only; callers decide whether to
    /// persist it.
    pub fn recommend_next_lag(&self, lag: usize) -> usize {
        match self {
            Self::Excellent => lag + 1,
            Self::Fair | Self::NeedsPractice => lag.saturating_sub(1).max(1),
            _ => lag,
        }
    }
}
