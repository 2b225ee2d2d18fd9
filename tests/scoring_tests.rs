use nback::scoring::{AnswerResult, Modality, PerformanceTier, ScoreTracker};
use rstest::rstest;

#[rstest]
#[case(true, true, AnswerResult::Correct, 1, 1)]
#[case(false, true, AnswerResult::Wrong, 1, 0)]
#[case(true, false, AnswerResult::Missed, 1, 0)]
#[case(false, false, AnswerResult::None, 0, 0)]
fn scoring_table(
    #[case] expected: bool,
    #[case] claims: bool,
    #[case] result: AnswerResult,
    #[case] judged: u32,
    #[case] correct: u32,
) {
    let mut tracker = ScoreTracker::new();
    tracker.begin_round();
    assert_eq!(tracker.submit(Modality::Position, claims, expected), Some(result));
    let tally = tracker.tally(Modality::Position);
    assert_eq!((tally.judged, tally.correct), (judged, correct));
    assert_eq!(tracker.result(Modality::Position), result);
}

#[test]
fn modalities_are_independent() {
    let mut tracker = ScoreTracker::new();
    tracker.begin_round();
    tracker.submit(Modality::Position, true, true);
    tracker.submit(Modality::Symbol, true, false);
    assert_eq!(tracker.result(Modality::Position), AnswerResult::Correct);
    assert_eq!(tracker.result(Modality::Symbol), AnswerResult::Wrong);
    assert_eq!(tracker.tally(Modality::Position).correct, 1);
    assert_eq!(tracker.tally(Modality::Symbol).correct, 0);
}

#[test]
fn at_most_one_submission_per_modality_per_round() {
    let mut tracker = ScoreTracker::new();
    tracker.begin_round();
    assert!(tracker.submit(Modality::Position, false, true).is_some());
    // Everything after the first accepted submission is ignored.
    assert!(tracker.submit(Modality::Position, true, true).is_none());
    assert!(tracker.submit(Modality::Position, false, true).is_none());
    let tally = tracker.tally(Modality::Position);
    assert_eq!((tally.judged, tally.correct), (1, 0));
    assert_eq!(tracker.result(Modality::Position), AnswerResult::Missed);
}

#[test]
fn missed_finalization_counts_exactly_once() {
    let mut tracker = ScoreTracker::new();
    tracker.begin_round();
    let newly = tracker.finalize_round(true, false);
    assert_eq!(newly[0], AnswerResult::Missed);
    assert_eq!(newly[1], AnswerResult::None);
    let pos = tracker.tally(Modality::Position);
    assert_eq!((pos.judged, pos.correct), (1, 0));
    // Symbol had no expected match and no submission: true negative.
    assert_eq!(tracker.tally(Modality::Symbol).judged, 0);
    assert_eq!(tracker.result(Modality::Symbol), AnswerResult::None);

    // The next round starts with fresh answer state; finalizing it
    // must not touch the earlier tally.
    tracker.begin_round();
    tracker.finalize_round(false, false);
    assert_eq!(tracker.tally(Modality::Position).judged, 1);
}

#[test]
fn explicit_submission_beats_finalization() {
    let mut tracker = ScoreTracker::new();
    tracker.begin_round();
    tracker.submit(Modality::Symbol, true, true);
    let newly = tracker.finalize_round(false, true);
    assert_eq!(newly[1], AnswerResult::None);
    let tally = tracker.tally(Modality::Symbol);
    assert_eq!((tally.judged, tally.correct), (1, 1));
    assert_eq!(tracker.result(Modality::Symbol), AnswerResult::Correct);
}

#[rstest]
#[case(100, 90, PerformanceTier::Excellent)]
#[case(100, 75, PerformanceTier::Great)]
#[case(100, 60, PerformanceTier::Good)]
#[case(100, 40, PerformanceTier::Fair)]
#[case(100, 39, PerformanceTier::NeedsPractice)]
#[case(100, 100, PerformanceTier::Excellent)]
#[case(0, 0, PerformanceTier::NeedsPractice)]
fn tier_boundaries(#[case] judged: u32, #[case] correct: u32, #[case] tier: PerformanceTier) {
    let accuracy = if judged == 0 {
        0.0
    } else {
        correct as f64 / judged as f64
    };
    assert_eq!(PerformanceTier::from_accuracy(judged, accuracy), tier);
}

#[test]
fn finish_combines_both_modalities() {
    let mut tracker = ScoreTracker::new();
    // Round 1: position correct, symbol wrong.
    tracker.begin_round();
    tracker.submit(Modality::Position, true, true);
    tracker.submit(Modality::Symbol, true, false);
    // Round 2: symbol correct, position missed by expiry.
    tracker.begin_round();
    tracker.submit(Modality::Symbol, true, true);
    tracker.finalize_round(true, false);

    let outcome = tracker.finish();
    assert_eq!((outcome.position.judged, outcome.position.correct), (2, 1));
    assert_eq!((outcome.symbol.judged, outcome.symbol.correct), (2, 1));
    assert_eq!(outcome.combined().judged, 4);
    assert!((outcome.accuracy - 0.5).abs() < 1e-9);
    assert_eq!(outcome.tier, PerformanceTier::Fair);
}

#[test]
fn reset_zeroes_everything() {
    let mut tracker = ScoreTracker::new();
    tracker.begin_round();
    tracker.submit(Modality::Position, true, true);
    tracker.reset();
    assert_eq!(tracker.tally(Modality::Position).judged, 0);
    assert_eq!(tracker.result(Modality::Position), AnswerResult::None);
}
