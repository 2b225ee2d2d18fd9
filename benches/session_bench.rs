use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use nback::config::GameParams;
use nback::scoring::{Modality, ScoreTracker};
use nback::session::{DeadlineQueue, ManualClock, SessionController, SessionPhase};
use nback::RoundEngine;
use std::time::Duration;

fn bench_full_session(c: &mut Criterion) {
    let params = GameParams {
        lag: 2,
        round_secs: 0.5,
        session_secs: 300,
    };

    c.bench_function("virtual_session_300s", |b| {
        b.iter(|| {
            let clock = ManualClock::default();
            let mut controller =
                SessionController::new(params, clock.clone(), DeadlineQueue::new())
                    .unwrap()
                    .with_seed(42);
            controller.start().unwrap();
            let mut player = fastrand::Rng::with_seed(7);
            while controller.snapshot().phase == SessionPhase::Running {
                if controller.expected_matches().is_some() {
                    controller.submit_position(player.bool());
                    controller.submit_symbol(player.bool());
                }
                clock.advance(Duration::from_millis(250));
                controller.run_due().unwrap();
            }
            black_box(controller.outcome())
        })
    });
}

fn bench_match_queries(c: &mut Criterion) {
    let mut engine = RoundEngine::new(3, Some(11));
    for _ in 0..10_000 {
        engine.start_round();
    }
    c.bench_function("expected_match_10k_rounds", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for round in 1..=10_000 {
                if engine.expected_position_match(black_box(round)) {
                    hits += 1;
                }
                if engine.expected_symbol_match(black_box(round)) {
                    hits += 1;
                }
            }
            black_box(hits)
        })
    });
}

fn bench_tracker_submissions(c: &mut Criterion) {
    c.bench_function("tracker_100k_submissions", |b| {
        b.iter(|| {
            let mut tracker = ScoreTracker::new();
            let mut rng = fastrand::Rng::with_seed(3);
            for _ in 0..100_000 {
                tracker.begin_round();
                tracker.submit(Modality::Position, rng.bool(), rng.bool());
                tracker.submit(Modality::Symbol, rng.bool(), rng.bool());
                tracker.finalize_round(rng.bool(), rng.bool());
            }
            black_box(tracker.finish())
        })
    });
}

criterion_group!(
    benches,
    bench_full_session,
    bench_match_queries,
    bench_tracker_submissions
);
criterion_main!(benches);
