use crate::reports;
use clap::Args;
use nback::config::GameParams;
use nback::error::NbResult;
use nback::session::{DeadlineQueue, ManualClock, SessionController, SessionPhase};
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub params: GameParams,

    /// Seed for both the stimulus stream and the simulated player.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Probability the simulated player judges a round correctly.
    #[arg(long, default_value_t = 0.8)]
    pub skill: f64,

    /// Probability the simulated player fails to answer at all.
    #[arg(long, default_value_t = 0.15)]
    pub lapse: f64,
}

/// Runs a full session against the virtual clock: deterministic,
/// instant, and driven by exactly the same controller the interactive
/// game uses.
pub fn run(args: SimulateArgs) -> NbResult<()> {
    let clock = ManualClock::default();
    let mut controller =
        SessionController::new(args.params, clock.clone(), DeadlineQueue::new())?
            .with_seed(args.seed);
    let mut player = fastrand::Rng::with_seed(args.seed.wrapping_add(1));

    controller.start()?;
    let mut answered_round = 0;

    while controller.snapshot().phase == SessionPhase::Running {
        let snap = controller.snapshot();
        if snap.round != answered_round {
            answered_round = snap.round;
            if let Some((expected_pos, expected_sym)) = controller.expected_matches() {
                if player.f64() >= args.lapse {
                    let claims = if player.f64() < args.skill {
                        expected_pos
                    } else {
                        !expected_pos
                    };
                    controller.submit_position(claims);
                }
                if player.f64() >= args.lapse {
                    let claims = if player.f64() < args.skill {
                        expected_sym
                    } else {
                        !expected_sym
                    };
                    controller.submit_symbol(claims);
                }
            }
        }
        clock.advance(Duration::from_millis(100));
        controller.run_due()?;
    }

    let snap = controller.snapshot();
    println!(
        "Simulated {} rounds at N = {} (seed {}, skill {:.0}%, lapse {:.0}%)",
        snap.round,
        args.params.lag,
        args.seed,
        args.skill * 100.0,
        args.lapse * 100.0
    );
    if let Some(outcome) = snap.outcome {
        reports::print_session_report(&args.params, &outcome);
    }
    Ok(())
}
