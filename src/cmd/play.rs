use crate::reports;
use clap::Args;
use nback::config::GameParams;
use nback::error::NbResult;
use nback::scoring::AnswerResult;
use nback::session::{
    Announcer, HapticSink, LogReminder, ReminderScheduler, SessionController, SessionPhase,
    Services,
};
use nback::store::JsonStore;
use nback::Symbol;
use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Override the stored n-back lag for this session.
    #[arg(long)]
    pub lag: Option<usize>,

    /// Override the stored round duration (seconds).
    #[arg(long)]
    pub round_secs: Option<f64>,

    /// Override the stored session duration (seconds).
    #[arg(long)]
    pub session_secs: Option<u64>,

    /// Seed the stimulus stream for a reproducible session.
    #[arg(long)]
    pub seed: Option<u64>,
}

struct TerminalAnnouncer;

impl Announcer for TerminalAnnouncer {
    fn announce(&mut self, symbol: Symbol) {
        // Stands in for speech synthesis; the letter is already part
        // of the round banner, this is the audible-cue channel.
        println!("   (speaking: {symbol})");
    }
}

struct TerminalHaptics {
    enabled: bool,
}

impl HapticSink for TerminalHaptics {
    fn pulse(&mut self, result: AnswerResult) {
        if !self.enabled {
            return;
        }
        let mark = match result {
            AnswerResult::Correct => "✓",
            AnswerResult::Wrong => "✗",
            AnswerResult::Missed => "(missed)",
            AnswerResult::None => return,
        };
        println!("   {mark}");
    }
}

pub fn run(args: PlayArgs, store: &JsonStore) -> NbResult<()> {
    let mut data = store.load();
    let prefs = data.prefs;

    let params = GameParams {
        lag: args.lag.unwrap_or(prefs.lag),
        round_secs: args.round_secs.unwrap_or(prefs.round_secs),
        session_secs: args.session_secs.unwrap_or(prefs.session_secs),
    };

    if prefs.daily_reminder {
        LogReminder.schedule_daily(9, 0)?;
    }

    let services = Services {
        announcer: Box::new(TerminalAnnouncer),
        haptics: Box::new(TerminalHaptics {
            enabled: prefs.haptics,
        }),
    };
    let mut controller = SessionController::with_defaults(params)?.with_services(services);
    if let Some(seed) = args.seed {
        controller = controller.with_seed(seed);
    }

    println!("\n🧠 Dual N-Back (N = {})", params.lag);
    println!("   [f] position match   [j] letter match   [q] quit\n");

    controller.start()?;
    reports::print_round(&controller.snapshot());
    let mut last_round = controller.snapshot().round;

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        let wait = match controller.time_until_next() {
            Some(d) => d,
            None => break,
        };
        match rx.recv_timeout(wait) {
            Ok(line) => match line.trim() {
                "f" => controller.submit_position(true),
                "j" => controller.submit_symbol(true),
                "q" => {
                    controller.stop();
                    break;
                }
                _ => {}
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {
                controller.run_due()?;
                let snap = controller.snapshot();
                if snap.phase == SessionPhase::Ended {
                    break;
                }
                if snap.round != last_round {
                    reports::print_round(&snap);
                    last_round = snap.round;
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                controller.stop();
                break;
            }
        }
    }

    if let Some(outcome) = controller.outcome() {
        reports::print_session_report(&params, &outcome);

        let today = chrono::Local::now().date_naive();
        data.record_session(today, outcome.tier);
        if prefs.adaptive_level {
            let next = outcome.tier.recommend_next_lag(params.lag);
            if next != params.lag {
                println!("Adaptive challenge: next session will use N = {next}");
                data.prefs.lag = next;
            }
        }
        store.save(&data)?;
    }
    Ok(())
}
