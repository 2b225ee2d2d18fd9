use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use nback::config::GameParams;
use nback::scoring::{ModalityTally, PerformanceTier, SessionOutcome};
use nback::session::SessionSnapshot;
use nback::store::StoredData;
use nback::StimulusPair;

fn tier_cell(tier: PerformanceTier) -> Cell {
    let color = match tier {
        PerformanceTier::Excellent => Color::Green,
        PerformanceTier::Great => Color::Cyan,
        PerformanceTier::Good => Color::Yellow,
        PerformanceTier::Fair => Color::DarkYellow,
        PerformanceTier::NeedsPractice => Color::Red,
    };
    Cell::new(tier.to_string())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn accuracy_str(tally: &ModalityTally) -> String {
    match tally.accuracy() {
        Some(a) => format!("{:.0}%", a * 100.0),
        None => "—".to_string(),
    }
}

/// 3x3 cue grid with the active cell filled.
pub fn print_grid(pair: &StimulusPair) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    for row in 0..3u8 {
        let cells: Vec<Cell> = (0..3u8)
            .map(|col| {
                if pair.position.row == row && pair.position.col == col {
                    Cell::new("●").fg(Color::Magenta).set_alignment(CellAlignment::Center)
                } else {
                    Cell::new(" ")
                }
            })
            .collect();
        table.add_row(cells);
    }
    println!("{table}");
}

pub fn print_round(snap: &SessionSnapshot) {
    if let Some(pair) = &snap.stimulus {
        println!(
            "\nRound {}  |  {}s left  |  🔊 {}",
            snap.round, snap.remaining_secs, pair.symbol
        );
        print_grid(pair);
    }
}

pub fn print_session_report(params: &GameParams, outcome: &SessionOutcome) {
    println!("\n=== SESSION REPORT (N = {}) ===", params.lag);

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["Modality", "Judged", "Correct", "Accuracy"]);
    table.add_row(vec![
        Cell::new("Position"),
        Cell::new(outcome.position.judged),
        Cell::new(outcome.position.correct),
        Cell::new(accuracy_str(&outcome.position)),
    ]);
    table.add_row(vec![
        Cell::new("Symbol"),
        Cell::new(outcome.symbol.judged),
        Cell::new(outcome.symbol.correct),
        Cell::new(accuracy_str(&outcome.symbol)),
    ]);
    let combined = outcome.combined();
    table.add_row(vec![
        Cell::new("Combined").add_attribute(Attribute::Bold),
        Cell::new(combined.judged),
        Cell::new(combined.correct),
        Cell::new(format!("{:.0}%", outcome.accuracy * 100.0)),
    ]);
    println!("{table}");

    let mut verdict = Table::new();
    verdict.load_preset(ASCII_FULL);
    verdict.add_row(vec![tier_cell(outcome.tier), Cell::new(outcome.tier.message())]);
    println!("{verdict}");
}

pub fn print_progress(data: &StoredData, today: chrono::NaiveDate) {
    match data.today(today) {
        Some(entry) => println!(
            "\nToday: {} of {} sessions completed",
            entry.sessions_completed.min(entry.goal),
            entry.goal
        ),
        None => println!("\nToday: no sessions yet"),
    }

    if data.history.is_empty() {
        println!("No training history recorded.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["Date", "Sessions", "Goal", "Best Tier"]);
    for record in &data.history {
        let tier = match record.best_tier {
            Some(t) => tier_cell(t),
            None => Cell::new("—"),
        };
        table.add_row(vec![
            Cell::new(record.date.to_string()),
            Cell::new(record.sessions_completed),
            Cell::new(record.goal),
            tier,
        ]);
    }
    println!("{table}");
}
