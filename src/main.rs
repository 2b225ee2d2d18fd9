use clap::{Parser, Subcommand};
use nback::store::JsonStore;
use std::process;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path of the preference/progress store.
    #[arg(global = true, short, long, default_value = "nback.json")]
    data: String,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play an interactive session in the terminal.
    Play(cmd::play::PlayArgs),
    /// Run a deterministic, seeded session against a virtual clock.
    Simulate(cmd::simulate::SimulateArgs),
    /// Show the stored daily training history.
    Progress,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let store = JsonStore::new(&cli.data);

    let result = match cli.command {
        Commands::Play(args) => cmd::play::run(args, &store),
        Commands::Simulate(args) => cmd::simulate::run(args),
        Commands::Progress => cmd::progress::run(&store),
    };

    if let Err(e) = result {
        eprintln!("❌ {e}");
        process::exit(1);
    }
}
