use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use tally::cli::args::{Cli, Commands};
use tally::cli::commands;
use tally::config::{Config, Paths};
use tally::error::TallyError;
use tally::storage::Store;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), TallyError> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let config = Config::load(&paths)?;
    let mut store = Store::open(paths)?;
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Today => commands::today(&mut store, format)?,
        Commands::Log { habit } => commands::log(&mut store, &habit, format)?,
        Commands::Weight { value } => commands::weight(&mut store, value, format)?,
        Commands::Mood { value, notes } => commands::mood(&mut store, value, notes, format)?,
        Commands::Habit(args) => commands::habit(&mut store, args.command, format)?,
        Commands::Todo(args) => commands::todo(&mut store, args.command, format)?,
        Commands::Streaks { habit } => commands::streaks(&mut store, habit, format)?,
        Commands::Stats(args) => commands::stats(&mut store, &config, args.command, format)?,
        Commands::Review { period, save, list } => {
            commands::review(&mut store, &config, period, save, list, format)?
        },
        Commands::Export => commands::export(&mut store)?,
        Commands::Tui => {
            tally::tui::run(&mut store)?;
            return Ok(());
        },
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    println!("{output}");
    Ok(())
}
