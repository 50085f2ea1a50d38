mod analysis;
mod display;
mod import;
mod predictions;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use lotto539_db::db::{count_draws, db_path, fetch_all_draws, fetch_last_draws, migrate, open_db};
use lotto539_db::models::Game;
use lotto539_db::rusqlite::Connection;
use lotto539_strategy::report::{save_report, SearchReport};
use lotto539_strategy::search::{dedup_strategies, search_strategies};
use lotto539_strategy::week::aggregate_weeks;

use crate::analysis::patterns::PatternStats;
use crate::analysis::sampler::{generate_suggestion, SuggestionInputs, SuggestionStrategy};
use crate::analysis::weighted::weighted_probabilities;
use crate::analysis::{compute_stats, hot_cold_numbers, tag_probabilities};
use crate::display::{
    display_draws, display_import_summary, display_pattern_stats, display_probabilities,
    display_stats, display_strategies, display_suggestion, display_verifications,
};

#[derive(Parser)]
#[command(
    name = "lotto539",
    about = "Draw history, statistics and Monday strategy backtesting for 539 / Fantasy 5"
)]
struct Cli {
    /// Game whose database to operate on
    #[arg(short, long, value_enum, default_value = "539")]
    game: Game,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import draw history from a CSV file
    Import {
        /// Path to the CSV file (date, weekday, five numbers)
        #[arg(short, long, default_value = "assets/lottery_hist.csv")]
        file: PathBuf,
    },

    /// Show the database path
    DbPath,

    /// List the most recent draws
    List {
        /// How many draws to show
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Frequency and gap statistics
    Stats {
        /// Analysis window (number of draws)
        #[arg(short, long, default_value = "100")]
        window: u32,
    },

    /// Draw pattern statistics (head digits, consecutive runs, span)
    Patterns {
        /// Analysis window (number of draws)
        #[arg(short, long, default_value = "300")]
        window: u32,
    },

    /// Generate a number suggestion
    Predict {
        /// Suggestion strategy
        #[arg(short, long, value_enum, default_value = "smart")]
        strategy: SuggestionStrategy,

        /// How many numbers to suggest
        #[arg(short, long, default_value = "9")]
        picks: usize,

        /// Analysis window (number of draws)
        #[arg(short, long, default_value = "100")]
        window: u32,

        /// Daily decay factor for the weighted strategy
        #[arg(long, default_value = "0.95")]
        decay: f64,

        /// Seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Log the suggestion for today's draw
        #[arg(short, long)]
        log: bool,

        /// Replace an already-logged suggestion for today
        #[arg(long)]
        overwrite: bool,
    },

    /// Backtest all Monday offset strategies and rank the best
    Strategy {
        /// How many recent Mondays to backtest
        #[arg(short, long, default_value = "52")]
        weeks: usize,

        /// Minimum win rate (percent) a strategy must reach
        #[arg(short, long, default_value = "90.0")]
        min_win_rate: f64,

        /// How many strategies to display
        #[arg(short, long, default_value = "5")]
        top: usize,

        /// Save the full ranked report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check logged predictions against recorded draws
    Verify,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let path = db_path(cli.game);
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file } => cmd_import(&conn, &file),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Stats { window } => cmd_stats(&conn, window),
        Command::Patterns { window } => cmd_patterns(&conn, window),
        Command::Predict {
            strategy,
            picks,
            window,
            decay,
            seed,
            log,
            overwrite,
        } => cmd_predict(&conn, strategy, picks, window, decay, seed, log, overwrite),
        Command::Strategy {
            weeks,
            min_win_rate,
            top,
            output,
        } => cmd_strategy(&conn, cli.game, weeks, min_win_rate, top, output),
        Command::Verify => cmd_verify(&conn),
    }
}

fn require_draws(conn: &Connection) -> Result<bool> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Database empty. Run import first: lotto539 import");
        return Ok(false);
    }
    Ok(true)
}

fn cmd_import(conn: &Connection, file: &PathBuf) -> Result<()> {
    let result = import::import_csv(conn, file)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &Connection, last: u32) -> Result<()> {
    if !require_draws(conn)? {
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_stats(conn: &Connection, window: u32) -> Result<()> {
    if !require_draws(conn)? {
        return Ok(());
    }
    let effective_window = window.min(count_draws(conn)?);
    let draws = fetch_last_draws(conn, effective_window)?;
    let numbers: Vec<[u8; 5]> = draws.iter().map(|d| d.numbers).collect();

    let stats = compute_stats(&numbers);
    display_stats(&stats, effective_window);
    Ok(())
}

fn cmd_patterns(conn: &Connection, window: u32) -> Result<()> {
    if !require_draws(conn)? {
        return Ok(());
    }
    let effective_window = window.min(count_draws(conn)?);
    let draws = fetch_last_draws(conn, effective_window)?;
    let numbers: Vec<[u8; 5]> = draws.iter().map(|d| d.numbers).collect();

    let stats = PatternStats::from_draws(&numbers);
    display_pattern_stats(&stats, effective_window);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_predict(
    conn: &Connection,
    strategy: SuggestionStrategy,
    picks: usize,
    window: u32,
    decay: f64,
    seed: Option<u64>,
    log: bool,
    overwrite: bool,
) -> Result<()> {
    if !require_draws(conn)? {
        return Ok(());
    }
    let effective_window = window.min(count_draws(conn)?);
    let draws = fetch_last_draws(conn, effective_window)?;
    let numbers: Vec<[u8; 5]> = draws.iter().map(|d| d.numbers).collect();

    let stats = compute_stats(&numbers);
    let (hot, cold) = hot_cold_numbers(&stats, 6, 6);
    let pattern_stats = PatternStats::from_draws(&numbers);
    let mut weighted = weighted_probabilities(&draws, decay);
    tag_probabilities(&mut weighted);

    if strategy == SuggestionStrategy::Weighted {
        display_probabilities(&weighted, &format!("decay {:.2} per day", decay));
    }

    let inputs = SuggestionInputs {
        hot: &hot,
        cold: &cold,
        patterns: Some(&pattern_stats),
        weighted: &weighted,
    };
    let suggestion = generate_suggestion(strategy, picks, &inputs, seed)?;
    display_suggestion(strategy.name(), &suggestion);

    if log {
        let today = chrono::Local::now().date_naive();
        let logged = predictions::log_prediction(conn, today, strategy.name(), &suggestion, overwrite)?;
        if logged {
            println!("Logged for {} / {}.", today, strategy.name());
        } else {
            println!(
                "A {} suggestion is already logged for {}; use --overwrite to replace it.",
                strategy.name(),
                today
            );
        }
    }

    Ok(())
}

fn cmd_strategy(
    conn: &Connection,
    game: Game,
    weeks: usize,
    min_win_rate: f64,
    top: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    if !require_draws(conn)? {
        return Ok(());
    }
    let draws = fetch_all_draws(conn)?;
    let buckets = aggregate_weeks(&draws, game, weeks);
    let usable = buckets.iter().filter(|b| b.has_data).count();
    println!(
        "{} Monday weeks aggregated ({} with chase draws), threshold {:.1}%",
        buckets.len(),
        usable,
        min_win_rate
    );

    let ranked = search_strategies(&buckets, game.target_weekdays(), min_win_rate);
    println!("{} strategies at or above the threshold", ranked.len());

    let unique = dedup_strategies(ranked);
    println!("{} after removing operand-order duplicates", unique.len());

    display_strategies(&unique[..top.min(unique.len())]);

    if let Some(path) = output {
        let report = SearchReport {
            game: game.label().to_string(),
            weeks,
            min_win_rate,
            results: unique,
        };
        save_report(&report, &path)?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}

fn cmd_verify(conn: &Connection) -> Result<()> {
    let verified = predictions::verify_predictions(conn)?;
    display_verifications(&verified);
    Ok(())
}
