use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use lotto539_db::models::{Draw, NumberProbability, NumberStats, ProbabilityTag};
use lotto539_strategy::report::{
    format_day_stats, format_missed_weeks, format_win_rate, strategy_label, weekday_name,
};
use lotto539_strategy::search::StrategyCandidate;

use crate::analysis::patterns::PatternStats;
use crate::import::ImportResult;
use crate::predictions::VerifiedPrediction;

fn numbers_cell(numbers: &[u8]) -> String {
    let mut sorted: Vec<u8> = numbers.to_vec();
    sorted.sort();
    sorted
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("No draws to display.");
        return;
    }

    let mut table = new_table(vec!["Date", "Weekday", "Numbers"]);
    for draw in draws {
        table.add_row(vec![
            draw.date.format("%Y-%m-%d").to_string(),
            weekday_name(draw.weekday()).to_string(),
            numbers_cell(&draw.numbers),
        ]);
    }
    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import finished:");
    println!("  Rows read          : {}", result.total_records);
    println!("  Inserted           : {}", result.inserted);
    println!("  Duplicates skipped : {}", result.skipped);
    if result.errors > 0 {
        println!("  Errors             : {}", result.errors);
    }
}

pub fn display_stats(stats: &[NumberStats], window: u32) {
    println!("\nStatistics over the last {} draws\n", window);

    let mut table = new_table(vec!["Number", "Frequency", "Gap"]);
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    for stat in &sorted {
        table.add_row(vec![
            format!("{:2}", stat.number),
            stat.frequency.to_string(),
            stat.gap.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_probabilities(probs: &[NumberProbability], model_name: &str) {
    println!("\nProbabilities ({model_name})\n");

    let mut table = new_table(vec!["Number", "Probability", "Tag"]);
    let mut sorted = probs.to_vec();
    sorted.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for prob in &sorted {
        let color = match prob.tag {
            ProbabilityTag::Hot => Color::Green,
            ProbabilityTag::Cold => Color::Red,
            ProbabilityTag::Normal => Color::White,
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", prob.number)),
            Cell::new(format!("{:.4}", prob.probability)),
            Cell::new(prob.tag.to_string()).fg(color),
        ]);
    }
    println!("{table}");
}

pub fn display_pattern_stats(stats: &PatternStats, window: u32) {
    println!("\nDraw pattern statistics over the last {} draws\n", window);

    let mut table = new_table(vec!["Feature", "Value"]);
    let groups = ["1-9", "10-19", "20-29", "30-39"];
    for (i, name) in groups.iter().enumerate() {
        table.add_row(vec![
            format!("Most common count in {}", name),
            format!("{} per draw", stats.most_common_head(i)),
        ]);
    }
    table.add_row(vec![
        "Draws with a consecutive pair".to_string(),
        format!("{:.1}%", stats.consecutive_prob() * 100.0),
    ]);
    table.add_row(vec![
        "Span (min / avg / max)".to_string(),
        format!("{} / {:.1} / {}", stats.span_min, stats.avg_span(), stats.span_max),
    ]);
    println!("{table}");
}

pub fn display_suggestion(strategy: &str, numbers: &[u8]) {
    println!("\nSuggestion ({strategy}): {}", numbers_cell(numbers));
}

pub fn display_strategies(candidates: &[StrategyCandidate]) {
    if candidates.is_empty() {
        println!("No strategy reached the win-rate threshold.");
        return;
    }

    let mut table = new_table(vec!["#", "Strategy", "Win rate", "Missed weeks", "Wins per day"]);
    for (i, c) in candidates.iter().enumerate() {
        table.add_row(vec![
            Cell::new(format!("{}", i + 1)),
            Cell::new(strategy_label(c)),
            Cell::new(format_win_rate(c)),
            Cell::new(format_missed_weeks(&c.missed_weeks)),
            Cell::new(format_day_stats(&c.day_stats, c.wins)),
        ]);
    }
    println!("{table}");
}

pub fn display_verifications(verified: &[VerifiedPrediction]) {
    if verified.is_empty() {
        println!("Nothing to verify: no logged prediction has a recorded draw yet.");
        return;
    }

    let mut table = new_table(vec!["Date", "Strategy", "Suggested", "Drawn", "Matches"]);
    for v in verified {
        table.add_row(vec![
            v.prediction.date.format("%Y-%m-%d").to_string(),
            v.prediction.strategy.clone(),
            numbers_cell(&v.prediction.numbers),
            numbers_cell(&v.actual.numbers),
            v.matches.to_string(),
        ]);
    }
    println!("{table}");
}
