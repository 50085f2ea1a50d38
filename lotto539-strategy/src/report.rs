use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::search::StrategyCandidate;

/// Weekday names indexed from Monday = 0.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn weekday_name(index: u8) -> &'static str {
    WEEKDAY_NAMES
        .get(index as usize)
        .copied()
        .unwrap_or("unknown")
}

/// "ball 1 +5 / ball 3 +12"
pub fn strategy_label(c: &StrategyCandidate) -> String {
    format!(
        "ball {} +{} / ball {} +{}",
        c.ball_a, c.offset_a, c.ball_b, c.offset_b
    )
}

pub fn format_win_rate(c: &StrategyCandidate) -> String {
    format!("{:.1}% ({}/{})", c.win_rate, c.wins, c.total)
}

pub fn format_missed_weeks(missed_weeks: &[NaiveDate]) -> String {
    if missed_weeks.is_empty() {
        return "none".to_string();
    }
    missed_weeks
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per target weekday, each win share computed against total
/// wins (not total weeks).
pub fn format_day_stats(day_stats: &BTreeMap<u8, u32>, total_wins: u32) -> String {
    if total_wins == 0 {
        return "no wins recorded".to_string();
    }
    day_stats
        .iter()
        .map(|(&day, &count)| {
            let percentage = count as f64 / total_wins as f64 * 100.0;
            format!(
                "{} (day {}): {:.1}% ({} wins)",
                weekday_name(day),
                day,
                percentage,
                count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub game: String,
    pub weeks: usize,
    pub min_win_rate: f64,
    pub results: Vec<StrategyCandidate>,
}

pub fn save_report(report: &SearchReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("cannot write {:?}", path))?;
    log::info!("report saved to {:?}", path);
    Ok(())
}

pub fn load_report(path: &Path) -> Result<SearchReport> {
    let json =
        std::fs::read_to_string(path).with_context(|| format!("cannot read {:?}", path))?;
    let report = serde_json::from_str(&json)
        .with_context(|| format!("invalid report JSON in {:?}", path))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> StrategyCandidate {
        StrategyCandidate {
            ball_a: 1,
            ball_b: 3,
            offset_a: 5,
            offset_b: 12,
            win_rate: 92.3076923,
            wins: 48,
            total: 52,
            missed_weeks: vec![
                NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            ],
            day_stats: [(1u8, 24u32), (2, 12), (3, 6), (4, 6), (5, 0)]
                .into_iter()
                .collect(),
        }
    }

    #[test]
    fn test_strategy_label() {
        assert_eq!(strategy_label(&candidate()), "ball 1 +5 / ball 3 +12");
    }

    #[test]
    fn test_format_win_rate_one_decimal() {
        assert_eq!(format_win_rate(&candidate()), "92.3% (48/52)");
    }

    #[test]
    fn test_format_missed_weeks() {
        let c = candidate();
        assert_eq!(format_missed_weeks(&c.missed_weeks), "2026-01-05, 2026-03-02");
        assert_eq!(format_missed_weeks(&[]), "none");
    }

    #[test]
    fn test_format_day_stats_shares_of_wins() {
        let c = candidate();
        let text = format_day_stats(&c.day_stats, c.wins);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Tuesday (day 1): 50.0% (24 wins)");
        assert_eq!(lines[1], "Wednesday (day 2): 25.0% (12 wins)");
        assert_eq!(lines[4], "Saturday (day 5): 0.0% (0 wins)");
    }

    #[test]
    fn test_format_day_stats_without_wins() {
        assert_eq!(format_day_stats(&BTreeMap::new(), 0), "no wins recorded");
    }

    #[test]
    fn test_report_round_trip() {
        let report = SearchReport {
            game: "539".to_string(),
            weeks: 52,
            min_win_rate: 90.0,
            results: vec![candidate()],
        };
        let path = std::env::temp_dir().join("lotto539_report_test.json");
        save_report(&report, &path).unwrap();
        let restored = load_report(&path).unwrap();
        assert_eq!(restored.results, report.results);
        assert_eq!(restored.game, "539");
        let _ = std::fs::remove_file(&path);
    }
}
