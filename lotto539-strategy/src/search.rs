use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::offset::derived_numbers;
use crate::week::WeekBucket;

pub const BALL_POSITIONS: std::ops::RangeInclusive<u8> = 1..=5;
pub const MAX_OFFSET: u8 = 38;

/// One (ball, offset) × (ball, offset) rule with its backtest record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyCandidate {
    pub ball_a: u8,
    pub ball_b: u8,
    pub offset_a: u8,
    pub offset_b: u8,
    pub win_rate: f64,
    pub wins: u32,
    pub total: u32,
    /// Monday dates of weeks where neither derived number came up.
    pub missed_weeks: Vec<NaiveDate>,
    /// Wins per weekday index, attributed to the first qualifying day only.
    pub day_stats: BTreeMap<u8, u32>,
}

impl StrategyCandidate {
    /// Order-independent identity: (ball_a, offset_a) and (ball_b, offset_b)
    /// swapped describe the same strategy.
    pub fn canonical_key(&self) -> ((u8, u8), (u8, u8)) {
        let first = (self.ball_a, self.offset_a);
        let second = (self.ball_b, self.offset_b);
        if first <= second {
            (first, second)
        } else {
            (second, first)
        }
    }
}

/// Full Cartesian product of ball positions and offsets:
/// 5 * 5 * 39 * 39 = 38025 combinations.
pub fn generate_combinations() -> Vec<(u8, u8, u8, u8)> {
    let mut combos = Vec::with_capacity(38_025);
    for ball_a in BALL_POSITIONS {
        for ball_b in BALL_POSITIONS {
            for offset_a in 0..=MAX_OFFSET {
                for offset_b in 0..=MAX_OFFSET {
                    combos.push((ball_a, ball_b, offset_a, offset_b));
                }
            }
        }
    }
    combos
}

/// Backtest a single combination against every week that has chase data.
pub fn backtest(
    weeks: &[WeekBucket],
    target_weekdays: &[u8],
    ball_a: u8,
    ball_b: u8,
    offset_a: u8,
    offset_b: u8,
) -> StrategyCandidate {
    let mut day_stats: BTreeMap<u8, u32> = target_weekdays.iter().map(|&d| (d, 0)).collect();
    let mut wins = 0u32;
    let mut total = 0u32;
    let mut missed_weeks = Vec::new();

    for week in weeks {
        if !week.has_data {
            continue;
        }

        let (a, b) = derived_numbers(&week.monday_numbers, ball_a, ball_b, offset_a, offset_b);
        total += 1;

        if week.target_union.contains(&a) || week.target_union.contains(&b) {
            wins += 1;
            for (weekday, numbers) in &week.daily {
                if numbers.contains(&a) || numbers.contains(&b) {
                    *day_stats.entry(*weekday).or_insert(0) += 1;
                    break;
                }
            }
        } else {
            missed_weeks.push(week.monday);
        }
    }

    let win_rate = if total > 0 {
        wins as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    StrategyCandidate {
        ball_a,
        ball_b,
        offset_a,
        offset_b,
        win_rate,
        wins,
        total,
        missed_weeks,
        day_stats,
    }
}

/// Exhaustively backtest all 38025 combinations and return the survivors,
/// ranked by win rate then by win count. Fewer than 2 usable weeks yields
/// an empty result; so does a threshold nothing reaches. Neither is an
/// error.
///
/// The combinations are independent given the frozen `weeks` slice, so the
/// enumeration runs on the rayon pool; collect keeps enumeration order, and
/// the final order depends only on (win_rate, wins).
pub fn search_strategies(
    weeks: &[WeekBucket],
    target_weekdays: &[u8],
    min_win_rate: f64,
) -> Vec<StrategyCandidate> {
    let usable = weeks.iter().filter(|w| w.has_data).count();
    if usable < 2 {
        log::warn!("only {} usable weeks, skipping strategy search", usable);
        return Vec::new();
    }

    let combos = generate_combinations();
    let pb = ProgressBar::new(combos.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    let mut survivors: Vec<StrategyCandidate> = combos
        .par_iter()
        .map(|&(ball_a, ball_b, offset_a, offset_b)| {
            let candidate = backtest(weeks, target_weekdays, ball_a, ball_b, offset_a, offset_b);
            pb.inc(1);
            candidate
        })
        .filter(|c| c.total > 0 && c.win_rate >= min_win_rate)
        .collect();
    pb.finish_and_clear();

    survivors.sort_by(|a, b| {
        b.win_rate
            .partial_cmp(&a.win_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.wins.cmp(&a.wins))
    });
    survivors
}

/// Remove candidates that differ only in operand order, keeping the
/// first (highest-ranked) per canonical key.
pub fn dedup_strategies(candidates: Vec<StrategyCandidate>) -> Vec<StrategyCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.canonical_key()))
        .collect()
}
