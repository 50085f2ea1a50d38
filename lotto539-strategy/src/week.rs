use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDate};

use lotto539_db::models::{validate_numbers, Draw, Game};

/// One Monday draw plus everything drawn on the chase days of that week.
#[derive(Debug, Clone)]
pub struct WeekBucket {
    pub monday: NaiveDate,
    /// The Monday numbers in drawn order; positions 1-5 index into this.
    pub monday_numbers: [u8; 5],
    /// Union of all numbers drawn on target weekdays of the week.
    pub target_union: HashSet<u8>,
    /// Per-day draws in date order: (weekday index, numbers).
    pub daily: Vec<(u8, [u8; 5])>,
    /// A week still in progress has no chase draws yet; it is kept but
    /// excluded from every backtest.
    pub has_data: bool,
}

impl WeekBucket {
    pub fn new(monday: NaiveDate, monday_numbers: [u8; 5], daily: Vec<(u8, [u8; 5])>) -> Self {
        let mut target_union = HashSet::new();
        for (_, numbers) in &daily {
            target_union.extend(numbers.iter().copied());
        }
        let has_data = !target_union.is_empty();
        WeekBucket {
            monday,
            monday_numbers,
            target_union,
            daily,
            has_data,
        }
    }
}

/// Drop structurally invalid rows before aggregation. Malformed records
/// are a data-quality condition, not an error.
pub fn clean_history(draws: &[Draw]) -> Vec<Draw> {
    let mut by_date: BTreeMap<NaiveDate, Draw> = BTreeMap::new();
    for draw in draws {
        if let Err(e) = validate_numbers(&draw.numbers) {
            log::warn!("filtering draw {}: {}", draw.date, e);
            continue;
        }
        by_date.entry(draw.date).or_insert(*draw);
    }
    by_date.into_values().collect()
}

/// Build one bucket per Monday draw among the most recent `weeks`
/// Mondays. The chase window is Monday+1 through Monday+span, by game.
pub fn aggregate_weeks(draws: &[Draw], game: Game, weeks: usize) -> Vec<WeekBucket> {
    let cleaned = clean_history(draws);
    let by_date: BTreeMap<NaiveDate, &Draw> = cleaned.iter().map(|d| (d.date, d)).collect();

    let mondays: Vec<&Draw> = cleaned.iter().filter(|d| d.weekday() == 0).collect();
    let skip = mondays.len().saturating_sub(weeks);

    let mut buckets = Vec::with_capacity(mondays.len() - skip);
    for monday in &mondays[skip..] {
        let mut daily = Vec::new();
        for day in 1..=game.week_span_days() {
            let date = monday.date + Duration::days(day);
            if let Some(draw) = by_date.get(&date) {
                daily.push((day as u8, draw.numbers));
            }
        }
        buckets.push(WeekBucket::new(monday.date, monday.numbers, daily));
    }
    buckets
}
