use anyhow::Result;
use chrono::NaiveDate;
use lotto539_db::rusqlite::Connection;

use lotto539_db::db::{fetch_draw_by_date, fetch_unverified_predictions, insert_prediction, set_prediction_matches};
use lotto539_db::models::{Draw, Prediction};

/// Log a suggestion for the draw on `date`. One row per (date, strategy);
/// re-logging the same day is skipped unless `overwrite` is set.
pub fn log_prediction(
    conn: &Connection,
    date: NaiveDate,
    strategy: &str,
    numbers: &[u8],
    overwrite: bool,
) -> Result<bool> {
    let prediction = Prediction {
        date,
        strategy: strategy.to_string(),
        numbers: numbers.to_vec(),
        matches: None,
    };
    insert_prediction(conn, &prediction, overwrite)
}

/// A prediction checked against the actual draw of its date.
pub struct VerifiedPrediction {
    pub prediction: Prediction,
    pub actual: Draw,
    pub matches: u32,
}

pub fn count_matches(predicted: &[u8], actual: &[u8; 5]) -> u32 {
    predicted.iter().filter(|n| actual.contains(n)).count() as u32
}

/// Check every unverified prediction for which the draw has since been
/// recorded, persist the match counts, and return the outcomes. Pending
/// predictions whose draw is not in the store yet are left untouched.
pub fn verify_predictions(conn: &Connection) -> Result<Vec<VerifiedPrediction>> {
    let pending = fetch_unverified_predictions(conn)?;
    let mut verified = Vec::new();

    for prediction in pending {
        let Some(actual) = fetch_draw_by_date(conn, prediction.date)? else {
            continue;
        };
        let matches = count_matches(&prediction.numbers, &actual.numbers);
        set_prediction_matches(conn, prediction.date, &prediction.strategy, matches)?;
        verified.push(VerifiedPrediction {
            prediction,
            actual,
            matches,
        });
    }

    Ok(verified)
}
