use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use lotto539_db::rusqlite::Connection;

use lotto539_db::db::insert_draw;
use lotto539_db::models::{validate_numbers, Draw};

/// Expected columns: date, weekday, then the five numbers. The weekday
/// column is ignored; it is derived from the date.
fn parse_record(record: &csv::StringRecord) -> Result<Draw> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("missing field at index {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("cannot parse '{}' (index {})", s, idx))
    };

    let date = parse_date(&get(0)?)?;
    let numbers: [u8; 5] = [get_u8(2)?, get_u8(3)?, get_u8(4)?, get_u8(5)?, get_u8(6)?];
    validate_numbers(&numbers)?;

    Ok(Draw { date, numbers })
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date);
        }
    }
    anyhow::bail!("invalid date format: '{}'", raw)
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_csv(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("cannot open {:?}", path))?;

    let tx = conn
        .unchecked_transaction()
        .context("cannot start transaction")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => match parse_record(&record) {
                Ok(draw) => match insert_draw(&tx, &draw) {
                    Ok(true) => result.inserted += 1,
                    Ok(false) => result.skipped += 1,
                    Err(e) => {
                        eprintln!("insert error at row {}: {}", result.total_records, e);
                        result.errors += 1;
                    }
                },
                Err(e) => {
                    eprintln!("parse error at row {}: {}", result.total_records, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                eprintln!("read error at row {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("commit failed")?;
    Ok(result)
}
