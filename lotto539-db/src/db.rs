use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::Path;

use crate::models::{Draw, Game, Prediction, numbers_to_string, parse_numbers};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    date      TEXT PRIMARY KEY,
    number_1  INTEGER NOT NULL,
    number_2  INTEGER NOT NULL,
    number_3  INTEGER NOT NULL,
    number_4  INTEGER NOT NULL,
    number_5  INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS predictions (
    date      TEXT NOT NULL,
    strategy  TEXT NOT NULL,
    numbers   TEXT NOT NULL,
    matches   INTEGER,
    PRIMARY KEY (date, strategy)
);
";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn db_path(game: Game) -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push(game.db_file());
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("cannot open database {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).context("migration failed")?;
    Ok(())
}

pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO draws (date, number_1, number_2, number_3, number_4, number_5)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                draw.date.format(DATE_FORMAT).to_string(),
                draw.numbers[0],
                draw.numbers[1],
                draw.numbers[2],
                draw.numbers[3],
                draw.numbers[4],
            ],
        )
        .context("draw insert failed")?;
    Ok(changed > 0)
}

fn rows_to_draws(rows: Vec<(String, [u8; 5])>) -> Vec<Draw> {
    let mut draws = Vec::with_capacity(rows.len());
    for (date, numbers) in rows {
        match NaiveDate::parse_from_str(&date, DATE_FORMAT) {
            Ok(d) => draws.push(Draw { date: d, numbers }),
            Err(e) => log::warn!("skipping draw with unparseable date '{}': {}", date, e),
        }
    }
    draws
}

fn query_draws(conn: &Connection, sql: &str, limit: Option<u32>) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(sql)?;
    let map = |row: &rusqlite::Row<'_>| {
        Ok((
            row.get::<_, String>(0)?,
            [
                row.get::<_, u8>(1)?,
                row.get::<_, u8>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, u8>(4)?,
                row.get::<_, u8>(5)?,
            ],
        ))
    };
    let rows = match limit {
        Some(n) => stmt.query_map([n], map)?.collect::<Result<Vec<_>, _>>()?,
        None => stmt.query_map([], map)?.collect::<Result<Vec<_>, _>>()?,
    };
    Ok(rows_to_draws(rows))
}

/// Full history in ascending date order, for weekly aggregation.
pub fn fetch_all_draws(conn: &Connection) -> Result<Vec<Draw>> {
    query_draws(
        conn,
        "SELECT date, number_1, number_2, number_3, number_4, number_5
         FROM draws ORDER BY date ASC",
        None,
    )
}

/// Most recent draws first, for stats and prediction windows.
pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    query_draws(
        conn,
        "SELECT date, number_1, number_2, number_3, number_4, number_5
         FROM draws ORDER BY date DESC LIMIT ?1",
        Some(limit),
    )
}

pub fn fetch_draw_by_date(conn: &Connection, date: NaiveDate) -> Result<Option<Draw>> {
    let mut stmt = conn.prepare(
        "SELECT date, number_1, number_2, number_3, number_4, number_5
         FROM draws WHERE date = ?1",
    )?;
    let rows = stmt
        .query_map([date.format(DATE_FORMAT).to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                [
                    row.get::<_, u8>(1)?,
                    row.get::<_, u8>(2)?,
                    row.get::<_, u8>(3)?,
                    row.get::<_, u8>(4)?,
                    row.get::<_, u8>(5)?,
                ],
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows_to_draws(rows).pop())
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}

pub fn has_prediction(conn: &Connection, date: NaiveDate, strategy: &str) -> Result<bool> {
    let count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM predictions WHERE date = ?1 AND strategy = ?2",
        rusqlite::params![date.format(DATE_FORMAT).to_string(), strategy],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Returns false when a row for (date, strategy) already exists and
/// `overwrite` is off. Overwriting keeps an already-recorded match count.
pub fn insert_prediction(conn: &Connection, p: &Prediction, overwrite: bool) -> Result<bool> {
    if !overwrite && has_prediction(conn, p.date, &p.strategy)? {
        return Ok(false);
    }
    conn.execute(
        "INSERT INTO predictions (date, strategy, numbers, matches)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(date, strategy) DO UPDATE SET numbers = excluded.numbers",
        rusqlite::params![
            p.date.format(DATE_FORMAT).to_string(),
            p.strategy,
            numbers_to_string(&p.numbers),
            p.matches,
        ],
    )
    .context("prediction insert failed")?;
    Ok(true)
}

pub fn fetch_unverified_predictions(conn: &Connection) -> Result<Vec<Prediction>> {
    let mut stmt = conn.prepare(
        "SELECT date, strategy, numbers FROM predictions
         WHERE matches IS NULL ORDER BY date ASC, strategy ASC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut predictions = Vec::with_capacity(rows.len());
    for (date, strategy, numbers) in rows {
        match NaiveDate::parse_from_str(&date, DATE_FORMAT) {
            Ok(d) => predictions.push(Prediction {
                date: d,
                strategy,
                numbers: parse_numbers(&numbers),
                matches: None,
            }),
            Err(e) => log::warn!("skipping prediction with unparseable date '{}': {}", date, e),
        }
    }
    Ok(predictions)
}

pub fn set_prediction_matches(
    conn: &Connection,
    date: NaiveDate,
    strategy: &str,
    matches: u32,
) -> Result<()> {
    conn.execute(
        "UPDATE predictions SET matches = ?3 WHERE date = ?1 AND strategy = ?2",
        rusqlite::params![date.format(DATE_FORMAT).to_string(), strategy, matches],
    )
    .context("prediction update failed")?;
    Ok(())
}
