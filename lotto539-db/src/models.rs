use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDate};

/// Both supported games draw 5 distinct numbers from 1-39.
pub const POOL_SIZE: u8 = 39;
pub const PICK_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Game {
    /// Taiwan Daily Cash 539 (draws Monday through Saturday)
    #[clap(name = "539")]
    Daily539,
    /// California Fantasy 5 (draws every day)
    Fantasy5,
}

impl Game {
    /// Weekdays whose draws are checked against a Monday strategy.
    /// 0 = Monday. 539 chases Tuesday-Saturday, Fantasy 5 Tuesday-Sunday.
    pub fn target_weekdays(&self) -> &'static [u8] {
        match self {
            Game::Daily539 => &[1, 2, 3, 4, 5],
            Game::Fantasy5 => &[1, 2, 3, 4, 5, 6],
        }
    }

    /// Days after Monday covered by the chase window.
    pub fn week_span_days(&self) -> i64 {
        match self {
            Game::Daily539 => 5,
            Game::Fantasy5 => 6,
        }
    }

    pub fn db_file(&self) -> &'static str {
        match self {
            Game::Daily539 => "lotto539.db",
            Game::Fantasy5 => "fantasy5.db",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Game::Daily539 => "539",
            Game::Fantasy5 => "fantasy5",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub date: NaiveDate,
    pub numbers: [u8; 5],
}

impl Draw {
    /// 0 = Monday ... 6 = Sunday.
    pub fn weekday(&self) -> u8 {
        self.date.weekday().num_days_from_monday() as u8
    }

    pub fn contains(&self, n: u8) -> bool {
        self.numbers.contains(&n)
    }
}

#[derive(Debug, Clone)]
pub struct NumberStats {
    pub number: u8,
    pub frequency: u32,
    pub gap: u32,
}

#[derive(Debug, Clone)]
pub struct NumberProbability {
    pub number: u8,
    pub probability: f64,
    pub tag: ProbabilityTag,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProbabilityTag {
    Hot,
    Cold,
    Normal,
}

impl std::fmt::Display for ProbabilityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbabilityTag::Hot => write!(f, "HOT"),
            ProbabilityTag::Cold => write!(f, "COLD"),
            ProbabilityTag::Normal => write!(f, "-"),
        }
    }
}

/// A logged number suggestion, one row per (date, strategy).
#[derive(Debug, Clone)]
pub struct Prediction {
    pub date: NaiveDate,
    pub strategy: String,
    pub numbers: Vec<u8>,
    /// How many suggested numbers matched the actual draw; None until verified.
    pub matches: Option<u32>,
}

pub fn validate_numbers(numbers: &[u8; 5]) -> Result<()> {
    for &n in numbers {
        if n < 1 || n > POOL_SIZE {
            bail!("number {} out of range (1-{})", n, POOL_SIZE);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("duplicate number: {}", numbers[i]);
            }
        }
    }
    Ok(())
}

pub fn numbers_to_string(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn parse_numbers(s: &str) -> Vec<u8> {
    s.split(',')
        .filter_map(|part| part.trim().parse::<u8>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_numbers_ok() {
        assert!(validate_numbers(&[1, 2, 3, 4, 5]).is_ok());
        assert!(validate_numbers(&[39, 38, 37, 36, 35]).is_ok());
    }

    #[test]
    fn test_validate_numbers_out_of_range() {
        assert!(validate_numbers(&[0, 2, 3, 4, 5]).is_err());
        assert!(validate_numbers(&[1, 2, 3, 4, 40]).is_err());
    }

    #[test]
    fn test_validate_numbers_duplicate() {
        assert!(validate_numbers(&[7, 7, 3, 4, 5]).is_err());
    }

    #[test]
    fn test_weekday() {
        // 2026-08-24 is a Monday
        let draw = Draw {
            date: NaiveDate::from_ymd_opt(2026, 8, 24).unwrap(),
            numbers: [1, 2, 3, 4, 5],
        };
        assert_eq!(draw.weekday(), 0);

        let draw = Draw {
            date: NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
            numbers: [1, 2, 3, 4, 5],
        };
        assert_eq!(draw.weekday(), 6);
    }

    #[test]
    fn test_game_target_weekdays() {
        assert_eq!(Game::Daily539.target_weekdays(), &[1, 2, 3, 4, 5]);
        assert_eq!(Game::Fantasy5.target_weekdays(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(Game::Daily539.week_span_days(), 5);
        assert_eq!(Game::Fantasy5.week_span_days(), 6);
    }

    #[test]
    fn test_numbers_round_trip() {
        let numbers = vec![1u8, 5, 12, 33, 39];
        let s = numbers_to_string(&numbers);
        assert_eq!(s, "01,05,12,33,39");
        assert_eq!(parse_numbers(&s), numbers);
    }

    #[test]
    fn test_parse_numbers_skips_garbage() {
        assert_eq!(parse_numbers("03, x, 17"), vec![3, 17]);
        assert_eq!(parse_numbers(""), Vec::<u8>::new());
    }
}
