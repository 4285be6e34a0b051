use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::{error::Error, record::NormalizedRecord};

/// A `YYYY-MM` month of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMonth {
    pub year: i32,
    pub month: u32,
}

impl FromStr for TargetMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let well_formed = s.len() == 7
            && s.bytes()
                .enumerate()
                .all(|(i, b)| if i == 4 { b == b'-' } else { b.is_ascii_digit() });
        if !well_formed {
            return Err(Error::InvalidTargetMonth(s.to_string()));
        }
        let date = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map_err(|_| Error::InvalidTargetMonth(s.to_string()))?;
        Ok(TargetMonth {
            year: date.year(),
            month: date.month(),
        })
    }
}

impl fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Keep the records whose month matches `target`. Only the month is compared.
/// `None` disables filtering and returns the dataset unchanged.
pub fn filter(records: Vec<NormalizedRecord>, target: Option<&TargetMonth>) -> Vec<NormalizedRecord> {
    let target = match target {
        Some(target) => target,
        None => return records,
    };
    let total = records.len();
    let kept: Vec<_> = records
        .into_iter()
        .filter(|record| record.month == target.month)
        .collect();
    debug!(
        "Month filter {} kept {} of {} records.",
        target,
        kept.len(),
        total
    );
    kept
}
