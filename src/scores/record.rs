use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One saved result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
    pub date: String,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, score: u32, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score,
            date: date.into(),
        }
    }

    /// Record stamped with today's date
    pub fn today(name: impl Into<String>, score: u32) -> Self {
        Self::new(name, score, today())
    }

    /// Line shown in the scores panel, `rank` counts from 1
    pub fn display_line(&self, rank: usize) -> String {
        format!("{}. {}: {} points ({})", rank, self.name, self.score, self.date)
    }
}

/// Current UTC date as `YYYY-MM-DD`
pub fn today() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format_date(days_to_civil((secs / 86_400) as i64))
}

fn format_date((year, month, day): (i64, u32, u32)) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Days since 1970-01-01 to a proleptic Gregorian (year, month, day)
fn days_to_civil(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
