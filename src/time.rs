use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SecondsFormat, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash, Serialize, Deserialize)]
pub struct UtcInstant(pub DateTime<Utc>);

impl UtcInstant {
    pub fn from_utc_fields(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, minute, 0)
            .map(|naive| UtcInstant(naive.and_utc()))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    #[cfg(test)]
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn start_of_day(&self) -> Self {
        UtcInstant(self.0.date_naive().and_time(NaiveTime::MIN).and_utc())
    }

    pub fn start_of_next_day(&self) -> Self {
        let next = self.0.date_naive().succ_opt().unwrap_or(NaiveDate::MAX);
        UtcInstant(next.and_time(NaiveTime::MIN).and_utc())
    }

    pub fn iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl fmt::Display for UtcInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iso_string())
    }
}

// RFC 3339 with an offset, as stored. Wall-clock input goes through `wall_clock`.
impl FromStr for UtcInstant {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s).map(|dt| UtcInstant(dt.with_timezone(&Utc)))
    }
}

impl Sub<UtcInstant> for UtcInstant {
    type Output = TimeDelta;

    fn sub(self, rhs: UtcInstant) -> Self::Output {
        self.0 - rhs.0
    }
}

impl Add<TimeDelta> for UtcInstant {
    type Output = Self;

    fn add(self, rhs: TimeDelta) -> Self::Output {
        UtcInstant(self.0 + rhs)
    }
}

impl Sub<TimeDelta> for UtcInstant {
    type Output = Self;

    fn sub(self, rhs: TimeDelta) -> Self::Output {
        UtcInstant(self.0 - rhs)
    }
}
