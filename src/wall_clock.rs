use crate::time::UtcInstant;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("malformed wall-clock time '{input}', expected YYYY-MM-DDTHH:mm")]
    MalformedWallClock { input: String },
}

/// Text of a `YYYY-MM-DDTHH:mm` input field. The digits are UTC digits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WallClock(String);

impl WallClock {
    pub fn new(input: impl Into<String>) -> Self {
        WallClock(input.into())
    }

    pub fn empty() -> Self {
        WallClock(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `Ok(None)` for an empty field.
pub fn to_utc_instant(input: &WallClock) -> Result<Option<UtcInstant>, TimeError> {
    if input.is_empty() {
        return Ok(None);
    }
    let malformed = || TimeError::MalformedWallClock {
        input: input.as_str().to_string(),
    };

    let (date, time) = input.as_str().split_once('T').ok_or_else(malformed)?;
    let date_fields = date.split('-').collect::<Vec<_>>();
    let time_fields = time.split(':').collect::<Vec<_>>();
    let &[year, month, day] = date_fields.as_slice() else {
        return Err(malformed());
    };
    let &[hour, minute] = time_fields.as_slice() else {
        return Err(malformed());
    };

    let year = field(year, 4).ok_or_else(malformed)?;
    let month = field(month, 2).ok_or_else(malformed)?;
    let day = field(day, 2).ok_or_else(malformed)?;
    let hour = field(hour, 2).ok_or_else(malformed)?;
    let minute = field(minute, 2).ok_or_else(malformed)?;

    UtcInstant::from_utc_fields(year as i32, month, day, hour, minute)
        .map(Some)
        .ok_or_else(malformed)
}

fn field(text: &str, width: usize) -> Option<u32> {
    if text.len() != width || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

pub fn to_wall_clock_string(instant: Option<&UtcInstant>) -> WallClock {
    match instant {
        None => WallClock::empty(),
        Some(i) => WallClock(format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}",
            i.year(),
            i.month(),
            i.day(),
            i.hour(),
            i.minute()
        )),
    }
}

pub fn format_for_display(instant: &UtcInstant) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02} UTC",
        instant.year(),
        instant.month(),
        instant.day(),
        instant.hour(),
        instant.minute()
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_wall_clock() -> impl Strategy<Value = String> {
        (0..=9999i32, 1..=12u32, 1..=31u32, 0..24u32, 0..60u32)
            .prop_filter("real calendar day", |(y, m, d, _, _)| {
                chrono::NaiveDate::from_ymd_opt(*y, *m, *d).is_some()
            })
            .prop_map(|(y, m, d, h, min)| format!("{y:04}-{m:02}-{d:02}T{h:02}:{min:02}"))
    }

    proptest! {
        #[test]
        fn test_round_trip(s in arb_wall_clock()) {
            let instant = to_utc_instant(&WallClock::new(s.clone())).unwrap();
            prop_assert!(instant.is_some());
            let out = to_wall_clock_string(instant.as_ref());
            prop_assert_eq!(s, out.as_str());
        }

        #[test]
        fn test_arbitrary_text_never_panics(s in "\\PC{0,20}") {
            let _ = to_utc_instant(&WallClock::new(s));
        }
    }
}
