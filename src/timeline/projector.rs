use crate::time::UtcInstant;
use chrono::TimeDelta;

pub const MIN_WIDTH_PERCENT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: UtcInstant,
    pub end: UtcInstant,
}

impl DayWindow {
    #[cfg(test)]
    pub fn spanning(start: UtcInstant, end: UtcInstant) -> Self {
        DayWindow { start, end }
    }

    pub fn length(&self) -> TimeDelta {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightInterval {
    pub departure: UtcInstant,
    pub arrival: UtcInstant,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NowMarker {
    At(f64),
    OutOfWindow,
}

pub fn day_window_for(reference: UtcInstant) -> DayWindow {
    DayWindow {
        start: reference.start_of_day(),
        end: reference.start_of_next_day(),
    }
}

// whole units, truncated toward zero
fn hours(delta: TimeDelta) -> f64 {
    delta.num_hours() as f64
}

fn minutes(delta: TimeDelta) -> f64 {
    delta.num_minutes() as f64
}

/// `left` is floored at 0 and `width` at [`MIN_WIDTH_PERCENT`]. Width is not
/// capped and is not shortened when `left` gets clamped, so a flight that
/// starts before the window keeps its full length and may overflow.
pub fn position_of(interval: &FlightInterval, window: &DayWindow) -> Position {
    let total = hours(window.length());
    if total <= 0.0 {
        return Position {
            left: 0.0,
            width: MIN_WIDTH_PERCENT,
        };
    }
    let start_offset = hours(interval.departure - window.start);
    let duration = hours(interval.arrival - interval.departure);

    Position {
        left: (100.0 * start_offset / total).max(0.0),
        width: (100.0 * duration / total).max(MIN_WIDTH_PERCENT),
    }
}

/// Unlike [`position_of`], an instant outside `[start, end]` is not clamped
/// onto the edge: the marker is reported as hidden.
pub fn now_position_of(now: UtcInstant, window: &DayWindow) -> NowMarker {
    let total = minutes(window.length());
    if now < window.start || now > window.end || total <= 0.0 {
        return NowMarker::OutOfWindow;
    }
    let offset = minutes(now - window.start);
    NowMarker::At((100.0 * offset / total).clamp(0.0, 100.0))
}
