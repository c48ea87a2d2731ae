use crate::timeline::tests::utils::{arb_instant, arb_offset};
use crate::timeline::projector::{FlightInterval, MIN_WIDTH_PERCENT, NowMarker, day_window_for, now_position_of, position_of};
use chrono::{TimeDelta, Timelike};
use proptest::prelude::*;
use proptest::proptest;

proptest! {
    #[test]
    fn test_window_is_aligned_and_a_day_long(reference in arb_instant()) {
        let window = day_window_for(reference);
        prop_assert_eq!(TimeDelta::hours(24), window.end - window.start);
        let start = window.start.as_datetime();
        prop_assert_eq!((0, 0, 0, 0), (start.hour(), start.minute(), start.second(), start.nanosecond()));
        prop_assert!(window.start <= reference && reference < window.end);
    }

    #[test]
    fn test_now_marker_is_monotonic(
        reference in arb_instant(),
        a in 0..=86_400i64,
        b in 0..=86_400i64,
    ) {
        let window = day_window_for(reference);
        let (early, late) = (a.min(b), a.max(b));
        let early = now_position_of(window.start + TimeDelta::seconds(early), &window);
        let late = now_position_of(window.start + TimeDelta::seconds(late), &window);
        match (early, late) {
            (NowMarker::At(e), NowMarker::At(l)) => {
                prop_assert!(e <= l, "{} > {}", e, l);
                prop_assert!((0.0..=100.0).contains(&e) && (0.0..=100.0).contains(&l));
            }
            other => prop_assert!(false, "marker hidden inside the window: {:?}", other),
        }
    }

    #[test]
    fn test_position_is_clamped(
        reference in arb_instant(),
        departure_offset in arb_offset(),
        duration in arb_offset(),
    ) {
        let window = day_window_for(reference);
        let departure = window.start + departure_offset;
        let interval = FlightInterval { departure, arrival: departure + duration };
        let pos = position_of(&interval, &window);
        prop_assert!(pos.left >= 0.0);
        prop_assert!(pos.width >= MIN_WIDTH_PERCENT);
    }

    #[test]
    fn test_now_outside_window_is_hidden(reference in arb_instant(), past in 1..86_400i64) {
        let window = day_window_for(reference);
        prop_assert_eq!(NowMarker::OutOfWindow, now_position_of(window.start - TimeDelta::seconds(past), &window));
        prop_assert_eq!(NowMarker::OutOfWindow, now_position_of(window.end + TimeDelta::seconds(past), &window));
    }
}
