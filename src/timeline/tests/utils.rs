use crate::aircraft::{Aircraft, AircraftStatus};
use crate::flight::{FlightRoute, RouteStatus};
use crate::time::UtcInstant;
use crate::timeline::projector::{DayWindow, FlightInterval, day_window_for};
use chrono::TimeDelta;
use proptest::prelude::Strategy;
use std::sync::Arc;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn at(iso: &str) -> UtcInstant {
    iso.parse().unwrap()
}

pub fn interval(departure: &str, arrival: &str) -> FlightInterval {
    FlightInterval {
        departure: at(departure),
        arrival: at(arrival),
    }
}

pub fn window_of(iso: &str) -> DayWindow {
    day_window_for(at(iso))
}

pub fn add_aircraft(aircraft: &mut Vec<Aircraft>, aircraft_id: &str, registration: &str, aircraft_type: &str) {
    aircraft.push(Aircraft {
        id: id(aircraft_id),
        registration: registration.to_string(),
        aircraft_type: aircraft_type.to_string(),
        status: AircraftStatus::Active,
    });
}

pub fn add_route(
    routes: &mut Vec<FlightRoute>,
    flight_number: &str,
    aircraft_id: &str,
    departure_time: &str,
    arrival_time: &str,
    status: RouteStatus,
) {
    routes.push(FlightRoute {
        id: id(&format!("route-{}", routes.len() + 1)),
        flight_number: flight_number.to_string(),
        aircraft_id: id(aircraft_id),
        origin: id("JFK"),
        destination: id("LHR"),
        departure_time: at(departure_time),
        arrival_time: at(arrival_time),
        status,
    });
}

pub fn arb_instant() -> impl Strategy<Value = UtcInstant> {
    (0..4_102_444_800i64).prop_map(|secs| UtcInstant(chrono::DateTime::from_timestamp(secs, 0).unwrap()))
}

pub fn arb_offset() -> impl Strategy<Value = TimeDelta> {
    (-172_800..172_800i64).prop_map(TimeDelta::seconds)
}
