use crate::aircraft::Aircraft;
use crate::airport::{AirportCode, by_iata};
use crate::flight::{FlightRoute, RouteDraft, RouteStatus};
use crate::time::UtcInstant;
use crate::wall_clock::{TimeError, WallClock, format_for_display, to_utc_instant, to_wall_clock_string};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field}: {source}")]
    Time {
        field: &'static str,
        #[source]
        source: TimeError,
    },
    #[error("unknown airport '{code}'")]
    UnknownAirport { code: String },
    #[error("unknown aircraft '{id}'")]
    UnknownAircraft { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteForm {
    pub flight_number: String,
    pub aircraft_id: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: WallClock,
    pub arrival_time: WallClock,
    pub status: RouteStatus,
}

impl RouteForm {
    pub fn blank(aircraft: &[Aircraft]) -> RouteForm {
        RouteForm {
            flight_number: String::new(),
            aircraft_id: aircraft.first().map(|a| a.id.to_string()).unwrap_or_default(),
            origin: String::new(),
            destination: String::new(),
            departure_time: WallClock::empty(),
            arrival_time: WallClock::empty(),
            status: RouteStatus::Scheduled,
        }
    }

    pub fn from_route(route: &FlightRoute) -> RouteForm {
        RouteForm {
            flight_number: route.flight_number.clone(),
            aircraft_id: route.aircraft_id.to_string(),
            origin: route.origin.to_string(),
            destination: route.destination.to_string(),
            departure_time: to_wall_clock_string(Some(&route.departure_time)),
            arrival_time: to_wall_clock_string(Some(&route.arrival_time)),
            status: route.status,
        }
    }

    pub fn submit(&self, aircraft: &[Aircraft]) -> Result<RouteDraft, FormError> {
        let flight_number = required("flight_number", &self.flight_number)?;
        let aircraft_id = required("aircraft_id", &self.aircraft_id)?;
        let aircraft_id = aircraft
            .iter()
            .find(|a| *a.id == *aircraft_id)
            .map(|a| a.id.clone())
            .ok_or_else(|| FormError::UnknownAircraft {
                id: aircraft_id.to_string(),
            })?;

        Ok(RouteDraft {
            flight_number: flight_number.to_string(),
            aircraft_id,
            origin: airport_field("origin", &self.origin)?,
            destination: airport_field("destination", &self.destination)?,
            departure_time: time_field("departure_time", &self.departure_time)?,
            arrival_time: time_field("arrival_time", &self.arrival_time)?,
            status: self.status,
        })
    }
}

pub fn saved_as_preview(value: &WallClock) -> Option<String> {
    match to_utc_instant(value) {
        Ok(Some(instant)) => Some(format!("Will be saved as UTC: {}", format_for_display(&instant))),
        _ => None,
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Missing { field });
    }
    Ok(value)
}

fn airport_field(field: &'static str, value: &str) -> Result<AirportCode, FormError> {
    let code = required(field, value)?;
    by_iata(code)
        .map(|a| Arc::from(a.iata))
        .ok_or_else(|| FormError::UnknownAirport {
            code: code.to_string(),
        })
}

fn time_field(field: &'static str, value: &WallClock) -> Result<UtcInstant, FormError> {
    to_utc_instant(value)
        .map_err(|source| FormError::Time { field, source })?
        .ok_or(FormError::Missing { field })
}
