use crate::aircraft::AircraftId;
use crate::airport::AirportCode;
use crate::time::UtcInstant;
use crate::timeline::FlightInterval;
use crate::wall_clock::format_for_display;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tabled::Tabled;

pub type RouteId = Arc<str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    #[default]
    Scheduled,
    InFlight,
    Completed,
    Delayed,
    Cancelled,
}

impl RouteStatus {
    pub const ALL: [RouteStatus; 5] = [
        RouteStatus::Scheduled,
        RouteStatus::InFlight,
        RouteStatus::Completed,
        RouteStatus::Delayed,
        RouteStatus::Cancelled,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            RouteStatus::Scheduled => "scheduled",
            RouteStatus::InFlight => "in_flight",
            RouteStatus::Completed => "completed",
            RouteStatus::Delayed => "delayed",
            RouteStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_token(token: &str) -> Option<RouteStatus> {
        let token = token.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        RouteStatus::ALL.into_iter().find(|s| s.token() == token)
    }

    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            RouteStatus::Scheduled => text.blue(),
            RouteStatus::InFlight => text.green(),
            RouteStatus::Completed => text.dimmed(),
            RouteStatus::Delayed => text.yellow(),
            RouteStatus::Cancelled => text.red(),
        }
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RouteStatus::Scheduled => "Scheduled",
            RouteStatus::InFlight => "In Flight",
            RouteStatus::Completed => "Completed",
            RouteStatus::Delayed => "Delayed",
            RouteStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRoute {
    pub id: RouteId,
    pub flight_number: String,
    pub aircraft_id: AircraftId,
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub departure_time: UtcInstant,
    pub arrival_time: UtcInstant,
    #[serde(default)]
    pub status: RouteStatus,
}

impl FlightRoute {
    pub fn from_draft(id: RouteId, draft: RouteDraft) -> FlightRoute {
        FlightRoute {
            id,
            flight_number: draft.flight_number,
            aircraft_id: draft.aircraft_id,
            origin: draft.origin,
            destination: draft.destination,
            departure_time: draft.departure_time,
            arrival_time: draft.arrival_time,
            status: draft.status,
        }
    }

    pub fn interval(&self) -> FlightInterval {
        FlightInterval {
            departure: self.departure_time,
            arrival: self.arrival_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteDraft {
    pub flight_number: String,
    pub aircraft_id: AircraftId,
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub departure_time: UtcInstant,
    pub arrival_time: UtcInstant,
    pub status: RouteStatus,
}

#[derive(Tabled)]
pub struct RouteRow {
    #[tabled(rename = "Flight")]
    pub flight_number: String,
    #[tabled(rename = "Aircraft")]
    pub aircraft: String,
    #[tabled(rename = "Route")]
    pub route: String,
    #[tabled(rename = "Departure")]
    pub departure: String,
    #[tabled(rename = "Arrival")]
    pub arrival: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl RouteRow {
    pub fn new(route: &FlightRoute, aircraft: Option<&str>, colorize: bool) -> RouteRow {
        let status = route.status.to_string();
        RouteRow {
            flight_number: route.flight_number.clone(),
            aircraft: aircraft.unwrap_or(&*route.aircraft_id).to_string(),
            route: format!("{} → {}", route.origin, route.destination),
            departure: format_for_display(&route.departure_time),
            arrival: format_for_display(&route.arrival_time),
            status: if colorize {
                route.status.paint(&status).to_string()
            } else {
                status
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tokens() {
        assert_eq!(Some(RouteStatus::InFlight), RouteStatus::from_token("in_flight"));
        assert_eq!(Some(RouteStatus::InFlight), RouteStatus::from_token("In Flight"));
        assert_eq!(Some(RouteStatus::Delayed), RouteStatus::from_token(" DELAYED "));
        assert_eq!(None, RouteStatus::from_token("boarding"));
    }

    #[test]
    fn test_deserialize_storage_record() {
        let json = r#"{
            "id": "7f1c5e0a-3f4b-4d0e-9a57-1d2a4f9c0b11",
            "flight_number": "AA101",
            "aircraft_id": "ac-1",
            "origin": "JFK",
            "destination": "LHR",
            "departure_time": "2024-03-15T06:00:00+00:00",
            "arrival_time": "2024-03-15T13:30:00.000Z",
            "status": "in_flight"
        }"#;
        let route: FlightRoute = serde_json::from_str(json).unwrap();
        assert_eq!(RouteStatus::InFlight, route.status);
        assert_eq!(6, route.interval().departure.hour());
        assert_eq!(30, route.interval().arrival.minute());
    }

    #[test]
    fn test_row_uses_utc_display() {
        let route = FlightRoute {
            id: Arc::from("r1"),
            flight_number: "AA101".to_string(),
            aircraft_id: Arc::from("ac-1"),
            origin: "JFK".into(),
            destination: "LHR".into(),
            departure_time: "2024-03-15T06:00:00Z".parse().unwrap(),
            arrival_time: "2024-03-15T13:30:00Z".parse().unwrap(),
            status: RouteStatus::Delayed,
        };
        let row = RouteRow::new(&route, Some("N101AA"), false);
        assert_eq!("N101AA", row.aircraft);
        assert_eq!("JFK → LHR", row.route);
        assert_eq!("2024-03-15 06:00 UTC", row.departure);
        assert_eq!("Delayed", row.status);
    }
}
