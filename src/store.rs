use crate::aircraft::{Aircraft, AircraftStatus};
use crate::flight::{FlightRoute, RouteDraft, RouteId};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data file error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid data file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("flight route '{id}' not found")]
    RouteNotFound { id: RouteId },
}

pub trait RouteStore {
    // ordered by registration
    fn active_aircraft(&self) -> Result<Vec<Aircraft>, StoreError>;
    // ordered by departure time
    fn routes(&self) -> Result<Vec<FlightRoute>, StoreError>;
    fn insert_route(&mut self, draft: RouteDraft) -> Result<FlightRoute, StoreError>;
    fn update_route(&mut self, id: &RouteId, draft: RouteDraft) -> Result<FlightRoute, StoreError>;
    fn delete_route(&mut self, id: &RouteId) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Records {
    #[serde(default)]
    aircraft: Vec<Aircraft>,
    #[serde(default)]
    flight_routes: Vec<FlightRoute>,
}

pub struct JsonStore {
    path: Option<PathBuf>,
    records: Records,
}

impl JsonStore {
    #[cfg(test)]
    pub fn in_memory(aircraft: Vec<Aircraft>, flight_routes: Vec<FlightRoute>) -> JsonStore {
        JsonStore {
            path: None,
            records: Records {
                aircraft,
                flight_routes,
            },
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, StoreError> {
        let data = std::fs::read_to_string(path)?;
        let records: Records = serde_json::from_str(&data)?;
        info!(
            "loaded {} aircraft and {} flight routes from {}",
            records.aircraft.len(),
            records.flight_routes.len(),
            path.display()
        );
        Ok(JsonStore {
            path: Some(path.to_path_buf()),
            records,
        })
    }

    // a failed write leaves the current records untouched
    fn commit(&mut self, records: Records) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            let text = serde_json::to_string_pretty(&records)?;
            std::fs::write(path, format!("{text}\n"))?;
            debug!("wrote {}", path.display());
        }
        self.records = records;
        Ok(())
    }

    fn index_of(&self, id: &RouteId) -> Result<usize, StoreError> {
        self.records
            .flight_routes
            .iter()
            .position(|r| r.id == *id)
            .ok_or_else(|| StoreError::RouteNotFound { id: id.clone() })
    }
}

impl RouteStore for JsonStore {
    fn active_aircraft(&self) -> Result<Vec<Aircraft>, StoreError> {
        let mut aircraft = self
            .records
            .aircraft
            .iter()
            .filter(|a| a.status == AircraftStatus::Active)
            .cloned()
            .collect::<Vec<_>>();
        aircraft.sort_by(|a, b| a.registration.cmp(&b.registration));
        Ok(aircraft)
    }

    fn routes(&self) -> Result<Vec<FlightRoute>, StoreError> {
        let mut routes = self.records.flight_routes.clone();
        routes.sort_by_key(|r| r.departure_time);
        Ok(routes)
    }

    fn insert_route(&mut self, draft: RouteDraft) -> Result<FlightRoute, StoreError> {
        let id: RouteId = Arc::from(Uuid::new_v4().to_string());
        let route = FlightRoute::from_draft(id, draft);
        let mut records = self.records.clone();
        records.flight_routes.push(route.clone());
        self.commit(records)?;
        debug!("inserted route {} ({})", route.flight_number, route.id);
        Ok(route)
    }

    fn update_route(&mut self, id: &RouteId, draft: RouteDraft) -> Result<FlightRoute, StoreError> {
        let idx = self.index_of(id)?;
        let route = FlightRoute::from_draft(id.clone(), draft);
        let mut records = self.records.clone();
        records.flight_routes[idx] = route.clone();
        self.commit(records)?;
        debug!("updated route {} ({})", route.flight_number, route.id);
        Ok(route)
    }

    fn delete_route(&mut self, id: &RouteId) -> Result<(), StoreError> {
        let idx = self.index_of(id)?;
        let mut records = self.records.clone();
        let removed = records.flight_routes.remove(idx);
        self.commit(records)?;
        debug!("deleted route {} ({})", removed.flight_number, removed.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::RouteStatus;
    use crate::time::UtcInstant;

    const DATA: &str = r#"{
  "aircraft": [
    { "id": "ac-2", "registration": "N202AA", "aircraft_type": "B738", "status": "active" },
    { "id": "ac-3", "registration": "N303AA", "aircraft_type": "E175", "status": "maintenance" },
    { "id": "ac-1", "registration": "N101AA", "aircraft_type": "A320", "status": "active" }
  ],
  "flight_routes": [
    {
      "id": "r2", "flight_number": "AA202", "aircraft_id": "ac-1",
      "origin": "LHR", "destination": "JFK",
      "departure_time": "2024-03-15T15:00:00+00:00", "arrival_time": "2024-03-15T23:00:00+00:00",
      "status": "scheduled"
    },
    {
      "id": "r1", "flight_number": "AA101", "aircraft_id": "ac-1",
      "origin": "JFK", "destination": "LHR",
      "departure_time": "2024-03-14T22:00:00+00:00", "arrival_time": "2024-03-15T08:00:00+00:00",
      "status": "in_flight"
    }
  ]
}"#;

    fn at(s: &str) -> UtcInstant {
        s.parse().unwrap()
    }

    fn draft(flight_number: &str) -> RouteDraft {
        RouteDraft {
            flight_number: flight_number.to_string(),
            aircraft_id: Arc::from("ac-2"),
            origin: Arc::from("ATH"),
            destination: Arc::from("HER"),
            departure_time: at("2024-03-15T06:00:00Z"),
            arrival_time: at("2024-03-15T07:00:00Z"),
            status: RouteStatus::Scheduled,
        }
    }

    fn load(dir: &tempfile::TempDir) -> (PathBuf, JsonStore) {
        let path = dir.path().join("data.json");
        std::fs::write(&path, DATA).unwrap();
        let store = JsonStore::load_from_file(&path).unwrap();
        (path, store)
    }

    #[test]
    fn test_active_aircraft_sorted_by_registration() {
        let dir = tempfile::tempdir().unwrap();
        let (_, store) = load(&dir);
        let regs = store
            .active_aircraft()
            .unwrap()
            .into_iter()
            .map(|a| a.registration)
            .collect::<Vec<_>>();
        assert_eq!(vec!["N101AA", "N202AA"], regs);
    }

    #[test]
    fn test_routes_sorted_by_departure() {
        let dir = tempfile::tempdir().unwrap();
        let (_, store) = load(&dir);
        let ids = store.routes().unwrap().into_iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(vec![Arc::<str>::from("r1"), Arc::from("r2")], ids);
    }

    #[test]
    fn test_mutations_are_written_back() {
        let dir = tempfile::tempdir().unwrap();
        let (path, mut store) = load(&dir);

        let inserted = store.insert_route(draft("OA600")).unwrap();
        assert_eq!(36, inserted.id.len());
        store.delete_route(&Arc::from("r2")).unwrap();
        let mut changed = draft("AA101");
        changed.status = RouteStatus::Delayed;
        store.update_route(&Arc::from("r1"), changed).unwrap();

        let reloaded = JsonStore::load_from_file(&path).unwrap();
        let routes = reloaded.routes().unwrap();
        assert_eq!(2, routes.len());
        assert_eq!("AA101", routes[0].flight_number);
        assert_eq!(RouteStatus::Delayed, routes[0].status);
        assert_eq!(Arc::<str>::from("ATH"), routes[0].origin);
        assert_eq!(inserted, routes[1]);
    }

    #[test]
    fn test_failed_write_keeps_previous_records() {
        let dir = tempfile::tempdir().unwrap();
        let (_, mut store) = load(&dir);
        std::fs::remove_dir_all(dir.path()).unwrap();

        assert!(matches!(store.insert_route(draft("OA600")), Err(StoreError::Io(_))));
        assert!(store.delete_route(&Arc::from("r1")).is_err());
        assert!(store.update_route(&Arc::from("r2"), draft("AA202")).is_err());

        let routes = store.routes().unwrap();
        assert_eq!(2, routes.len());
        assert_eq!("AA101", routes[0].flight_number);
        assert_eq!(Arc::<str>::from("LHR"), routes[1].origin);
    }

    #[test]
    fn test_missing_route() {
        let mut store = JsonStore::in_memory(vec![], vec![]);
        let id: RouteId = Arc::from("nope");
        assert!(matches!(
            store.delete_route(&id),
            Err(StoreError::RouteNotFound { .. })
        ));
        assert!(matches!(
            store.update_route(&id, draft("X1")),
            Err(StoreError::RouteNotFound { .. })
        ));
    }

    #[test]
    fn test_rejects_naive_timestamps_in_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{ "flight_routes": [ { "id": "r1", "flight_number": "X", "aircraft_id": "a",
                 "origin": "JFK", "destination": "LHR",
                 "departure_time": "2024-03-15T06:00", "arrival_time": "2024-03-15T07:00" } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            JsonStore::load_from_file(&path),
            Err(StoreError::Json(_))
        ));
    }
}
