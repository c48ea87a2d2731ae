use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tabled::Tabled;

pub type AircraftId = Arc<str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AircraftStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

impl fmt::Display for AircraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AircraftStatus::Active => "active",
            AircraftStatus::Inactive => "inactive",
            AircraftStatus::Maintenance => "maintenance",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
pub struct Aircraft {
    #[tabled(rename = "ID")]
    pub id: AircraftId,
    #[tabled(rename = "Registration")]
    pub registration: String,
    #[tabled(rename = "Type")]
    pub aircraft_type: String,
    #[serde(default)]
    #[tabled(rename = "Status")]
    pub status: AircraftStatus,
}
