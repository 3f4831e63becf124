//! Vessel and personnel types.
//!
//! Wire names are camelCase to match the published JSON API; enum values are
//! snake_case strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum VesselType {
    Container,
    Tanker,
    BulkCarrier,
}

impl VesselType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VesselType::Container => "container",
            VesselType::Tanker => "tanker",
            VesselType::BulkCarrier => "bulk_carrier",
        }
    }
}

/// Where a vessel is in its port call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum VesselStatus {
    Approaching,
    Docked,
    Loading,
    Departing,
}

impl VesselStatus {
    /// Every status, in the order metrics report them.
    pub const ALL: [VesselStatus; 4] = [
        VesselStatus::Approaching,
        VesselStatus::Docked,
        VesselStatus::Loading,
        VesselStatus::Departing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VesselStatus::Approaching => "approaching",
            VesselStatus::Docked => "docked",
            VesselStatus::Loading => "loading",
            VesselStatus::Departing => "departing",
        }
    }

    /// Statuses that hold a berth and count against port capacity.
    pub fn occupies_berth(&self) -> bool {
        matches!(self, VesselStatus::Docked | VesselStatus::Loading)
    }
}

/// Geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Cargo carried by a vessel. Shape varies by vessel type, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cargo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub containers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u32>,
}

/// A vessel known to the port.
///
/// Invariant: `berth_number` is set exactly when `status` occupies a berth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vessel {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub vessel_type: VesselType,
    pub status: VesselStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_arrival: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub berth_number: Option<String>,
    pub captain: String,
    pub cargo: Cargo,
    pub location: Coordinates,
}

impl Vessel {
    /// Whether status and berth assignment agree.
    pub fn is_consistent(&self) -> bool {
        self.status.occupies_berth() == self.berth_number.is_some()
    }

    /// Berth label, or "At sea" when the vessel holds none.
    pub fn location_label(&self) -> &str {
        self.berth_number.as_deref().unwrap_or("At sea")
    }
}

/// Filter for vessel listings. Every populated field must match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VesselFilter {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub vessel_type: Option<String>,
}

impl VesselFilter {
    pub fn matches(&self, vessel: &Vessel) -> bool {
        field_matches(self.status.as_deref(), vessel.status.as_str())
            && field_matches(self.vessel_type.as_deref(), vessel.vessel_type.as_str())
    }
}

/// Job performed by a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Role {
    PortManager,
    CraneOperator,
    SecurityGuard,
    CustomsOfficer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::PortManager => "port_manager",
            Role::CraneOperator => "crane_operator",
            Role::SecurityGuard => "security_guard",
            Role::CustomsOfficer => "customs_officer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Day,
    Night,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Day => "day",
            Shift::Night => "night",
        }
    }
}

/// A member of port staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personnel {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub shift: Shift,
    pub active: bool,
    pub location: String,
}

/// Filter for staff listings. Every populated field must match.
///
/// `active` keeps the raw query string: only the literal `"true"` selects
/// active staff, any other value (including an empty one) selects inactive
/// staff. An absent parameter does not filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonnelFilter {
    pub role: Option<String>,
    pub shift: Option<String>,
    pub active: Option<String>,
}

impl PersonnelFilter {
    pub fn matches(&self, person: &Personnel) -> bool {
        field_matches(self.role.as_deref(), person.role.as_str())
            && field_matches(self.shift.as_deref(), person.shift.as_str())
            && self
                .active
                .as_deref()
                .map_or(true, |raw| person.active == (raw == "true"))
    }
}

// Empty strings are treated like absent parameters.
fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        Some(wanted) if !wanted.is_empty() => wanted == actual,
        _ => true,
    }
}
