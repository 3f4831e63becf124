//! Data loaded into the store at start-up.

use chrono::{DateTime, TimeZone, Utc};

use crate::port::model::{
    Cargo, Coordinates, Personnel, Role, Shift, Vessel, VesselStatus, VesselType,
};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).single()
}

/// Vessels present when the service starts.
pub fn vessels() -> Vec<Vessel> {
    vec![
        Vessel {
            id: "SHIP001".into(),
            name: "Atlantic Voyager".into(),
            vessel_type: VesselType::Container,
            status: VesselStatus::Docked,
            arrival_time: at(2024, 1, 15, 8, 30),
            estimated_arrival: None,
            berth_number: Some("A-12".into()),
            captain: "John Smith".into(),
            cargo: Cargo {
                containers: Some(245),
                weight: Some(4500),
                ..Default::default()
            },
            location: Coordinates { lat: 40.7128, lng: -74.0060 },
        },
        Vessel {
            id: "SHIP002".into(),
            name: "Pacific Explorer".into(),
            vessel_type: VesselType::Tanker,
            status: VesselStatus::Approaching,
            arrival_time: None,
            estimated_arrival: at(2024, 1, 15, 14, 0),
            berth_number: None,
            captain: "Maria Garcia".into(),
            cargo: Cargo {
                kind: Some("crude_oil".into()),
                volume: Some(85000),
                ..Default::default()
            },
            location: Coordinates { lat: 40.7000, lng: -74.0200 },
        },
        Vessel {
            id: "SHIP003".into(),
            name: "Mediterranean Star".into(),
            vessel_type: VesselType::BulkCarrier,
            status: VesselStatus::Loading,
            arrival_time: None,
            estimated_arrival: None,
            berth_number: Some("B-08".into()),
            captain: "Ahmed Hassan".into(),
            cargo: Cargo {
                kind: Some("grain".into()),
                weight: Some(12000),
                ..Default::default()
            },
            location: Coordinates { lat: 40.7150, lng: -74.0080 },
        },
    ]
}

/// Staff roster.
pub fn personnel() -> Vec<Personnel> {
    let person = |id: &str, name: &str, role, shift, active, location: &str| Personnel {
        id: id.into(),
        name: name.into(),
        role,
        shift,
        active,
        location: location.into(),
    };

    vec![
        person("STAFF001", "Carlos Rodriguez", Role::PortManager, Shift::Day, true, "Control Tower"),
        person("STAFF002", "Lisa Chen", Role::CraneOperator, Shift::Day, true, "Berth A-12"),
        person("STAFF003", "Mohammed Ali", Role::SecurityGuard, Shift::Night, false, "Gate 1"),
        person("STAFF004", "Anna Kowalski", Role::CustomsOfficer, Shift::Day, true, "Customs Office"),
    ]
}
