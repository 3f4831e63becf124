//! Static catalog of navigational channels into the port.

use serde::Serialize;

use crate::port::model::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelStatus {
    Open,
    Restricted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLevel {
    Low,
    Moderate,
    High,
}

/// A navigational route. Depth and width are in metres.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationRoute {
    pub id: &'static str,
    pub name: &'static str,
    pub status: ChannelStatus,
    pub depth: f64,
    pub width: u32,
    pub traffic: TrafficLevel,
    pub coordinates: [Coordinates; 2],
}

/// The fixed set of routes served by `/api/v1/routes`.
pub fn catalog() -> Vec<NavigationRoute> {
    vec![
        NavigationRoute {
            id: "ROUTE001",
            name: "Main Channel",
            status: ChannelStatus::Open,
            depth: 15.5,
            width: 200,
            traffic: TrafficLevel::Moderate,
            coordinates: [
                Coordinates { lat: 40.7128, lng: -74.0060 },
                Coordinates { lat: 40.7150, lng: -74.0040 },
            ],
        },
        NavigationRoute {
            id: "ROUTE002",
            name: "North Entrance",
            status: ChannelStatus::Restricted,
            depth: 12.0,
            width: 150,
            traffic: TrafficLevel::Low,
            coordinates: [
                Coordinates { lat: 40.7200, lng: -74.0100 },
                Coordinates { lat: 40.7180, lng: -74.0080 },
            ],
        },
        NavigationRoute {
            id: "ROUTE003",
            name: "South Basin",
            status: ChannelStatus::Open,
            depth: 18.0,
            width: 300,
            traffic: TrafficLevel::High,
            coordinates: [
                Coordinates { lat: 40.7100, lng: -74.0120 },
                Coordinates { lat: 40.7120, lng: -74.0100 },
            ],
        },
    ]
}
