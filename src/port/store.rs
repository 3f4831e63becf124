//! In-memory port state.
//!
//! # Responsibilities
//! - Own the vessel fleet, staff roster and operations log
//! - Answer filtered queries
//! - Apply berthing, the only mutation
//!
//! # Design Decisions
//! - Vessels and the operations log share one `RwLock`, so a berthing updates
//!   the vessel and appends its record in a single critical section
//! - Personnel never change after start-up and are kept outside the lock
//! - Every mutation bumps a version carried by [`FleetSnapshot`], which lets
//!   observers discard snapshots older than one they already applied
//! - Callers only ever receive clones; no handle to the collections escapes

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::port::model::{
    Cargo, Coordinates, Personnel, PersonnelFilter, Vessel, VesselFilter, VesselStatus,
};
use crate::port::operations::{
    OperationDetails, OperationLog, OperationRecord, OperationType, Outcome, RecentOperations,
};
use crate::port::seed;

/// Errors returned by [`PortStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("vessel {0} not found")]
    VesselNotFound(String),

    #[error("berth number is required")]
    MissingBerthNumber,

    #[error("port store lock poisoned")]
    LockPoisoned,
}

/// Per-status vessel counts at one store version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetSnapshot {
    pub version: u64,
    /// One entry per [`VesselStatus::ALL`] member, zero counts included.
    pub counts: Vec<(VesselStatus, usize)>,
}

impl FleetSnapshot {
    fn capture(version: u64, vessels: &[Vessel]) -> Self {
        let counts = VesselStatus::ALL
            .iter()
            .map(|status| {
                let count = vessels.iter().filter(|v| v.status == *status).count();
                (*status, count)
            })
            .collect();
        Self { version, counts }
    }

    /// Vessels currently holding a berth.
    pub fn berths_occupied(&self) -> usize {
        self.counts
            .iter()
            .filter(|(status, _)| status.occupies_berth())
            .map(|(_, count)| count)
            .sum()
    }

    pub fn count(&self, status: VesselStatus) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, count)| *count)
    }
}

/// Result of a successful berthing.
#[derive(Debug, Clone)]
pub struct BerthOutcome {
    pub vessel: Vessel,
    pub operation: OperationRecord,
    pub fleet: FleetSnapshot,
}

/// Cargo tracking view of a vessel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoView {
    pub ship_id: String,
    pub ship_name: String,
    pub cargo: Cargo,
    pub status: VesselStatus,
    pub location: String,
    pub coordinates: Coordinates,
    pub last_update: DateTime<Utc>,
}

#[derive(Debug)]
struct FleetState {
    vessels: Vec<Vessel>,
    operations: OperationLog,
    version: u64,
}

impl FleetState {
    fn find(&self, id: &str) -> Result<&Vessel, StoreError> {
        self.vessels
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| StoreError::VesselNotFound(id.to_string()))
    }
}

/// Thread-safe in-memory store for vessels, staff and operations.
#[derive(Debug)]
pub struct PortStore {
    fleet: RwLock<FleetState>,
    personnel: Vec<Personnel>,
}

impl PortStore {
    /// Create a store holding the given vessels and staff.
    pub fn new(vessels: Vec<Vessel>, personnel: Vec<Personnel>) -> Self {
        Self {
            fleet: RwLock::new(FleetState {
                vessels,
                operations: OperationLog::new(),
                version: 0,
            }),
            personnel,
        }
    }

    /// Create a store populated with the start-up data set.
    pub fn seeded() -> Self {
        Self::new(seed::vessels(), seed::personnel())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, FleetState>, StoreError> {
        self.fleet.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, FleetState>, StoreError> {
        self.fleet.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Vessels matching every populated filter field, in insertion order.
    pub fn list_vessels(&self, filter: &VesselFilter) -> Result<Vec<Vessel>, StoreError> {
        let fleet = self.read()?;
        Ok(fleet
            .vessels
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect())
    }

    pub fn get_vessel(&self, id: &str) -> Result<Vessel, StoreError> {
        self.read()?.find(id).cloned()
    }

    /// Dock a vessel at `berth_number`.
    ///
    /// Sets status to docked, assigns the berth, stamps the arrival time and
    /// appends a successful berth record holding the previous status.
    pub fn berth_vessel(&self, id: &str, berth_number: &str) -> Result<BerthOutcome, StoreError> {
        let mut fleet = self.write()?;
        let state = &mut *fleet;

        let vessel = state
            .vessels
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| StoreError::VesselNotFound(id.to_string()))?;
        if berth_number.is_empty() {
            return Err(StoreError::MissingBerthNumber);
        }

        let now = Utc::now();
        let previous_status = vessel.status;
        vessel.status = VesselStatus::Docked;
        vessel.berth_number = Some(berth_number.to_string());
        vessel.arrival_time = Some(now);
        let vessel = vessel.clone();

        let operation = state.operations.append(
            OperationType::Berth,
            id,
            OperationDetails {
                berth_number: berth_number.to_string(),
                previous_status,
            },
            Outcome::Success,
            now,
        );

        state.version += 1;
        let fleet = FleetSnapshot::capture(state.version, &state.vessels);

        Ok(BerthOutcome {
            vessel,
            operation,
            fleet,
        })
    }

    /// Staff matching every populated filter field, in roster order.
    pub fn list_personnel(&self, filter: &PersonnelFilter) -> Vec<Personnel> {
        self.personnel
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub fn active_personnel(&self) -> usize {
        self.personnel.iter().filter(|p| p.active).count()
    }

    pub fn recent_operations(&self) -> Result<RecentOperations, StoreError> {
        Ok(self.read()?.operations.recent())
    }

    pub fn cargo_status(&self, id: &str) -> Result<CargoView, StoreError> {
        let fleet = self.read()?;
        let vessel = fleet.find(id)?;
        Ok(CargoView {
            ship_id: vessel.id.clone(),
            ship_name: vessel.name.clone(),
            cargo: vessel.cargo.clone(),
            status: vessel.status,
            location: vessel.location_label().to_string(),
            coordinates: vessel.location,
            last_update: Utc::now(),
        })
    }

    /// Current per-status counts.
    pub fn fleet_snapshot(&self) -> Result<FleetSnapshot, StoreError> {
        let fleet = self.read()?;
        Ok(FleetSnapshot::capture(fleet.version, &fleet.vessels))
    }
}

impl Default for PortStore {
    fn default() -> Self {
        Self::seeded()
    }
}
