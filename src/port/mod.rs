//! Port domain: vessels, staff and the operations they generate.
//!
//! # Data Flow
//! ```text
//! seed.rs (fixed start-up data)
//!     → store.rs (PortStore: filtered reads, berthing)
//!     → operations.rs (append-only log, last-50 view)
//!
//! navigation.rs holds the static channel catalog; it never changes.
//! ```

pub mod model;
pub mod navigation;
pub mod operations;
pub mod seed;
pub mod store;

pub use model::{
    Cargo, Coordinates, Personnel, PersonnelFilter, Role, Shift, Vessel, VesselFilter,
    VesselStatus, VesselType,
};
pub use operations::{
    OperationDetails, OperationRecord, OperationType, Outcome, RecentOperations,
    RECENT_OPERATIONS_LIMIT,
};
pub use store::{BerthOutcome, CargoView, FleetSnapshot, PortStore, StoreError};
