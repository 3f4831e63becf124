//! Append-only log of port operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::port::model::VesselStatus;

/// Number of records exposed by [`OperationLog::recent`].
pub const RECENT_OPERATIONS_LIMIT: usize = 50;

/// Kind of port operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Berth,
    Loading,
    Unloading,
    Inspection,
    Refueling,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Berth => "berth",
            OperationType::Loading => "loading",
            OperationType::Unloading => "unloading",
            OperationType::Inspection => "inspection",
            OperationType::Refueling => "refueling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }
}

/// Operation-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDetails {
    pub berth_number: String,
    pub previous_status: VesselStatus,
}

/// One entry in the operations log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub operation_type: OperationType,
    pub ship_id: String,
    pub timestamp: DateTime<Utc>,
    pub details: OperationDetails,
    pub outcome: Outcome,
}

/// Bounded view over the most recent records.
#[derive(Debug, Clone)]
pub struct RecentOperations {
    /// Oldest first.
    pub operations: Vec<OperationRecord>,
    /// Records ever appended, including those outside the window.
    pub total_recorded: usize,
}

/// Append-only operation history.
///
/// Identifiers are `OP<unix millis>`; when two records land in the same
/// millisecond the later one takes the next free millisecond, so ids stay
/// unique and increase with insertion order.
#[derive(Debug, Default)]
pub struct OperationLog {
    records: Vec<OperationRecord>,
    last_id_millis: i64,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record stamped with `now` and return a copy of it.
    pub fn append(
        &mut self,
        operation_type: OperationType,
        ship_id: &str,
        details: OperationDetails,
        outcome: Outcome,
        now: DateTime<Utc>,
    ) -> OperationRecord {
        let millis = now.timestamp_millis().max(self.last_id_millis + 1);
        self.last_id_millis = millis;

        let record = OperationRecord {
            id: format!("OP{millis}"),
            operation_type,
            ship_id: ship_id.to_string(),
            timestamp: now,
            details,
            outcome,
        };
        self.records.push(record.clone());
        record
    }

    /// The last [`RECENT_OPERATIONS_LIMIT`] records in insertion order.
    pub fn recent(&self) -> RecentOperations {
        let start = self.records.len().saturating_sub(RECENT_OPERATIONS_LIMIT);
        RecentOperations {
            operations: self.records[start..].to_vec(),
            total_recorded: self.records.len(),
        }
    }
}
