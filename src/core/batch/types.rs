//! Batch processing types and data structures

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Placeholder used when a loaded row carries no item id
pub const MISSING_ITEM_ID: &str = "Missing ID";

/// A single record loaded from the warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Item identifier (absent ids are reported as `Missing ID` and never submitted)
    #[serde(default, deserialize_with = "deserialize_item_id")]
    pub item_id: Option<String>,
    /// Remaining columns of the row
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Warehouse ids arrive as strings or integers
fn deserialize_item_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(id)) => Ok(Some(id)),
        Some(serde_json::Value::Number(id)) => Ok(Some(id.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "item_id must be a string or number, got {}",
            other
        ))),
    }
}

impl Row {
    /// Create a row with the given id and payload
    pub fn new(
        item_id: impl Into<String>,
        fields: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            item_id: Some(item_id.into()),
            fields,
        }
    }

    /// Item id used when attributing outcomes to this row
    pub fn id(&self) -> &str {
        self.item_id.as_deref().unwrap_or(MISSING_ITEM_ID)
    }

    /// Whether the row carries any payload besides its id
    pub fn has_payload(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// An item that did not succeed remote processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Item identifier
    pub item_id: String,
    /// Reason reported for the failure
    pub error_message: String,
}

impl Failure {
    pub fn new(item_id: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            error_message: error_message.into(),
        }
    }
}

/// Outcome of one batch execution
///
/// Every input row maps to exactly one of the three lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Items accepted by the remote API
    pub successful_item_ids: Vec<String>,
    /// Items rejected by the remote API
    pub failures: Vec<Failure>,
    /// Items never submitted
    pub skipped_item_ids: Vec<String>,
}

impl ProcessResult {
    pub fn new(
        successful_item_ids: Vec<String>,
        failures: Vec<Failure>,
        skipped_item_ids: Vec<String>,
    ) -> Self {
        Self {
            successful_item_ids,
            failures,
            skipped_item_ids,
        }
    }

    /// Mark every row as failed with the same reason
    ///
    /// A repeated item id is reported once, at its first occurrence. Rows
    /// without an id each get their own `Missing ID` failure.
    pub fn all_failed(rows: &[Row], reason: &str) -> Self {
        let mut seen = HashSet::with_capacity(rows.len());
        let failures = rows
            .iter()
            .filter(|&row| row.item_id.as_deref().is_none_or(|id| seen.insert(id)))
            .map(|row| Failure::new(row.id(), reason))
            .collect();
        Self::new(Vec::new(), failures, Vec::new())
    }

    /// Total number of items accounted for
    pub fn total(&self) -> usize {
        self.successful_item_ids.len() + self.failures.len() + self.skipped_item_ids.len()
    }
}

/// Semantic action applied to every row of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Upsert,
    Delete,
}

impl Operation {
    /// Value used in log lines and as the persistence key
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Upsert => "upsert",
            Operation::Delete => "delete",
        }
    }

    /// Remote API verb for this operation
    pub fn method(&self) -> Method {
        match self {
            Operation::Upsert => Method::Insert,
            Operation::Delete => Method::Delete,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote API verb for a batch entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Insert,
    Delete,
}

/// Route-level intent of an upload request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Insert = 0,
    Delete = 1,
    PreventExpiring = 2,
}

/// What a given intent does to its batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub operation: Operation,
    pub optimize: bool,
    /// Warehouse source the rows are loaded from
    pub source: &'static str,
}

/// Intent lookup table, indexed by the intent discriminant
const INTENT_PLANS: [(Intent, BatchPlan); 3] = [
    (
        Intent::Insert,
        BatchPlan {
            operation: Operation::Upsert,
            optimize: true,
            source: "items_to_upsert",
        },
    ),
    (
        Intent::Delete,
        BatchPlan {
            operation: Operation::Delete,
            optimize: false,
            source: "items_to_delete",
        },
    ),
    (
        Intent::PreventExpiring,
        BatchPlan {
            operation: Operation::Upsert,
            optimize: true,
            source: "items_to_prevent_expiring",
        },
    ),
];

impl Intent {
    /// Look up the plan for this intent
    pub fn plan(&self) -> BatchPlan {
        INTENT_PLANS[*self as usize].1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Insert => "insert",
            Intent::Delete => "delete",
            Intent::PreventExpiring => "prevent_expiring",
        }
    }
}

/// Request body posted by the task scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTask {
    pub start_index: u64,
    pub batch_size: u64,
    /// Initiation timestamp of the whole upload run
    pub timestamp: String,
}

impl UploadTask {
    /// One-based batch number, `None` for an empty batch
    pub fn batch_number(&self) -> Option<u64> {
        batch_number(self.start_index, self.batch_size)
    }
}

/// Compute `floor(start_index / batch_size) + 1`
pub fn batch_number(start_index: u64, batch_size: u64) -> Option<u64> {
    start_index.checked_div(batch_size).map(|n| n + 1)
}

/// Labels carried alongside a batch for logs and records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchContext {
    pub batch_number: u64,
    pub operation: Operation,
    pub timestamp: String,
}

/// One entry of a remote batch request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Position-derived id, unique within the batch
    pub batch_id: u32,
    pub method: Method,
    pub item_id: String,
    /// Item payload (absent for deletes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<serde_json::Map<String, serde_json::Value>>,
}
