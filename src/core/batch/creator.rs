//! Conversion of loaded rows into remote batch entries

use super::types::{BatchEntry, MISSING_ITEM_ID, Method, Row};
use std::collections::HashSet;
use tracing::warn;

/// Entries ready for submission plus the ids that were left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatedBatch {
    pub entries: Vec<BatchEntry>,
    pub skipped_item_ids: Vec<String>,
}

/// Build the remote batch for a row window
///
/// Entry ids are the row positions. Rows without an id, inserts without
/// payload and repeated item ids are skipped; the first occurrence of an id
/// is the one submitted. Each row without an id is reported as one
/// [`MISSING_ITEM_ID`] skip.
pub fn create_batch(batch_number: u64, rows: &[Row], method: Method) -> CreatedBatch {
    let mut batch = CreatedBatch::default();
    let mut seen: HashSet<&str> = HashSet::with_capacity(rows.len());

    for (position, row) in rows.iter().enumerate() {
        let Some(item_id) = row.item_id.as_deref() else {
            warn!(
                "Batch #{}: row at position {} has no item id and was skipped",
                batch_number, position
            );
            batch.skipped_item_ids.push(MISSING_ITEM_ID.to_string());
            continue;
        };

        if !seen.insert(item_id) {
            warn!(
                "Batch #{}: duplicate item {} skipped at position {}",
                batch_number, item_id, position
            );
            continue;
        }

        let product = match method {
            Method::Insert if !row.has_payload() => {
                warn!(
                    "Batch #{}: item {} has no payload and was skipped",
                    batch_number, item_id
                );
                batch.skipped_item_ids.push(item_id.to_string());
                continue;
            }
            Method::Insert => Some(row.fields.clone()),
            Method::Delete => None,
        };

        batch.entries.push(BatchEntry {
            batch_id: position as u32,
            method,
            item_id: item_id.to_string(),
            product,
        });
    }

    batch
}
