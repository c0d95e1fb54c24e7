//! The tagging operation: one load-mutate-persist cycle applying one status
//! column to the inventory table.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use invtag_shared::{InvtagError, Result};
use invtag_table::{Table, load_reference_set, pad_row};

use crate::stages::StageSpec;

/// Outcome of one tagging operation.
#[derive(Debug, Clone)]
pub struct TagOutcome {
    /// Table file the operation ran against.
    pub table_path: PathBuf,
    /// Status column that was written.
    pub column: String,
    /// Number of keys in the reference set.
    pub reference_keys: usize,
    /// Data rows that received a label.
    pub rows_tagged: usize,
    /// Rows whose key was found in the reference set.
    pub matched: usize,
    /// Whether the table file was rewritten.
    pub updated: bool,
}

/// Apply one stage's status column to the table.
///
/// Loads the reference set and the table, places the status column directly
/// after the highest-priority anchor present in the header, labels every
/// data row by key membership, and writes the table back atomically. A
/// zero-row table is a warning no-op and the file is left untouched; a
/// missing anchor fails with [`InvtagError::InvalidSchema`] before anything
/// is written.
#[instrument(skip_all, fields(stage = stage.name, table = %table_path.display()))]
pub fn tag(stage: &StageSpec, table_path: &Path, reference_path: &Path) -> Result<TagOutcome> {
    let keys = load_reference_set(reference_path)?;
    let mut table = Table::load(table_path)?;

    if table.is_empty() {
        warn!(path = %table_path.display(), "table has no rows, nothing to tag");
        return Ok(TagOutcome {
            table_path: table_path.to_path_buf(),
            column: stage.column.to_string(),
            reference_keys: keys.len(),
            rows_tagged: 0,
            matched: 0,
            updated: false,
        });
    }

    let anchor_index = resolve_anchor(&table, stage.anchors)
        .ok_or_else(|| InvtagError::invalid_schema(table_path, stage.anchors))?;
    let status_index = table.ensure_column_at(stage.column, anchor_index + 1);

    let mut rows_tagged = 0;
    let mut matched = 0;
    for row in table.data_rows_mut() {
        // Rows that are still field-less stay blank lines on disk.
        if row.is_empty() {
            continue;
        }

        let key = row[0].trim();
        let label = if keys.contains(key) {
            matched += 1;
            stage.yes_label
        } else {
            stage.no_label
        };

        pad_row(row, status_index + 1);
        row[status_index] = label.to_string();
        rows_tagged += 1;
    }

    table.save(table_path)?;

    info!(
        column = stage.column,
        keys = keys.len(),
        rows = rows_tagged,
        matched,
        "status column tagged"
    );

    Ok(TagOutcome {
        table_path: table_path.to_path_buf(),
        column: stage.column.to_string(),
        reference_keys: keys.len(),
        rows_tagged,
        matched,
        updated: true,
    })
}

/// Index of the first anchor candidate present in the header.
fn resolve_anchor(table: &Table, candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|c| table.column_index(c))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
