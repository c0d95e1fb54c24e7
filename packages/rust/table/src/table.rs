//! In-memory model of the tab-delimited inventory table.
//!
//! A table is an ordered list of rows; row 0 is the header. Fields are split
//! on tabs with no quoting or escaping. Data rows are allowed to be shorter
//! or longer than the header, so every splice pads the row first.

use std::path::Path;

use tracing::debug;

use invtag_shared::{InvtagError, Result};

/// Field delimiter used by the inventory table and every reference export.
pub const DELIMITER: &str = "\t";

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A loaded tab-delimited table. Row 0 is the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from raw rows; row 0 is taken as the header.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Load a table from disk.
    ///
    /// Fails with [`InvtagError::NotFound`] if the path does not exist. A
    /// zero-byte file loads as a zero-row table (see [`Table::is_empty`]);
    /// a blank line in the middle of the file loads as a zero-field row.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(InvtagError::not_found(path));
        }

        let content = std::fs::read_to_string(path).map_err(|e| InvtagError::io(path, e))?;
        let rows: Vec<Vec<String>> = content.lines().map(parse_line).collect();

        debug!(path = %path.display(), rows = rows.len(), "table loaded");
        Ok(Self { rows })
    }

    /// Whether the table has no rows at all, header included.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, header included.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The header row, if the table has one.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// The data rows (everything after the header).
    pub fn data_rows(&self) -> &[Vec<String>] {
        if self.rows.is_empty() { &[] } else { &self.rows[1..] }
    }

    /// Mutable view of the data rows.
    pub fn data_rows_mut(&mut self) -> &mut [Vec<String>] {
        if self.rows.is_empty() {
            &mut []
        } else {
            &mut self.rows[1..]
        }
    }

    /// Index of `name` in the header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header()?.iter().position(|h| h == name)
    }

    /// Place the column `name` at `index`, preserving per-row values.
    ///
    /// - Absent: a header entry and an empty field in every data row are
    ///   inserted at `index`, shifting later entries rightward.
    /// - Already at `index`: no structural change.
    /// - Present elsewhere: each row's value is spliced out of its current
    ///   position and reinserted at `index`.
    ///
    /// Rows shorter than a splice point are padded with empty fields before
    /// the splice. An `index` past the end of the header appends instead.
    /// Returns the index the column actually ended up at.
    pub fn ensure_column_at(&mut self, name: &str, index: usize) -> usize {
        match self.column_index(name) {
            Some(current) if current == index => index,
            Some(current) => {
                let header = &mut self.rows[0];
                header.remove(current);
                let at = index.min(header.len());
                header.insert(at, name.to_string());

                for row in &mut self.rows[1..] {
                    let value = if row.len() > current {
                        row.remove(current)
                    } else {
                        String::new()
                    };
                    pad_row(row, at);
                    row.insert(at, value);
                }

                debug!(column = name, from = current, to = at, "column relocated");
                at
            }
            None => {
                if self.rows.is_empty() {
                    self.rows.push(vec![name.to_string()]);
                    return 0;
                }

                let header = &mut self.rows[0];
                let at = index.min(header.len());
                header.insert(at, name.to_string());

                for row in &mut self.rows[1..] {
                    pad_row(row, at);
                    row.insert(at, String::new());
                }

                debug!(column = name, at, "column inserted");
                at
            }
        }
    }

    /// Write the table back to `path`.
    ///
    /// Rows are joined with tabs and terminated with `\n`. The content is
    /// written to a hidden temp file in the same directory and renamed over
    /// the target, so an interrupted write never truncates the table.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&row.join(DELIMITER));
            out.push('\n');
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("table");
        let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

        std::fs::write(&temp_path, out).map_err(|e| InvtagError::io(&temp_path, e))?;
        std::fs::rename(&temp_path, path).map_err(|e| InvtagError::io(path, e))?;

        debug!(path = %path.display(), rows = self.rows.len(), "table written");
        Ok(())
    }
}

/// Extend `row` with empty fields until it has at least `len` fields.
pub fn pad_row(row: &mut Vec<String>, len: usize) {
    if row.len() < len {
        row.resize(len, String::new());
    }
}

/// A blank line carries zero fields; splitting it would yield one.
fn parse_line(line: &str) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }
    line.split(DELIMITER).map(str::to_string).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
