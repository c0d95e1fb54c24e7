//! Tab-delimited table primitives.
//!
//! The inventory table and the reference exports share one plain format:
//! tab-separated fields, newline-terminated rows, first row is the header.
//! This crate owns loading, saving, and the column-splicing primitive the
//! tagger is built on; it knows nothing about statuses or anchors.

mod reference;
mod table;

pub use reference::load_reference_set;
pub use table::{DELIMITER, Table, pad_row};
