//! Core tagging logic and pipeline orchestration for invtag.
//!
//! This crate ties the table primitives together into the per-stage tagging
//! operation and the fixed ten-stage pipeline that annotates the master
//! inventory table.

pub mod pipeline;
pub mod stages;
pub mod tagger;
