//! Human-readable review reports for multi-chain governance proposals
//!
//! Operations are decoded per chain family, their arguments classified into
//! [`domain::Descriptor`]s, and the resulting reports rendered as plain text
//! or Markdown.

pub mod analyzer;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod render;
pub mod report;
