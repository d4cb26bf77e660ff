// Pedantic lint configuration for the crate.
// Most of these are reasonable but too strict for this codebase:
// - cast_possible_truncation / cast_sign_loss / cast_possible_wrap: row counts and
//   ordinals round-trip through SQLite INTEGER
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are rare and documented inline
// - unused_async: Required by rmcp's #[tool] macro
// - needless_pass_by_value: Sometimes clearer semantically
// - module_name_repetitions: Result types are named after their operation
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unused_async,
    clippy::needless_pass_by_value,
    clippy::module_name_repetitions
)]

pub mod classify;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod mcp;
pub mod models;
pub mod operations;
pub mod parser;
pub mod source;
