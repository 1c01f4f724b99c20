//! stylenote core library.
//!
//! This crate exposes programmatic APIs for linting chapter notes and code
//! snippets against a fixed set of readability rules.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `loader`: Lazy, ordered loading of documents under a root.
//! - `rules`: Rule trait, built-in rules, and config-declared pattern rules.
//! - `lint`: Rule engine with per-rule fault isolation and parallel runs.
//! - `models`: Documents, findings, and report structs.
//! - `output`: Text/JSON printers.
//! - `error`: Fatal, per-file, and per-rule error types.
//! - `utils`: Terminal prefixes and logging setup.
pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod loader;
pub mod models;
pub mod output;
pub mod rules;
pub mod utils;
