//! Schema for config-declared pattern rules.
//!
//! Each `[[pattern]]` entry becomes one rule that flags every line matching
//! `regex`. Entries are registered after the built-in rules, in file order.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PatternSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub regex: String,
    #[serde(default)]
    pub message: Option<String>,
}
