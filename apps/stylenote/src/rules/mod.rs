//! Rule trait, tunable options, and the registered rule set.
//!
//! Rules are built once at startup and shared immutably across workers, so
//! every rule must be `Send + Sync`. Registration order is significant: it
//! fixes the order of findings within a document and of the summary.

pub mod builtin;
pub mod pattern;

use crate::error::{Error, Result, RuleError};
use crate::models::pattern::PatternSpec;
use crate::models::{Document, Violation};
use serde::Deserialize;

/// A named check applied uniformly to every document.
pub trait Rule: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// Inspect `doc` and return violations. Must not depend on other rules.
    fn check(&self, doc: &Document) -> std::result::Result<Vec<Violation>, RuleError>;
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Knobs for the built-in rules, loaded from `[options]`.
pub struct RuleOptions {
    pub max_line_length: usize,
    pub max_ternaries_per_line: usize,
    pub ambiguous_words: Vec<String>,
    pub boolean_prefixes: Vec<String>,
    pub negation_words: Vec<String>,
    pub generic_names: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            max_line_length: 100,
            max_ternaries_per_line: 1,
            ambiguous_words: strings(&["read", "write", "use", "load", "check", "update"]),
            boolean_prefixes: strings(&["is", "has", "can", "should"]),
            negation_words: strings(&["not", "no", "disable", "disabled", "dont"]),
            generic_names: strings(&["tmp", "temp", "retval", "foo", "bar", "data", "val"]),
        }
    }
}

/// Ordered, immutable collection of rules.
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// Wrap already-built rules, rejecting duplicate names.
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Result<Self> {
        for (i, r) in rules.iter().enumerate() {
            if rules[..i].iter().any(|o| o.name() == r.name()) {
                return Err(Error::DuplicateRule(r.name().to_string()));
            }
        }
        Ok(Self { rules })
    }

    /// Built-in rules followed by config-declared pattern rules.
    pub fn build(opts: &RuleOptions, patterns: &[PatternSpec]) -> Result<Self> {
        let mut rules = builtin::all(opts)?;
        for spec in patterns {
            rules.push(Box::new(pattern::PatternRule::new(spec)?));
        }
        Self::new(rules)
    }

    /// Keep only the named rules, preserving registration order.
    ///
    /// An empty selection keeps every rule. Unknown names are an error.
    pub fn select(self, names: &[String]) -> Result<Self> {
        if names.is_empty() {
            return Ok(self);
        }
        for n in names {
            if !self.rules.iter().any(|r| r.name() == n) {
                return Err(Error::UnknownRule {
                    name: n.clone(),
                    known: self.names().join(", "),
                });
            }
        }
        let rules = self
            .rules
            .into_iter()
            .filter(|r| names.iter().any(|n| n == r.name()))
            .collect();
        Ok(Self { rules })
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Split an identifier into lowercase words on `_`, `-` and camelCase humps.
pub(crate) fn identifier_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut cur = String::new();
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            if !cur.is_empty() {
                words.push(std::mem::take(&mut cur));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !cur.is_empty() {
            words.push(std::mem::take(&mut cur));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        cur.extend(ch.to_lowercase());
    }
    if !cur.is_empty() {
        words.push(cur);
    }
    words
}
