//! Regex rules declared in the config file under `[[pattern]]`.

use super::Rule;
use crate::error::{Error, Result, RuleError};
use crate::models::pattern::PatternSpec;
use crate::models::{Document, Violation};
use regex::Regex;

pub struct PatternRule {
    name: String,
    description: String,
    message: String,
    re: Regex,
}

impl PatternRule {
    pub fn new(spec: &PatternSpec) -> Result<Self> {
        let name = spec.name.trim();
        if name.is_empty() || name.contains(',') || name.contains(char::is_whitespace) {
            return Err(Error::Pattern {
                pattern: spec.name.clone(),
                message: "rule name must be non-empty without commas or spaces".into(),
            });
        }
        let re = Regex::new(&spec.regex).map_err(|e| Error::Pattern {
            pattern: spec.regex.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            name: name.to_string(),
            description: spec
                .description
                .clone()
                .unwrap_or_else(|| format!("Lines matching /{}/", spec.regex)),
            message: spec
                .message
                .clone()
                .unwrap_or_else(|| format!("line matches /{}/", spec.regex)),
            re,
        })
    }
}

impl Rule for PatternRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn check(&self, doc: &Document) -> std::result::Result<Vec<Violation>, RuleError> {
        Ok(doc
            .text
            .lines()
            .enumerate()
            .filter(|(_, line)| self.re.is_match(line))
            .map(|(i, _)| Violation::new(i + 1, self.message.clone()))
            .collect())
    }
}
