//! Built-in readability rules.
//!
//! All rules are line based: they look at one line at a time and report the
//! 1-based line number. Registration order follows `NAMES`.

use super::{identifier_words, Rule, RuleOptions};
use crate::error::{Error, Result, RuleError};
use crate::models::{Document, Violation};
use regex::Regex;
use std::collections::BTreeSet;

/// Built-in rule names in registration order.
pub const NAMES: [&str; 7] = [
    "ambiguous-boolean",
    "negated-boolean",
    "ternary-overuse",
    "generic-name",
    "yoda-condition",
    "do-while",
    "long-line",
];

/// Instantiate every built-in rule with `opts`.
pub fn all(opts: &RuleOptions) -> Result<Vec<Box<dyn Rule>>> {
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(AmbiguousBoolean::new(opts)?),
        Box::new(NegatedBoolean::new(opts)?),
        Box::new(TernaryOveruse::new(opts)?),
        Box::new(GenericName::new(opts)?),
        Box::new(YodaCondition::new()?),
        Box::new(DoWhile::new()?),
        Box::new(LongLine::new(opts)),
    ];
    Ok(rules)
}

fn compile(re: &str) -> Result<Regex> {
    Regex::new(re).map_err(|e| Error::Pattern {
        pattern: re.to_string(),
        message: e.to_string(),
    })
}

/// Finds names introduced as booleans across common snippet languages.
struct BoolDecls {
    patterns: Vec<Regex>,
}

impl BoolDecls {
    fn new() -> Result<Self> {
        let patterns = [
            // bool read_password = true;  / boolean done;
            r"\b(?:bool|boolean|Boolean|BOOL)\s+([A-Za-z_][A-Za-z0-9_]*)\s*[=;,)]",
            // read_password: bool
            r"\b([A-Za-z_][A-Za-z0-9_]*)\s*:\s*(?:bool|boolean)\b",
            // let read_password = true / var x = false
            r"\b(?:let(?:\s+mut)?|var|const)\s+([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(?:true|false)\b",
            // read_password = True
            r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(?:True|False)\b",
        ]
        .iter()
        .map(|p| compile(p))
        .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Distinct declared names on `line`, in first-seen order.
    fn names<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let mut out: Vec<&str> = Vec::new();
        for re in &self.patterns {
            for cap in re.captures_iter(line) {
                if let Some(m) = cap.get(1) {
                    if !out.contains(&m.as_str()) {
                        out.push(m.as_str());
                    }
                }
            }
        }
        out
    }
}

fn lowered(words: &[String]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

/// Flags boolean names such as `read_password` that do not read as a yes/no
/// question.
pub struct AmbiguousBoolean {
    decls: BoolDecls,
    words: BTreeSet<String>,
    prefixes: BTreeSet<String>,
}

impl AmbiguousBoolean {
    pub fn new(opts: &RuleOptions) -> Result<Self> {
        Ok(Self {
            decls: BoolDecls::new()?,
            words: lowered(&opts.ambiguous_words),
            prefixes: lowered(&opts.boolean_prefixes),
        })
    }
}

impl Rule for AmbiguousBoolean {
    fn name(&self) -> &str {
        "ambiguous-boolean"
    }

    fn description(&self) -> &str {
        "Boolean names should read as a question (is/has/can/should), not as an action"
    }

    fn check(&self, doc: &Document) -> std::result::Result<Vec<Violation>, RuleError> {
        let mut out = Vec::new();
        for (i, line) in doc.text.lines().enumerate() {
            for name in self.decls.names(line) {
                let words = identifier_words(name);
                let Some(first) = words.first() else { continue };
                if self.prefixes.contains(first) {
                    continue;
                }
                if let Some(verb) = words.iter().find(|w| self.words.contains(*w)) {
                    out.push(Violation::new(
                        i + 1,
                        format!(
                            "boolean '{}' is ambiguous ('{}' reads as an action); prefer a name like 'is_…' or 'has_…'",
                            name, verb
                        ),
                    ));
                }
            }
        }
        Ok(out)
    }
}

/// Flags boolean names carrying a negation, e.g. `disable_ssl`.
pub struct NegatedBoolean {
    decls: BoolDecls,
    words: BTreeSet<String>,
}

impl NegatedBoolean {
    pub fn new(opts: &RuleOptions) -> Result<Self> {
        Ok(Self {
            decls: BoolDecls::new()?,
            words: lowered(&opts.negation_words),
        })
    }
}

impl Rule for NegatedBoolean {
    fn name(&self) -> &str {
        "negated-boolean"
    }

    fn description(&self) -> &str {
        "Boolean names should be positive (use_ssl rather than disable_ssl)"
    }

    fn check(&self, doc: &Document) -> std::result::Result<Vec<Violation>, RuleError> {
        let mut out = Vec::new();
        for (i, line) in doc.text.lines().enumerate() {
            for name in self.decls.names(line) {
                if let Some(neg) = identifier_words(name)
                    .into_iter()
                    .find(|w| self.words.contains(w))
                {
                    out.push(Violation::new(
                        i + 1,
                        format!("boolean '{}' is negated ('{}'); prefer the positive form", name, neg),
                    ));
                }
            }
        }
        Ok(out)
    }
}

/// Flags lines chaining more ternary operators than allowed.
pub struct TernaryOveruse {
    ternary: Regex,
    code_line: Regex,
    max: usize,
}

impl TernaryOveruse {
    pub fn new(opts: &RuleOptions) -> Result<Self> {
        Ok(Self {
            // `?` followed by a branch and `:`; skips `?.`, `??` and Rust's `?;`
            ternary: compile(r"\?[^?:;.][^?:;]*:")?,
            // assignment, statement end, block brace or `return`; prose has none
            code_line: compile(r"^\s*return\b|[=;{}]")?,
            max: opts.max_ternaries_per_line,
        })
    }
}

impl Rule for TernaryOveruse {
    fn name(&self) -> &str {
        "ternary-overuse"
    }

    fn description(&self) -> &str {
        "Chained ternaries are hard to follow; use if/else instead"
    }

    fn check(&self, doc: &Document) -> std::result::Result<Vec<Violation>, RuleError> {
        let mut out = Vec::new();
        for (i, line) in doc.text.lines().enumerate() {
            if !self.code_line.is_match(line) {
                continue;
            }
            let count = self.ternary.find_iter(line).count();
            if count > self.max {
                out.push(Violation::new(
                    i + 1,
                    format!(
                        "{} ternary operators on one line (max {}); rewrite as if/else",
                        count, self.max
                    ),
                ));
            }
        }
        Ok(out)
    }
}

/// Flags declarations of generic names like `tmp` or `retval`.
pub struct GenericName {
    typed: Regex,
    bare: Regex,
}

impl GenericName {
    pub fn new(opts: &RuleOptions) -> Result<Self> {
        let alt = opts
            .generic_names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        // An empty alternation would match every declaration.
        let alt = if alt.is_empty() { "$^".to_string() } else { alt };
        Ok(Self {
            typed: compile(&format!(
                r"\b(?:let(?:\s+mut)?|var|const|auto|int|long|float|double|char|bool|string|String|str)\s+({})\b\s*[=;:,)]",
                alt
            ))?,
            bare: compile(&format!(r"^\s*({})\s*=[^=]", alt))?,
        })
    }
}

impl Rule for GenericName {
    fn name(&self) -> &str {
        "generic-name"
    }

    fn description(&self) -> &str {
        "Avoid empty names like tmp, retval or foo; say what the value is"
    }

    fn check(&self, doc: &Document) -> std::result::Result<Vec<Violation>, RuleError> {
        let mut out = Vec::new();
        for (i, line) in doc.text.lines().enumerate() {
            let hit = self
                .typed
                .captures(line)
                .or_else(|| self.bare.captures(line))
                .and_then(|c| c.get(1));
            if let Some(m) = hit {
                out.push(Violation::new(
                    i + 1,
                    format!("generic name '{}'; choose a name that describes the value", m.as_str()),
                ));
            }
        }
        Ok(out)
    }
}

/// Flags comparisons with the constant on the left, `if (10 <= length)`.
pub struct YodaCondition {
    re: Regex,
}

impl YodaCondition {
    pub fn new() -> Result<Self> {
        Ok(Self {
            re: compile(
                r#"\b(?:if|while)\s*\(?\s*(-?\d+(?:\.\d+)?|null|NULL|nullptr|nil|None|true|false|"[^"]*"|'[^']*')\s*(==|!=|<=|>=|<|>)\s*[A-Za-z_]"#,
            )?,
        })
    }
}

impl Rule for YodaCondition {
    fn name(&self) -> &str {
        "yoda-condition"
    }

    fn description(&self) -> &str {
        "Put the changing value on the left of a comparison and the constant on the right"
    }

    fn check(&self, doc: &Document) -> std::result::Result<Vec<Violation>, RuleError> {
        let mut out = Vec::new();
        for (i, line) in doc.text.lines().enumerate() {
            if let Some(c) = self.re.captures(line) {
                let lit = c.get(1).map_or("", |m| m.as_str());
                out.push(Violation::new(
                    i + 1,
                    format!("constant {} is on the left of the comparison", lit),
                ));
            }
        }
        Ok(out)
    }
}

/// Flags `do { ... } while` loops.
pub struct DoWhile {
    re: Regex,
}

impl DoWhile {
    pub fn new() -> Result<Self> {
        Ok(Self {
            re: compile(r"\bdo\s*\{")?,
        })
    }
}

impl Rule for DoWhile {
    fn name(&self) -> &str {
        "do-while"
    }

    fn description(&self) -> &str {
        "do/while hides the loop condition at the bottom; prefer a while loop"
    }

    fn check(&self, doc: &Document) -> std::result::Result<Vec<Violation>, RuleError> {
        Ok(doc
            .text
            .lines()
            .enumerate()
            .filter(|(_, line)| self.re.is_match(line))
            .map(|(i, _)| Violation::new(i + 1, "do/while loop; rewrite as a while loop"))
            .collect())
    }
}

/// Flags lines longer than the configured width.
pub struct LongLine {
    max: usize,
}

impl LongLine {
    pub fn new(opts: &RuleOptions) -> Self {
        Self {
            max: opts.max_line_length,
        }
    }
}

impl Rule for LongLine {
    fn name(&self) -> &str {
        "long-line"
    }

    fn description(&self) -> &str {
        "Long lines are hard to scan; wrap them"
    }

    fn check(&self, doc: &Document) -> std::result::Result<Vec<Violation>, RuleError> {
        let mut out = Vec::new();
        for (i, line) in doc.text.lines().enumerate() {
            let width = line.chars().count();
            if width > self.max {
                out.push(Violation::new(
                    i + 1,
                    format!("line is {} characters (max {})", width, self.max),
                ));
            }
        }
        Ok(out)
    }
}
