//! Shared data models for documents, findings, and reports.

pub mod pattern;

use serde::Serialize;

/// Rule name used for findings produced by files that failed to load.
pub const IO_RULE: &str = "io";

#[derive(Debug, Clone, PartialEq, Eq)]
/// One loaded chapter file. Immutable once loaded.
pub struct Document {
    /// Path relative to the lint root, `/`-separated.
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a rule reports: a 1-based line and a message.
pub struct Violation {
    pub line: usize,
    pub message: String,
}

impl Violation {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single reported issue tagged with the rule that produced it.
pub struct Finding {
    pub rule: String,
    pub document: String,
    /// 1-based line; `None` for file-level findings.
    pub line: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Findings of one document, already in report order.
pub struct DocumentReport {
    pub document: String,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCount {
    pub rule: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Aggregated counts used by printers.
pub struct Summary {
    pub rules: Vec<RuleCount>,
    pub total: usize,
    pub documents: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Full ordered result of one run.
pub struct Report {
    pub documents: Vec<DocumentReport>,
    pub summary: Summary,
}

impl Report {
    /// Build a report, counting findings per rule.
    ///
    /// `rule_names` fixes the summary order; names of rules that fired but are
    /// not listed (`io`) are appended in first-seen order.
    pub fn new(documents: Vec<DocumentReport>, rule_names: &[&str]) -> Self {
        let mut rules: Vec<RuleCount> = rule_names
            .iter()
            .map(|name| RuleCount {
                rule: (*name).to_string(),
                count: 0,
            })
            .collect();
        let mut total = 0usize;
        for f in documents.iter().flat_map(|d| d.findings.iter()) {
            total += 1;
            match rules.iter_mut().find(|rc| rc.rule == f.rule) {
                Some(rc) => rc.count += 1,
                None => rules.push(RuleCount {
                    rule: f.rule.clone(),
                    count: 1,
                }),
            }
        }
        let summary = Summary {
            rules,
            total,
            documents: documents.len(),
        };
        Report { documents, summary }
    }

    pub fn is_clean(&self) -> bool {
        self.summary.total == 0
    }

    /// Process exit status: 0 when no findings were produced, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(rule: &str, doc: &str, line: usize) -> Finding {
        Finding {
            rule: rule.into(),
            document: doc.into(),
            line: Some(line),
            message: "m".into(),
        }
    }

    #[test]
    fn test_summary_keeps_registration_order_and_appends_io() {
        let docs = vec![
            DocumentReport {
                document: "a.md".into(),
                findings: vec![finding("long-line", "a.md", 3), finding("do-while", "a.md", 1)],
            },
            DocumentReport {
                document: "b.md".into(),
                findings: vec![Finding {
                    rule: IO_RULE.into(),
                    document: "b.md".into(),
                    line: None,
                    message: "unreadable".into(),
                }],
            },
        ];
        let report = Report::new(docs, &["do-while", "generic-name", "long-line"]);
        let names: Vec<_> = report.summary.rules.iter().map(|r| r.rule.as_str()).collect();
        assert_eq!(names, ["do-while", "generic-name", "long-line", "io"]);
        let counts: Vec<_> = report.summary.rules.iter().map(|r| r.count).collect();
        assert_eq!(counts, [1, 0, 1, 1]);
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.documents, 2);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_empty_report_exits_zero() {
        let report = Report::new(Vec::new(), &["long-line"]);
        assert!(report.is_clean());
        assert_eq!(report.exit_code(), 0);
    }
}
