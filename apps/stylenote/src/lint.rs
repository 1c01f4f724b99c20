//! Lint runner: applies the rule set to every loaded document.
//!
//! Documents are checked in parallel with rayon; results are collected in
//! input order so the report never depends on scheduling. Within a document,
//! findings follow rule-registration order, then ascending line.

use crate::error::{Error, LoadError, Result};
use crate::loader::Loader;
use crate::models::{Document, DocumentReport, Finding, Report, IO_RULE};
use crate::rules::{Rule, RuleSet};
use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Applies an immutable rule set to documents.
pub struct Engine {
    rules: RuleSet,
}

impl Engine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Findings for one document.
    ///
    /// Each rule runs in isolation: an error or panic inside a rule becomes a
    /// single file-level finding for that rule and the remaining rules still
    /// run.
    pub fn check(&self, doc: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in self.rules.iter() {
            findings.extend(apply_rule(rule, doc));
        }
        debug!(document = %doc.id, findings = findings.len(), "checked document");
        findings
    }

    /// Report for one loaded entry; load failures map to an `io` finding.
    pub fn report_entry(&self, entry: &std::result::Result<Document, LoadError>) -> DocumentReport {
        match entry {
            Ok(doc) => DocumentReport {
                document: doc.id.clone(),
                findings: self.check(doc),
            },
            Err(e) => DocumentReport {
                document: e.id.clone(),
                findings: vec![Finding {
                    rule: IO_RULE.to_string(),
                    document: e.id.clone(),
                    line: None,
                    message: format!("cannot read file: {}", e.source),
                }],
            },
        }
    }

    /// Check all entries concurrently and build the ordered report.
    pub fn run<I>(&self, entries: I) -> Report
    where
        I: IntoIterator<Item = std::result::Result<Document, LoadError>>,
    {
        let entries: Vec<_> = entries.into_iter().collect();
        let documents: Vec<DocumentReport> =
            entries.par_iter().map(|e| self.report_entry(e)).collect();
        Report::new(documents, &self.rules.names())
    }
}

fn apply_rule(rule: &dyn Rule, doc: &Document) -> Vec<Finding> {
    let outcome = catch_unwind(AssertUnwindSafe(|| rule.check(doc)));
    let failure = match outcome {
        Ok(Ok(mut violations)) => {
            violations.sort_by_key(|v| v.line);
            return violations
                .into_iter()
                .map(|v| Finding {
                    rule: rule.name().to_string(),
                    document: doc.id.clone(),
                    line: Some(v.line),
                    message: v.message,
                })
                .collect();
        }
        Ok(Err(e)) => e.to_string(),
        Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
    };
    warn!(rule = rule.name(), document = %doc.id, error = %failure, "rule failed");
    vec![Finding {
        rule: rule.name().to_string(),
        document: doc.id.clone(),
        line: None,
        message: format!("internal error: {}", failure),
    }]
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Load documents under `root` and lint them with `rules`.
///
/// Files in `exclude` (the active config) are not linted. `jobs` bounds the
/// worker pool; `None` uses the global rayon pool. A missing root or bad
/// include glob is fatal; unreadable files are not.
pub fn run_lint(
    root: &Path,
    include: &[String],
    exclude: &[PathBuf],
    rules: RuleSet,
    jobs: Option<usize>,
) -> Result<Report> {
    let docs = Loader::open_excluding(root, include, exclude)?;
    info!(root = %root.display(), documents = docs.len(), rules = rules.len(), "linting");
    let engine = Engine::new(rules);
    let report = match jobs {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| Error::Pool(e.to_string()))?;
            pool.install(|| engine.run(docs))
        }
        None => engine.run(docs),
    };
    info!(total = report.summary.total, "lint finished");
    Ok(report)
}
