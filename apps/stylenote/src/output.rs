//! Output rendering for lint reports and the rule listing.
//!
//! Supports `text` (default) and `json` outputs. The JSON form includes
//! per-document findings and a top-level summary.

use crate::models::{Finding, Report};
use crate::rules::{Rule, RuleSet};
use owo_colors::OwoColorize;
use serde::Deserialize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::io::{self, IsTerminal, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
/// Report rendering mode.
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn use_colors(format: OutputFormat) -> bool {
    format == OutputFormat::Text
        && std::env::var_os("NO_COLOR").is_none()
        && io::stdout().is_terminal()
}

/// Print a report to stdout in the requested format.
pub fn print_report(report: &Report, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, report, format, use_colors(format))?;
    out.flush()
}

/// Render a report into `out`. Documents keep report order; documents
/// without findings are omitted from the text listing.
pub fn write_report(
    out: &mut dyn Write,
    report: &Report,
    format: OutputFormat,
    color: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let s = serde_json::to_string_pretty(&compose_report_json(report))
                .map_err(io::Error::other)?;
            writeln!(out, "{}", s)
        }
        OutputFormat::Text => {
            for doc in &report.documents {
                for f in &doc.findings {
                    writeln!(out, "{}", render_finding(f, color))?;
                }
            }
            let headline = format!(
                "— Summary — findings={} documents={}",
                report.summary.total, report.summary.documents
            );
            if color {
                writeln!(out, "{}", headline.bold())?;
            } else {
                writeln!(out, "{}", headline)?;
            }
            let width = report
                .summary
                .rules
                .iter()
                .map(|r| r.rule.len())
                .max()
                .unwrap_or(0);
            for rc in &report.summary.rules {
                let line = format!("  {:<width$}  {}", rc.rule, rc.count, width = width);
                if color && rc.count == 0 {
                    writeln!(out, "{}", line.bright_black())?;
                } else {
                    writeln!(out, "{}", line)?;
                }
            }
            Ok(())
        }
    }
}

/// One text line: `✖ path:line ❲rule❳ — message`.
pub fn render_finding(f: &Finding, color: bool) -> String {
    let location = match f.line {
        Some(l) => format!("{}:{}", f.document, l),
        None => f.document.clone(),
    };
    if color {
        format!(
            "{} {} ❲{}❳ — {}",
            "✖".red(),
            location.bold(),
            f.rule.yellow(),
            f.message
        )
    } else {
        format!("✖ {} ❲{}❳ — {}", location, f.rule, f.message)
    }
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &Report) -> JsonVal {
    let documents: Vec<_> = report
        .documents
        .iter()
        .map(|d| {
            let findings: Vec<_> = d
                .findings
                .iter()
                .map(|f| {
                    json!({
                        "rule": f.rule,
                        "line": f.line,
                        "message": f.message,
                    })
                })
                .collect();
            json!({"document": d.document, "findings": findings})
        })
        .collect();
    json!({
        "documents": documents,
        "summary": report.summary,
    })
}

/// Print rule names and descriptions in registration order.
pub fn print_rules(rules: &RuleSet, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_rules(&mut out, rules, format, use_colors(format))?;
    out.flush()
}

pub fn write_rules(
    out: &mut dyn Write,
    rules: &RuleSet,
    format: OutputFormat,
    color: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let items: Vec<_> = rules
                .iter()
                .map(|r| json!({"name": r.name(), "description": r.description()}))
                .collect();
            let s = serde_json::to_string_pretty(&items).map_err(io::Error::other)?;
            writeln!(out, "{}", s)
        }
        OutputFormat::Text => {
            let width = rules.iter().map(|r| r.name().len()).max().unwrap_or(0);
            for r in rules.iter() {
                let name = format!("{:<width$}", r.name(), width = width);
                if color {
                    writeln!(out, "{}  {}", name.bold(), r.description())?;
                } else {
                    writeln!(out, "{}  {}", name, r.description())?;
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentReport, IO_RULE};
    use crate::rules::RuleOptions;

    fn sample() -> Report {
        let docs = vec![
            DocumentReport {
                document: "ch1.md".into(),
                findings: vec![Finding {
                    rule: "ambiguous-boolean".into(),
                    document: "ch1.md".into(),
                    line: Some(4),
                    message: "boolean 'read_password' is ambiguous".into(),
                }],
            },
            DocumentReport {
                document: "ch2.md".into(),
                findings: Vec::new(),
            },
            DocumentReport {
                document: "img.bin".into(),
                findings: vec![Finding {
                    rule: IO_RULE.into(),
                    document: "img.bin".into(),
                    line: None,
                    message: "cannot read file".into(),
                }],
            },
        ];
        Report::new(docs, &["ambiguous-boolean", "long-line"])
    }

    fn render(report: &Report, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, report, format, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_lists_findings_then_summary() {
        let text = render(&sample(), OutputFormat::Text);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "✖ ch1.md:4 ❲ambiguous-boolean❳ — boolean 'read_password' is ambiguous");
        assert_eq!(lines[1], "✖ img.bin ❲io❳ — cannot read file");
        assert_eq!(lines[2], "— Summary — findings=2 documents=3");
        assert!(lines[3].trim_start().starts_with("ambiguous-boolean"));
        assert!(lines[3].trim_end().ends_with('1'));
        assert!(lines[4].trim_end().ends_with('0'));
        assert!(lines[5].trim_start().starts_with("io"));
        assert_eq!(lines.len(), 6);
        assert!(!text.contains("ch2.md"));
    }

    #[test]
    fn test_compose_report_json_shape() {
        let out = compose_report_json(&sample());
        assert_eq!(out["documents"][0]["document"], "ch1.md");
        assert_eq!(out["documents"][0]["findings"][0]["line"], 4);
        assert!(out["documents"][2]["findings"][0]["line"].is_null());
        assert_eq!(out["summary"]["total"], 2);
        assert_eq!(out["summary"]["documents"], 3);
        assert_eq!(out["summary"]["rules"][1]["rule"], "long-line");
        assert_eq!(out["summary"]["rules"][1]["count"], 0);
    }

    #[test]
    fn test_json_output_parses() {
        let text = render(&sample(), OutputFormat::Json);
        let v: JsonVal = serde_json::from_str(&text).unwrap();
        assert_eq!(v["documents"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_write_rules_text() {
        let rules = RuleSet::build(&RuleOptions::default(), &[]).unwrap();
        let mut buf = Vec::new();
        write_rules(&mut buf, &rules, OutputFormat::Text, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), rules.len());
        assert!(text.starts_with("ambiguous-boolean"));
    }
}
