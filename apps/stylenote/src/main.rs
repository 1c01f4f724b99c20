//! stylenote CLI binary entry point.
//! Resolves configuration, runs the lint pipeline and prints the report.

use clap::Parser;
use std::path::PathBuf;
use stylenote::cli::Cli;
use stylenote::config::{self, CliOverrides};
use stylenote::error::Result;
use stylenote::models::IO_RULE;
use stylenote::output::{self, OutputFormat};
use stylenote::rules::RuleSet;
use stylenote::{lint, utils};

fn main() {
    utils::init_logging();
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            2
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let eff = config::resolve_effective(
        &root,
        CliOverrides {
            rules: cli.rules.as_deref().map(config::split_rule_list),
            format: cli.format,
            config: cli.config.clone(),
            jobs: cli.jobs,
        },
    )?;
    let rules = RuleSet::build(&eff.options, &eff.patterns)?.select(&eff.rules)?;

    if cli.list_rules {
        output::print_rules(&rules, eff.format)?;
        return Ok(0);
    }

    let exclude: Vec<PathBuf> = eff.config_path.iter().cloned().collect();
    let report = lint::run_lint(&eff.root, &eff.include, &exclude, rules, eff.jobs)?;
    output::print_report(&report, eff.format)?;

    if eff.format == OutputFormat::Text {
        let unreadable = report
            .summary
            .rules
            .iter()
            .find(|r| r.rule == IO_RULE)
            .map_or(0, |r| r.count);
        if unreadable > 0 {
            eprintln!(
                "{} {} file(s) could not be read as text",
                utils::note_prefix(),
                unreadable
            );
        }
    }
    Ok(report.exit_code())
}
