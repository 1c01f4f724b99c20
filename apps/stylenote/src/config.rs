//! Configuration discovery and effective settings resolution.
//!
//! stylenote reads `stylenote.toml|yaml|yml` from the lint root (or the
//! closest ancestor, stopping at a `.git` directory) and merges it with CLI
//! flags to produce an `Effective` config.
//! Defaults:
//! - `rules`: all registered rules
//! - `format`: `text`
//! - `include`: `**/*`
//! - `jobs`: rayon default
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use crate::loader::DEFAULT_INCLUDE;
use crate::models::pattern::PatternSpec;
use crate::output::OutputFormat;
use crate::rules::RuleOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_NAMES: [&str; 3] = ["stylenote.toml", "stylenote.yaml", "stylenote.yml"];

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `stylenote.toml|yaml`.
pub struct StyleConfig {
    pub rules: Option<Vec<String>>,
    pub format: Option<OutputFormat>,
    pub include: Option<Vec<String>>,
    pub jobs: Option<usize>,
    #[serde(default)]
    pub options: RuleOptions,
    #[serde(default)]
    pub pattern: Vec<PatternSpec>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the lint command.
pub struct Effective {
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub rules: Vec<String>,
    pub format: OutputFormat,
    pub include: Vec<String>,
    pub jobs: Option<usize>,
    pub options: RuleOptions,
    pub patterns: Vec<PatternSpec>,
}

/// Flag values from the command line; `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub rules: Option<Vec<String>>,
    pub format: Option<OutputFormat>,
    pub config: Option<PathBuf>,
    pub jobs: Option<usize>,
}

/// Walk upward from `start` looking for a config file.
///
/// Stops at the first directory holding a `.git` entry.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut cur = if start.is_file() { start.parent()? } else { start };
    loop {
        for name in CONFIG_NAMES {
            let p = cur.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
        if cur.join(".git").exists() {
            return None;
        }
        cur = cur.parent()?;
    }
}

/// Parse a config file; YAML for `.yaml|.yml`, TOML otherwise.
pub fn load_config(path: &Path) -> Result<StyleConfig> {
    let s = fs::read_to_string(path).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let parsed = if is_yaml {
        serde_yaml::from_str::<StyleConfig>(&s).map_err(|e| e.to_string())
    } else {
        toml::from_str::<StyleConfig>(&s).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| Error::Config {
        path: path.to_path_buf(),
        message,
    })
}

/// Split a comma-separated rule list, dropping blanks.
pub fn split_rule_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// The root itself is not checked here; a missing root is reported by the
/// loader. An explicit `--config` that cannot be read is an error.
pub fn resolve_effective(root: &Path, cli: CliOverrides) -> Result<Effective> {
    let config_path = match cli.config {
        Some(p) => Some(p),
        None if root.exists() => {
            find_config(&fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf()))
        }
        None => None,
    };
    let cfg = match config_path.as_deref() {
        Some(p) => {
            debug!(config = %p.display(), "loading config");
            load_config(p)?
        }
        None => StyleConfig::default(),
    };

    let rules = cli.rules.or(cfg.rules).unwrap_or_default();
    let format = cli.format.or(cfg.format).unwrap_or_default();
    let include = cfg
        .include
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| vec![DEFAULT_INCLUDE.to_string()]);
    let jobs = cli.jobs.or(cfg.jobs).filter(|n| *n > 0);

    Ok(Effective {
        root: root.to_path_buf(),
        config_path,
        rules,
        format,
        include,
        jobs,
        options: cfg.options,
        patterns: cfg.pattern,
    })
}
