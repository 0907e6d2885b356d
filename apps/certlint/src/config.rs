//! Configuration discovery and effective settings resolution.
//!
//! certlint reads `certlint.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `output`: `human`
//! - `lint.policy_date`: unset (certificate `not_before`, else today)
//! - `lint.include|exclude|include_sources|exclude_sources`: empty
//! - `meta.generation`: `legacy`
//! - `meta.exclude`: empty
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigurationError;
use crate::meta::init_first::InitializerShape;
use crate::policy::parse_policy_date;
use crate::registry::LintFilter;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Certificate lint section under `[lint]`.
pub struct LintCfg {
    pub policy_date: Option<String>,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub include_sources: Vec<String>,
    #[serde(default)]
    pub exclude_sources: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Meta-linter section under `[meta]`.
pub struct MetaCfg {
    pub generation: Option<InitializerShape>,
    /// Glob patterns of paths the meta-linter skips.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `certlint.toml|yaml`.
pub struct CertlintConfig {
    pub output: Option<String>,
    pub lint: Option<LintCfg>,
    pub meta: Option<MetaCfg>,
}

/// CLI values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub repo_root: Option<String>,
    pub output: Option<String>,
    pub policy_date: Option<String>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub include_sources: Option<Vec<String>>,
    pub exclude_sources: Option<Vec<String>>,
    pub generation: Option<InitializerShape>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub output: String,
    pub policy_date: Option<NaiveDate>,
    pub filter: LintFilter,
    pub generation: InitializerShape,
    pub meta_exclude: Vec<String>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `certlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("certlint.toml").exists()
            || cur.join("certlint.yaml").exists()
            || cur.join("certlint.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `CertlintConfig` from `certlint.toml` or `certlint.yaml|yml` if
/// present. A config file that exists but cannot be read or parsed is an
/// error, never a silent fallback to defaults.
pub fn load_config(root: &Path) -> Result<Option<CertlintConfig>, ConfigurationError> {
    let toml_path = root.join("certlint.toml");
    if toml_path.exists() {
        let s = read_config(&toml_path)?;
        let cfg: CertlintConfig = toml::from_str(&s).map_err(|e| invalid(&toml_path, e))?;
        return Ok(Some(cfg));
    }
    for yml in ["certlint.yaml", "certlint.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = read_config(&p)?;
            let cfg: CertlintConfig = serde_yaml::from_str(&s).map_err(|e| invalid(&p, e))?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

fn read_config(path: &Path) -> Result<String, ConfigurationError> {
    fs::read_to_string(path).map_err(|e| invalid(path, e))
}

fn invalid(path: &Path, reason: impl std::fmt::Display) -> ConfigurationError {
    ConfigurationError::InvalidConfig {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides) -> Result<Effective, ConfigurationError> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();
    let lint = cfg.lint.unwrap_or_default();
    let meta = cfg.meta.unwrap_or_default();

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let policy_date = match cli.policy_date.clone().or(lint.policy_date) {
        Some(s) => Some(parse_policy_date(&s).ok_or(ConfigurationError::InvalidPolicyDate(s))?),
        None => None,
    };

    let filter = LintFilter::from_lists(
        cli.include.as_deref().unwrap_or(&lint.include),
        cli.exclude.as_deref().unwrap_or(&lint.exclude),
        cli.include_sources.as_deref().unwrap_or(&lint.include_sources),
        cli.exclude_sources.as_deref().unwrap_or(&lint.exclude_sources),
    )?;

    let generation = cli.generation.or(meta.generation).unwrap_or_default();

    Ok(Effective {
        repo_root,
        config_found,
        output,
        policy_date,
        filter,
        generation,
        meta_exclude: meta.exclude,
    })
}
