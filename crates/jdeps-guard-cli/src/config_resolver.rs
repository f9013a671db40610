//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/jdeps-guard.toml` or `.jdeps-guard.toml`
//! 3. `~/.jdeps-guard/config.toml` (global fallback)
//! 4. No config found → defaults (no rules, everything fails)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jdeps_guard_core::config::{self, Config, RuleSet};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.jdeps-guard/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// Reads and validates the rules from this source.
    ///
    /// Validation errors are rendered as diagnostics before they are
    /// wrapped, so the rule and field at fault show up in the output.
    pub fn load_rules(&self) -> Result<RuleSet> {
        let config = match self.path() {
            None => {
                tracing::debug!("No config found, using defaults");
                Config::default()
            }
            Some(p) => {
                if self.is_global() {
                    tracing::info!("Using global config: {}", p.display());
                }
                Config::from_file(p)
                    .map_err(render)
                    .with_context(|| format!("Failed to load config: {}", p.display()))?
            }
        };

        let location = self
            .path()
            .map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string());
        config::load(config)
            .map_err(render)
            .with_context(|| format!("Invalid rules in {location}"))
    }
}

fn render<E>(err: E) -> anyhow::Error
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    anyhow::anyhow!("{:?}", miette::Report::new(err))
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["jdeps-guard.toml", ".jdeps-guard.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Resolution against an explicit global directory, so tests need no env vars.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let project = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file());
    if let Some(path) = project {
        tracing::debug!("Found project config: {}", path.display());
        return ConfigSource::Project(path);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |path| {
            tracing::debug!("Found global config: {}", path.display());
            ConfigSource::Global(path)
        })
}

/// Returns the global config directory path.
///
/// Resolution: `$JDEPS_GUARD_CONFIG_DIR` > `~/.jdeps-guard/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("JDEPS_GUARD_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".jdeps-guard"))
}
