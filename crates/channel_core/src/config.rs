use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use crate::sort::SortScheme;

pub const DEFAULT_BACKLOG_MAX: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Capacity of each channel's message and ad backlog.
    pub backlog_max: usize,
    pub sort_users_alphabetically: bool,
    /// Ding terms applied to every channel in addition to its own.
    pub ding_terms: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backlog_max: DEFAULT_BACKLOG_MAX,
            sort_users_alphabetically: false,
            ding_terms: Vec::new(),
        }
    }
}

impl AppSettings {
    pub fn with_backlog_max(mut self, backlog_max: usize) -> Self {
        self.backlog_max = backlog_max.max(1);
        self
    }

    pub fn sort_scheme(&self) -> SortScheme {
        SortScheme::from_alphabetical(self.sort_users_alphabetically)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    backlog_max: Option<usize>,
    sort_users_alphabetically: Option<bool>,
    ding_terms: Option<Vec<String>>,
}

/// Loads settings from defaults, then the optional TOML file, then
/// `APP__*` environment variables.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<AppSettings> {
    let mut settings = AppSettings::default();

    if let Some(path) = path {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        apply_file_settings(&mut settings, &raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    Ok(settings)
}

fn apply_file_settings(settings: &mut AppSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.backlog_max {
        settings.backlog_max = v;
    }
    if let Some(v) = file_cfg.sort_users_alphabetically {
        settings.sort_users_alphabetically = v;
    }
    if let Some(v) = file_cfg.ding_terms {
        settings.ding_terms = v;
    }

    normalize(settings);
    Ok(())
}

fn apply_env_overrides(settings: &mut AppSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__BACKLOG_MAX") {
        match v.trim().parse::<usize>() {
            Ok(parsed) => settings.backlog_max = parsed,
            Err(_) => warn!(value = %v, "ignoring unparsable APP__BACKLOG_MAX"),
        }
    }

    if let Some(v) = lookup("APP__SORT_USERS_ALPHABETICALLY") {
        match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => settings.sort_users_alphabetically = true,
            "0" | "false" | "no" | "off" => settings.sort_users_alphabetically = false,
            _ => warn!(value = %v, "ignoring unparsable APP__SORT_USERS_ALPHABETICALLY"),
        }
    }

    if let Some(v) = lookup("APP__DING_TERMS") {
        settings.ding_terms = v
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string)
            .collect();
    }

    normalize(settings);
}

fn normalize(settings: &mut AppSettings) {
    if settings.backlog_max == 0 {
        warn!("backlog_max of 0 is not usable; using 1");
        settings.backlog_max = 1;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
