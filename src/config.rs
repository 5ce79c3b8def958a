// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{DEFAULT_APR, DEFAULT_DUE_DAY};
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Paydown", "paydown"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

/// User defaults read from `config.json`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_apr: f64,
    pub default_due_day: String,
    pub color: ColorChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_apr: DEFAULT_APR,
            default_due_day: DEFAULT_DUE_DAY.to_string(),
            color: ColorChoice::Auto,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

impl Settings {
    /// Load from `path`, or the platform config file when `None`.
    /// A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_path()?,
        };
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Read config {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("Parse config {}", path.display()))?;
        settings.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if !self.default_apr.is_finite() || self.default_apr < 0.0 {
            return Err(anyhow!(
                "default_apr must be a non-negative number, got {}",
                self.default_apr
            ));
        }
        Ok(())
    }
}
