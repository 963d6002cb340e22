// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod config;

use crate::config::{Config, ConfigError, ValidatedConfig};
use std::io;
use std::path::{Path, PathBuf};

pub use config::ensure_config;

#[derive(Debug)]
pub enum BootstrapError {
    Io(io::Error),
    Config(ConfigError),
}

impl std::fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootstrapError::Io(err) => write!(f, "{}", err),
            BootstrapError::Config(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BootstrapError {}

impl From<io::Error> for BootstrapError {
    fn from(err: io::Error) -> Self {
        BootstrapError::Io(err)
    }
}

pub struct BootstrapResult {
    pub validated_config: ValidatedConfig,
    pub runtime_root: PathBuf,
    pub created_config: bool,
}

pub fn bootstrap_runtime(root: &Path) -> Result<BootstrapResult, BootstrapError> {
    let runtime_root = config::normalize_root(root)?;
    let created_config = config::ensure_config(&runtime_root)?;
    let validated_config =
        Config::load_and_validate(&runtime_root).map_err(BootstrapError::Config)?;

    Ok(BootstrapResult {
        validated_config,
        runtime_root,
        created_config,
    })
}

pub(crate) fn log_action(message: String) {
    eprintln!("[bootstrap] {}", message);
}
