// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{BootstrapError, log_action};
use rand::RngCore;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 7080;
const DEFAULT_WORKERS: u16 = 4;

pub fn ensure_config(root: &Path) -> Result<bool, BootstrapError> {
    let config_path = root.join("config.yaml");

    if config_path.exists() {
        return Ok(false);
    }

    let jwt_secret = generate_jwt_secret();
    let contents = default_config_yaml(&jwt_secret);

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&config_path)
    {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(BootstrapError::Io(err)),
    };

    file.write_all(contents.as_bytes())?;
    file.sync_all()?;

    log_action(format!(
        "created config.yaml with generated JWT secret (http {})",
        DEFAULT_PORT
    ));

    Ok(true)
}

pub(super) fn normalize_root(root: &Path) -> Result<PathBuf, BootstrapError> {
    let root_path = if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root.to_path_buf()
    };

    if root_path.exists() {
        if !root_path.is_dir() {
            return Err(BootstrapError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Runtime root is not a directory: {}", root_path.display()),
            )));
        }
        return Ok(root_path);
    }

    fs::create_dir_all(&root_path)?;
    log_action(format!(
        "created runtime root directory {}",
        root_path.display()
    ));
    Ok(root_path)
}

fn generate_jwt_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);

    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push_str(&format!("{:02x}", byte));
    }

    hex
}

fn default_config_yaml(jwt_secret: &str) -> String {
    format!(
        "server:\n  host: \"127.0.0.1\"\n  port: {port}\n  workers: {workers}\n\ndatabase:\n  file: \"profiles.db\"\n\nauth:\n  jwt:\n    secret: \"{jwt_secret}\"\n    issuer: \"atelier\"\n    audience: \"atelier-users\"\n    expiration_hours: 12\n\nlogging:\n  level: \"info\"\n\napp:\n  name: \"Atelier\"\n  description: \"Authenticated user profile API service\"\n",
        port = DEFAULT_PORT,
        workers = DEFAULT_WORKERS,
        jwt_secret = jwt_secret,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_contains_expected_sections() {
        let yaml = default_config_yaml("secret");
        assert!(yaml.contains("port: 7080"));
        assert!(yaml.contains("file: \"profiles.db\""));
        assert!(yaml.contains("secret: \"secret\""));
    }

    #[test]
    fn generated_secret_is_hex_of_32_bytes() {
        let secret = generate_jwt_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ensure_config_creates_file_once() {
        let temp = tempfile::tempdir().expect("tempdir");

        let created = ensure_config(temp.path()).expect("first run");
        assert!(created);

        let first = fs::read_to_string(temp.path().join("config.yaml")).expect("read config");

        let created_again = ensure_config(temp.path()).expect("second run");
        assert!(!created_again);

        let second = fs::read_to_string(temp.path().join("config.yaml")).expect("read config");
        assert_eq!(first, second);
    }
}
