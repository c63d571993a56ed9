//! Configuration file handling for brewboard.
//!
//! The configuration file is stored at `$BREWBOARD_HOME/config.json` and holds the workbook
//! source locator plus an optional worksheet-name override. It is created by `brewboard init`
//! and loaded by the commands that read sales data.

use crate::sheet::Locator;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "brewboard";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$BREWBOARD_HOME` and from there it loads `$BREWBOARD_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory if needed and writes an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will hold the config, e.g. `$HOME/brewboard`
    /// - `source` - Where the sales workbook lives: an http(s) URL or a filesystem path
    /// - `sheet` - The worksheet to read; `None` means the first sheet in the workbook
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(
        dir: impl Into<PathBuf>,
        source: Locator,
        sheet: Option<String>,
    ) -> Result<Self> {
        // Create the directory if it does not exist
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the brewboard home directory")?;

        // Canonicalize the directory path
        let root = utils::canonicalize(&maybe_relative).await?;
        let config_path = root.join(CONFIG_JSON);

        // Create and save an initial ConfigFile
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            source,
            sheet,
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that the `brewboard_home` and config file exist
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(brewboard_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = brewboard_home.into();
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Where the sales workbook lives.
    pub fn source(&self) -> &Locator {
        &self.config_file.source
    }

    /// The configured worksheet name, if the first sheet is not the one to read.
    pub fn sheet(&self) -> Option<&str> {
        self.config_file.sheet.as_deref()
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "brewboard",
///   "config_version": 1,
///   "source": "https://example.com/exports/coffee-sales.xlsx",
///   "sheet": "2025"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "brewboard"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Locator for the sales workbook: an http(s) URL or a filesystem path
    source: Locator,

    /// Worksheet to read (optional). Defaults to the first sheet in the workbook.
    #[serde(skip_serializing_if = "Option::is_none")]
    sheet: Option<String>,
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if the file was written by a
    /// different application or config version.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        // Validate app_name
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        // Validate config_version
        anyhow::ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version in config file: expected {}, got {}",
            CONFIG_VERSION,
            config.config_version
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
