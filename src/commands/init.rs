use crate::commands::Out;
use crate::sheet::Locator;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the brewboard home directory and writes an initial `config.json` that records where
/// the sales workbook lives.
///
/// # Arguments
/// - `brewboard_home` - The directory that will hold the config, e.g. `$HOME/brewboard`
/// - `source` - Where the sales workbook lives: an http(s) URL or a filesystem path
/// - `sheet` - The worksheet to read, when the first sheet is not the right one
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(brewboard_home: &Path, source: &Locator, sheet: Option<&str>) -> Result<Out<()>> {
    let config = Config::create(brewboard_home, source.clone(), sheet.map(str::to_string))
        .await
        .context("Unable to create the brewboard directory and config")?;
    Ok(format!(
        "Successfully created the brewboard config at '{}'",
        config.config_path().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_the_config() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("brewboard_home");
        let source: Locator = "data/sales.xlsx".parse().unwrap();

        let out = init(&home, &source, Some("2025")).await.unwrap();
        assert!(out.message().contains("config.json"));

        let config = Config::load(&home).await.unwrap();
        assert_eq!(config.source(), &source);
        assert_eq!(config.sheet(), Some("2025"));
    }
}
