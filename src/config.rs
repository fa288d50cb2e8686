//! Configuration file handling for taxport.
//!
//! The configuration file is stored at `$TAXPORT_HOME/config.json` and holds the business name,
//! the province whose sales tax applies, and where exports are written.

use crate::model::Jurisdiction;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "taxport";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const EXPORTS: &str = "exports";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$TAXPORT_HOME` and from there it loads `$TAXPORT_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    export_dir: PathBuf,
}

impl Config {
    /// Creates the home directory, the exports directory and an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory, e.g. `$HOME/taxport`
    /// - `province` - The jurisdiction used when a command does not name one.
    /// - `business_name` - Free text, may be empty.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail or if a config file already exists.
    pub async fn create(
        dir: impl Into<PathBuf>,
        province: &Jurisdiction,
        business_name: &str,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the taxport home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("A config file already exists at '{}'", config_path.display())
        }

        let config_file = ConfigFile {
            province: province.clone(),
            business_name: business_name.to_string(),
            ..ConfigFile::default()
        };
        let export_dir = resolve(&root, config_file.export_dir());
        utils::make_dir(&export_dir).await?;
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
            export_dir,
        })
    }

    /// This will
    /// - validate that `taxport_home` and its config file exist
    /// - load and validate the config file
    /// - validate that the export directory exists
    pub async fn load(taxport_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = taxport_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Taxport home is missing, run 'taxport init' first")?;

        let _ = utils::read_dir(&root)
            .await
            .context("Taxport home is not a directory")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let export_dir = resolve(&root, config_file.export_dir());
        if !export_dir.is_dir() {
            bail!(
                "The export directory is missing '{}'",
                export_dir.display()
            )
        }

        Ok(Self {
            root,
            config_path,
            config_file,
            export_dir,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn province(&self) -> &Jurisdiction {
        &self.config_file.province
    }

    pub fn business_name(&self) -> &str {
        &self.config_file.business_name
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

/// Returns `p` if it is absolute, otherwise joins it to `root`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "taxport",
///   "config_version": 1,
///   "province": "Ontario",
///   "business_name": "Acme Consulting",
///   "export_dir": "exports"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "taxport"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The default jurisdiction. Names that are not recognized fall back to the 5% GST rate.
    #[serde(default)]
    province: Jurisdiction,

    #[serde(default)]
    business_name: String,

    /// Where exports are written (optional, relative to the home directory or absolute).
    /// Defaults to $TAXPORT_HOME/exports if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    export_dir: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            province: Jurisdiction::default(),
            business_name: String::new(),
            export_dir: Some(PathBuf::from(EXPORTS)),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        if !config.province.is_recognized() {
            tracing::warn!(
                "The configured province '{}' is not recognized, the 5% GST rate will be used",
                config.province
            );
        }

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(EXPORTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("taxport_home");

        let config = Config::create(&home_dir, &Jurisdiction::Quebec, "Acme")
            .await
            .unwrap();

        assert_eq!(config.province(), &Jurisdiction::Quebec);
        assert_eq!(config.business_name(), "Acme");
        assert!(config.export_dir().is_dir());
        assert!(config.config_path().is_file());

        let json = utils::read(config.config_path()).await.unwrap();
        assert!(json.contains(r#""app_name": "taxport""#));
        assert!(json.contains(r#""province": "Quebec""#));
        assert!(json.contains(r#""export_dir": "exports""#));
    }

    #[tokio::test]
    async fn test_config_create_then_load() {
        let dir = TempDir::new().unwrap();
        let created = Config::create(dir.path(), &Jurisdiction::Alberta, "")
            .await
            .unwrap();
        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(created.root(), loaded.root());
        assert_eq!(loaded.province(), &Jurisdiction::Alberta);
        assert_eq!(created.export_dir(), loaded.export_dir());
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), &Jurisdiction::Ontario, "")
            .await
            .unwrap();
        let result = Config::create(dir.path(), &Jurisdiction::Ontario, "").await;
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path()).await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("The config file is missing"));
    }

    #[tokio::test]
    async fn test_config_load_missing_export_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), &Jurisdiction::Ontario, "")
            .await
            .unwrap();
        tokio::fs::remove_dir(config.export_dir()).await.unwrap();
        let result = Config::load(dir.path()).await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("The export directory is missing"));
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_JSON);
        let json = r#"{ "app_name": "taxport", "config_version": 1 }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config.province, Jurisdiction::Ontario);
        assert_eq!(config.business_name, "");
        assert_eq!(config.export_dir(), PathBuf::from(EXPORTS));
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_JSON);
        let json = r#"{ "app_name": "wrong_app", "config_version": 1 }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_unrecognized_province_loads() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_JSON);
        let json = r#"{ "app_name": "taxport", "config_version": 1, "province": "Mars" }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config.province, Jurisdiction::parse("Mars"));
    }

    #[test]
    fn test_absolute_export_dir_is_kept() {
        let root = Path::new("/home/me/taxport");
        assert_eq!(
            resolve(root, PathBuf::from("/tmp/out")),
            PathBuf::from("/tmp/out")
        );
        assert_eq!(
            resolve(root, PathBuf::from("exports")),
            PathBuf::from("/home/me/taxport/exports")
        );
    }
}
