use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::Jurisdiction;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory, the exports directory and an initial `config.json`.
///
/// # Arguments
/// - `taxport_home` - The directory that will be the root of data directory, e.g. `$HOME/taxport`
/// - `province` - The default jurisdiction for the other commands.
/// - `business_name` - Stored in the config for reference.
///
/// # Errors
/// - Returns an error if any file operations fail or if the home is already initialized.
pub async fn init(
    taxport_home: &Path,
    province: &Jurisdiction,
    business_name: &str,
) -> Result<Out<()>> {
    if !province.is_recognized() {
        tracing::warn!("'{province}' is not a recognized province, the 5% GST rate will be used");
    }
    let config = Config::create(taxport_home, province, business_name)
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the taxport directory at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_type;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let out = init(&home, &Jurisdiction::NovaScotia, "Acme").await.unwrap();
        assert!(out.message().starts_with("Successfully created"));

        let config = Config::load(&home).await.unwrap();
        assert_eq!(config.province(), &Jurisdiction::NovaScotia);
        assert_eq!(config.business_name(), "Acme");
    }

    #[tokio::test]
    async fn test_init_twice_is_config_error() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), &Jurisdiction::Ontario, "").await.unwrap();
        let err = init(dir.path(), &Jurisdiction::Ontario, "")
            .await
            .unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Config));
    }
}
