//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::Jurisdiction;
use crate::{utils, Config};
use std::path::PathBuf;
use tempfile::TempDir;

/// Three income records, one of them dated outside of 2024.
pub const INCOME_CSV: &str = "\
Date,Description,Amount,Category,Counterpart,Reference
2024-02-01,Website build,\"$1,130.00\",Consulting,Acme Corp,INV-001
2024-05-09,,565.00,Product Sales,Globex,INV-002
2023-12-30,Last year,99.00,Interest,,
";

/// Four expense records, one of them dated outside of 2024.
pub const EXPENSES_CSV: &str = "\
Date,Description,Amount,Category,Counterpart,Reference
2024-03-03,Laptop,1000.00,Hardware,Best Buy,R-77
2024-01-20,Client lunch,123.45,Meals & Entertainment,,
2024-07-07,Mystery,11.30,Something New,,
2025-01-01,Next year,50.00,Rent,,
";

/// Test environment that sets up a taxport home directory with a Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment whose configured province is Ontario.
    pub async fn new() -> Self {
        Self::with_province(&Jurisdiction::Ontario).await
    }

    pub async fn with_province(province: &Jurisdiction) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("taxport");
        let config = Config::create(&root, province, "Test Business")
            .await
            .unwrap();
        Self { temp_dir, config }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// A path in the temp directory, outside of the taxport home.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Writes `contents` to `name` in the temp directory and returns its path.
    pub async fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        utils::write(&path, contents).await.unwrap();
        path
    }
}
