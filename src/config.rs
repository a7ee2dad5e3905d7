//! Run configuration, loaded from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::ConnectorError;

/// The whole configuration file.
///
/// ```toml
/// [webservice]
/// url = "https://shop.example.com/api"
/// api_key = "XXXX"
///
/// [mappings]
/// payment_methods = "payment_methods.csv"
/// vat = "vat.csv"
///
/// [export]
/// products_file = "out/products.csv"
/// orders_file = "out/orders.csv"
///
/// [importer]
/// executable = "C:/EBP/import.exe"
/// products_log = "C:/EBP/logs/products.txt"
/// orders_log = "C:/EBP/logs/orders.txt"
///
/// [run]
/// order_limit = 100
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorConfig {
    pub webservice: WebserviceConfig,
    pub mappings: MappingsConfig,
    pub export: ExportConfig,
    /// Accounting-tool invocation; when absent, the run stops after
    /// writing the export files.
    pub importer: Option<ImporterConfig>,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebserviceConfig {
    /// Base URL of the storefront API.
    pub url: String,
    /// Static API key, sent as the HTTP Basic username.
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MappingsConfig {
    /// Payment-method mapping file (semicolon-delimited, 5 or 6 columns).
    pub payment_methods: PathBuf,
    /// VAT mapping file (semicolon-delimited, 12 columns).
    pub vat: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Product export file, truncated at run start.
    pub products_file: PathBuf,
    /// Order-line export file, truncated at run start.
    pub orders_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImporterConfig {
    /// The accounting import executable, run once per export file.
    pub executable: PathBuf,
    /// Log file the tool writes for the product import.
    pub products_log: PathBuf,
    /// Log file the tool writes for the order import.
    pub orders_log: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Stop starting new orders once this many have been exported,
    /// both phases counted.
    pub order_limit: Option<u64>,
    /// Storefront states a regular order must be in to export.
    #[serde(default = "default_valid_states")]
    pub valid_order_states: Vec<String>,
    /// Storefront states a refund order must be in to export.
    #[serde(default = "default_refund_states")]
    pub refund_order_states: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            order_limit: None,
            valid_order_states: default_valid_states(),
            refund_order_states: default_refund_states(),
        }
    }
}

fn default_valid_states() -> Vec<String> {
    vec!["4".into(), "5".into()]
}

fn default_refund_states() -> Vec<String> {
    vec!["7".into()]
}

impl ConnectorConfig {
    /// Read and validate the configuration file.
    ///
    /// Missing file, TOML errors, missing mapping files and a missing
    /// importer executable are all fatal before any work starts.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConnectorError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ConnectorError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConnectorError> {
        for (label, file) in [
            ("payment-method mapping", &self.mappings.payment_methods),
            ("VAT mapping", &self.mappings.vat),
        ] {
            if !file.is_file() {
                return Err(ConnectorError::Config(format!(
                    "{label} file {} does not exist",
                    file.display()
                )));
            }
        }
        if let Some(importer) = &self.importer {
            if !importer.executable.is_file() {
                return Err(ConnectorError::Config(format!(
                    "importer executable {} does not exist",
                    importer.executable.display()
                )));
            }
        }
        Ok(())
    }
}
