//! Payment-method mapping table.
//!
//! Maps a storefront payment label plus the VAT-applied flag to the
//! accounting-side client code, currency, territoriality and payment label.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::ConnectorError;

/// Token in the "VAT mode" column that means "with VAT". Anything else
/// means "without VAT"; the flag is binary, not tri-state.
const WITH_VAT_TOKEN: &str = "TTC";

/// Accounting-side data for one (payment label, VAT applied) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethodEntry {
    /// Accounting client code the order is billed to.
    pub client_code: String,
    /// Currency code the client is billed in.
    pub currency_code: String,
    /// Territoriality code, key into the VAT map.
    pub territoriality: String,
    /// Payment-method label as the accounting tool knows it.
    pub accounting_label: String,
}

/// The payment-method mapping table, loaded once per run and immutable
/// thereafter.
///
/// Built from a semicolon-delimited file with one header row. The current
/// schema has 6 columns (`payment label;vat mode;client code;currency;
/// territoriality;accounting label`); legacy 5-column rows lack the
/// accounting label and reuse the storefront label for it. The two schemas
/// are told apart per row by column count.
#[derive(Debug, Clone, Default)]
pub struct PaymentMethodMap {
    entries: HashMap<(String, bool), PaymentMethodEntry>,
}

impl PaymentMethodMap {
    /// Load the table from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse(&name, &content)
    }

    /// Parse the table from text. `file` is used in error messages only.
    pub fn parse(file: &str, content: &str) -> Result<Self, ConnectorError> {
        let mut entries = HashMap::new();

        // Line 1 is the header; data starts at line 2.
        for (index, raw) in content.lines().enumerate().skip(1) {
            if raw.trim().is_empty() {
                continue;
            }
            let columns: Vec<&str> = raw.split(';').map(str::trim).collect();
            let accounting_label = match columns.len() {
                6 => columns[5],
                // Legacy schema: no accounting label column.
                5 => columns[0],
                found => {
                    return Err(ConnectorError::MalformedMappingRow {
                        file: file.to_string(),
                        line: index + 1,
                        expected: "5 or 6".into(),
                        found,
                    });
                }
            };

            let vat_applied = columns[1] == WITH_VAT_TOKEN;
            entries.insert(
                (columns[0].to_string(), vat_applied),
                PaymentMethodEntry {
                    client_code: columns[2].to_string(),
                    currency_code: columns[3].to_string(),
                    territoriality: columns[4].to_string(),
                    accounting_label: accounting_label.to_string(),
                },
            );
        }

        Ok(Self { entries })
    }

    /// Look up the entry for a payment label and VAT-applied flag.
    pub fn resolve(&self, payment: &str, vat_applied: bool) -> Option<&PaymentMethodEntry> {
        self.entries.get(&(payment.to_string(), vat_applied))
    }

    /// Every territoriality referenced by the table, with duplicates.
    /// Input to the cross-table consistency check.
    pub fn territorialities(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|e| e.territoriality.as_str())
    }

    /// Number of (payment label, VAT applied) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
