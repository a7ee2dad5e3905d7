//! VAT mapping table.
//!
//! Maps a (territoriality, country) pair to the VAT rate and the
//! accounting-side VAT identifier.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::core::ConnectorError;

/// Sentinel country id marking the exoneration (VAT-exempt) rate of a
/// territoriality.
pub const EXONERATED_COUNTRY: i64 = -1;

/// VAT data for one (territoriality, country) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VatEntry {
    /// VAT rate as a fraction per one (`0.20` for 20%). The source table
    /// stores percentages with a comma decimal separator; rates are
    /// normalized at load time so all downstream arithmetic uses the
    /// fraction form.
    pub rate: Decimal,
    /// VAT identifier as the accounting tool knows it.
    pub accounting_id: String,
}

/// The VAT mapping table, loaded once per run and immutable thereafter.
///
/// Built from a semicolon-delimited file with one header row and 12 columns
/// per data row, of which four are consumed: territoriality, country id,
/// VAT rate and accounting VAT id. The remaining columns belong to the
/// accounting import profile and are ignored.
#[derive(Debug, Clone, Default)]
pub struct VatMap {
    entries: HashMap<(String, i64), VatEntry>,
}

/// Column count of the VAT mapping file.
const VAT_COLUMNS: usize = 12;

impl VatMap {
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
            if columns.len() != VAT_COLUMNS {
                return Err(ConnectorError::MalformedMappingRow {
                    file: file.to_string(),
                    line: index + 1,
                    expected: VAT_COLUMNS.to_string(),
                    found: columns.len(),
                });
            }

            let country_id: i64 = columns[1].parse().map_err(|_| {
                ConnectorError::MalformedMappingValue {
                    file: file.to_string(),
                    line: index + 1,
                    detail: format!("invalid country id '{}'", columns[1]),
                }
            })?;

            let rate = parse_rate(columns[2]).ok_or_else(|| {
                ConnectorError::MalformedMappingValue {
                    file: file.to_string(),
                    line: index + 1,
                    detail: format!("invalid VAT rate '{}'", columns[2]),
                }
            })?;

            entries.insert(
                (columns[0].to_string(), country_id),
                VatEntry {
                    rate,
                    accounting_id: columns[3].to_string(),
                },
            );
        }

        Ok(Self { entries })
    }

    /// Resolve the VAT entry for an order.
    ///
    /// When VAT applies, the exact (territoriality, country) entry is
    /// required; when it does not, the territoriality's exoneration entry
    /// (sentinel country [`EXONERATED_COUNTRY`]) is required instead.
    pub fn resolve(
        &self,
        territoriality: &str,
        country_id: i64,
        vat_applied: bool,
    ) -> Option<&VatEntry> {
        let country = if vat_applied { country_id } else { EXONERATED_COUNTRY };
        self.entries.get(&(territoriality.to_string(), country))
    }

    /// Whether any entry exists for this territoriality.
    pub fn has_territoriality(&self, territoriality: &str) -> bool {
        self.entries.keys().any(|(t, _)| t == territoriality)
    }

    /// Number of (territoriality, country) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a VAT rate cell: comma decimal separator, percentage form.
/// `"20,0"` becomes `0.20`, stored as rate per one.
fn parse_rate(cell: &str) -> Option<Decimal> {
    let normalized = cell.replace(',', ".");
    let percent: Decimal = normalized.parse().ok()?;
    Some(percent / Decimal::ONE_HUNDRED)
}
