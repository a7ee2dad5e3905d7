//! Accounting-tool invocation and import-log scanning.
//!
//! The import tool is an external executable; it writes its own log files,
//! one per import. The connector's only insight into an import's outcome
//! is scanning those logs for error markers.

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

use crate::config::ImporterConfig;
use crate::core::ConnectorError;

/// Marker in the second field of an import-log line that flags an error.
const ERROR_MARKER: &str = "Erreur";

/// Run the import tool once per export file, products first so order
/// lines never reference a product the tool has not seen.
///
/// A spawn failure is fatal; a non-zero exit status is reported back as a
/// run-level error signal, not an abort.
pub fn run_imports(config: &ImporterConfig, files: &[&Path]) -> Result<bool, ConnectorError> {
    let mut all_ok = true;
    for file in files {
        let status = Command::new(&config.executable)
            .arg(file)
            .status()
            .map_err(|e| {
                ConnectorError::Importer(format!(
                    "failed to run {}: {e}",
                    config.executable.display()
                ))
            })?;
        if status.success() {
            info!(file = %file.display(), "import finished");
        } else {
            warn!(file = %file.display(), ?status, "import tool exited with failure");
            all_ok = false;
        }
    }
    Ok(all_ok)
}

/// Scan one import log for error lines.
///
/// A line counts as an error when its second semicolon-separated field is
/// the error marker; malformed lines are ignored. A missing log file scans
/// as empty — the tool only writes one when it has something to say.
pub fn log_reports_errors(path: &Path) -> io::Result<bool> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    Ok(content.lines().any(line_is_error))
}

fn line_is_error(line: &str) -> bool {
    line.split(';').nth(1).is_some_and(|field| field == ERROR_MARKER)
}
