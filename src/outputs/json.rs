//! JSON report writer.
//!
//! The report is pretty-printed with four-space indentation and UTF-8 text
//! left unescaped, so player and team names read as they do on the source
//! page. The parent directory must already exist.

use crate::error::WriteError;
use crate::models::InjuryReport;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const INDENT: &[u8] = b"    ";

/// Encode a report exactly as it is written to disk.
pub fn to_pretty_json(report: &InjuryReport) -> Result<Vec<u8>, WriteError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    report.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `report` to `path`, replacing whatever is there.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(report: &InjuryReport, path: &Path) -> Result<(), WriteError> {
    let json = to_pretty_json(report)?;
    fs::write(path, &json).await.map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(bytes = json.len(), "Successfully saved data to {}", path.display());
    Ok(())
}
