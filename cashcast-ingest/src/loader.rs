//! Load message dumps exported from the device.
//!
//! Two formats:
//!   JSON: [{"id": "...", "extracted": "...", "timestamp_ms": 1732600000000}, ...]
//!   CSV:  id,timestamp_ms,extracted   (timestamp may be empty)

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::types::RawMessage;

/// Load a dump, picking the format from the file extension.
pub fn load_messages(path: impl AsRef<Path>) -> Result<Vec<RawMessage>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("json") => load_json(path),
        Some("csv") => load_csv(path),
        _ => bail!(
            "unsupported message dump {} (expected .json or .csv)",
            path.display()
        ),
    }
}

pub fn load_json(path: &Path) -> Result<Vec<RawMessage>> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_json_dump(&s).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_json_dump(s: &str) -> Result<Vec<RawMessage>> {
    Ok(serde_json::from_str(s)?)
}

pub fn load_csv(path: &Path) -> Result<Vec<RawMessage>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_csv(rdr).with_context(|| format!("parsing {}", path.display()))
}

fn read_csv<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Vec<RawMessage>> {
    let mut out = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        let msg: RawMessage = result.with_context(|| format!("row {}", line + 1))?;
        out.push(msg);
    }
    Ok(out)
}
