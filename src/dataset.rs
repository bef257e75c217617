//! Loading allowlist datasets from disk
//!
//! Two formats are accepted, picked by file extension:
//!
//! - `.json`: `[{"address": "0x..", "price": "1000"}, ...]`; the price may
//!   be a string or an integer (prices above `u64::MAX` must be strings)
//! - `.csv`: header row `address,price`, `#` starts a comment line

use crate::model::AllowlistEntry;
use crate::{Error, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct JsonRow {
    address: String,
    price: JsonPrice,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonPrice {
    Text(String),
    Number(serde_json::Number),
}

impl JsonPrice {
    fn as_text(&self) -> String {
        match self {
            JsonPrice::Text(s) => s.clone(),
            JsonPrice::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    address: String,
    price: String,
}

/// Load allowlist entries from a `.json` or `.csv` file
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<AllowlistEntry>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let entries = match extension.as_deref() {
        Some("json") => entries_from_json(&std::fs::read_to_string(path)?)?,
        Some("csv") => entries_from_csv(std::fs::File::open(path)?)?,
        _ => {
            return Err(Error::Dataset(format!(
                "unsupported allowlist file {}, expected .json or .csv",
                path.display()
            )))
        }
    };

    for entry in entries.iter().filter(|e| e.address.is_zero()) {
        warn!(price = %entry.price, "allowlist contains the zero address");
    }

    debug!(path = %path.display(), entries = entries.len(), "loaded allowlist");
    Ok(entries)
}

/// Parse entries from a JSON array
pub fn entries_from_json(content: &str) -> Result<Vec<AllowlistEntry>> {
    let rows: Vec<JsonRow> = serde_json::from_str(content)?;
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            AllowlistEntry::parse(&row.address, &row.price.as_text()).map_err(|e| at_row(i + 1, e))
        })
        .collect()
}

/// Parse entries from CSV with an `address,price` header
pub fn entries_from_csv<R: Read>(reader: R) -> Result<Vec<AllowlistEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut entries = Vec::new();
    for (i, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let entry = AllowlistEntry::parse(&row.address, &row.price).map_err(|e| at_row(i + 1, e))?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Attach a 1-based row number to an entry parse error
fn at_row(row: usize, err: Error) -> Error {
    match err {
        Error::InvalidAddressFormat(msg) => {
            Error::InvalidAddressFormat(format!("row {}: {}", row, msg))
        }
        Error::InvalidPriceValue(msg) => Error::InvalidPriceValue(format!("row {}: {}", row, msg)),
        other => other,
    }
}
