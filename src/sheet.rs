//! Loading the sales workbook into raw rows.
//!
//! The loader runs once per session. It fetches the source bytes, decodes
//! them as a workbook (or CSV), and keys each data row by the header row.
//! Loading never fails the program: every error lands in the log and the
//! caller receives an empty row sequence, which the rest of the system
//! treats as a valid dataset.

use crate::model::{CellValue, RawRow};
use crate::Result;
use anyhow::{bail, Context};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, error};
use url::Url;

/// Where the workbook lives: an http(s) URL or a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Url(Url),
    Path(PathBuf),
}

impl Locator {
    fn classify(s: &str) -> Self {
        if let Ok(url) = Url::parse(s) {
            if matches!(url.scheme(), "http" | "https") {
                return Self::Url(url);
            }
        }
        Self::Path(PathBuf::from(s))
    }

    /// Sources ending in `.csv` decode through the CSV reader instead of the
    /// workbook decoder.
    fn is_csv(&self) -> bool {
        let name = match self {
            Self::Url(url) => url.path(),
            Self::Path(path) => path.to_str().unwrap_or_default(),
        };
        name.to_ascii_lowercase().ends_with(".csv")
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FromStr for Locator {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::classify(s))
    }
}

impl Serialize for Locator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Locator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::classify(&s))
    }
}

/// Loads the source and produces one `RawRow` per data row, keyed by the
/// header row. `sheet` selects a named worksheet; without it the first
/// worksheet is used.
///
/// Any fetch or decode failure is logged and yields an empty sequence.
pub async fn load_rows(locator: &Locator, sheet: Option<&str>) -> Vec<RawRow> {
    match try_load_rows(locator, sheet).await {
        Ok(rows) => {
            debug!("Loaded {} rows from '{locator}'", rows.len());
            rows
        }
        Err(e) => {
            error!("Failed to load sales data from '{locator}': {e:#}");
            Vec::new()
        }
    }
}

async fn try_load_rows(locator: &Locator, sheet: Option<&str>) -> Result<Vec<RawRow>> {
    let bytes = fetch_bytes(locator).await?;
    if locator.is_csv() {
        parse_csv(&bytes)
    } else {
        parse_workbook(bytes, sheet)
    }
}

async fn fetch_bytes(locator: &Locator) -> Result<Vec<u8>> {
    match locator {
        Locator::Url(url) => {
            let client = reqwest::Client::new();
            let response = client
                .get(url.clone())
                .send()
                .await
                .with_context(|| format!("Failed to request '{url}'"))?;
            if !response.status().is_success() {
                bail!("Request for '{url}' returned status {}", response.status());
            }
            let bytes = response
                .bytes()
                .await
                .with_context(|| format!("Failed to read the body of '{url}'"))?;
            Ok(bytes.to_vec())
        }
        Locator::Path(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("Unable to read file {}", path.display())),
    }
}

fn parse_workbook(bytes: Vec<u8>, sheet: Option<&str>) -> Result<Vec<RawRow>> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).context("Failed to decode the workbook")?;
    let range = match sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .with_context(|| format!("Sheet '{name}' was not found in the workbook"))?,
        None => workbook
            .worksheet_range_at(0)
            .context("The workbook contains no sheets")?
            .context("Failed to read the first sheet")?,
    };
    Ok(rows_from_range(&range))
}

fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| {
                CellValue::from_cell(cell)
                    .map(|v| v.to_text())
                    .unwrap_or_default()
            })
            .collect(),
        None => return Vec::new(),
    };

    let mut out = Vec::new();
    for row in rows {
        let mut raw = RawRow::new();
        for (ix, cell) in row.iter().enumerate() {
            let Some(header) = headers.get(ix) else {
                continue;
            };
            if header.is_empty() {
                continue;
            }
            if let Some(value) = CellValue::from_cell(cell) {
                raw.insert(header.clone(), value);
            }
        }
        if !raw.is_empty() {
            out.push(raw);
        }
    }
    out
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader
        .headers()
        .context("Failed to read the CSV header row")?
        .clone();

    let mut out = Vec::new();
    for result in reader.records() {
        let record = result.context("Failed to read a CSV record")?;
        let mut raw = RawRow::new();
        for (ix, field) in record.iter().enumerate() {
            let Some(header) = headers.get(ix) else {
                continue;
            };
            if header.is_empty() || field.is_empty() {
                continue;
            }
            raw.insert(header, CellValue::text(field));
        }
        if !raw.is_empty() {
            out.push(raw);
        }
    }
    Ok(out)
}
