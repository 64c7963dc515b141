use crate::utils::Result;
use std::collections::HashMap;
use std::path::Path;

/// One data row as a column-name to value mapping. Column order lives in the
/// companion header list, not in the row itself.
pub type CsvRow = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

/// Parses CSV text into header names and per-row mappings. Tolerates a
/// leading UTF-8 BOM and ragged records; a short record yields a row missing
/// its trailing keys.
pub fn parse_csv(text: &str) -> Result<ParsedCsv> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: CsvRow = headers
            .iter()
            .cloned()
            .zip(record.iter().map(|s| s.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(ParsedCsv { headers, rows })
}

pub async fn read_csv_file(path: &str) -> Result<ParsedCsv> {
    let text = tokio::fs::read_to_string(path).await?;
    parse_csv(&text)
}

pub async fn get_file_size(path: &str) -> Result<u64> {
    let metadata = tokio::fs::metadata(path).await?;
    Ok(metadata.len())
}

pub fn file_exists(path: &str) -> bool {
    Path::new(path).exists()
}
