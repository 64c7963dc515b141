pub mod client;

pub use client::{AnthropicClient, CompletionApi, DEFAULT_MODEL};

use crate::csv_processor::{file_exists, read_csv_file, serialize_rows, CsvRow};
use crate::progress::ProgressSink;
use crate::utils::{Result, SoupIssuesError, TranslateConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

const KNOWN_COLUMNS: [&str; 4] = ["soupId", "projectId", "title", "body"];
const OUTPUT_COLUMNS: [&str; 2] = ["titleJa", "bodyJa"];

/// Output header order: the known columns present in the first row, then the
/// remaining input columns in file order, then the translation columns.
/// Derived once from the first row; rows are assumed schema-uniform.
pub fn derive_output_headers(headers: &[String], first_row: Option<&CsvRow>) -> Vec<String> {
    let present = |name: &str| match first_row {
        Some(row) => row.contains_key(name),
        None => headers.iter().any(|h| h == name),
    };

    let mut out: Vec<String> = KNOWN_COLUMNS
        .iter()
        .filter(|name| present(name))
        .map(|name| name.to_string())
        .collect();

    for header in headers {
        if present(header)
            && !KNOWN_COLUMNS.contains(&header.as_str())
            && !OUTPUT_COLUMNS.contains(&header.as_str())
        {
            out.push(header.clone());
        }
    }

    out.extend(OUTPUT_COLUMNS.iter().map(|name| name.to_string()));
    out
}

/// Splits a completion response on the first run of blank lines: first
/// segment is the translated title, the remaining segments rejoined with a
/// blank line are the translated body.
pub fn split_translation(response: &str) -> (String, String) {
    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in response.trim().lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    let mut segments = paragraphs.into_iter().map(|lines| lines.join("\n"));
    let title = segments.next().unwrap_or_default().trim().to_string();
    let body = segments.collect::<Vec<_>>().join("\n\n").trim().to_string();
    (title, body)
}

// The summary/first_comment fallbacks mirror the exporter that produced the
// original input files; they may not exist in other schemas.
fn field_or<'a>(row: &'a CsvRow, primary: &str, fallback: &str) -> &'a str {
    match row.get(primary).map(String::as_str) {
        Some(value) if !value.is_empty() => value,
        _ => row.get(fallback).map(String::as_str).unwrap_or(""),
    }
}

/// Translates every row with at most `concurrency` completions in flight.
/// Output order always equals input order; the first failed row fails the
/// whole batch. Rows with no translatable content skip the remote call.
pub async fn translate_rows(
    rows: Vec<CsvRow>,
    api: Arc<dyn CompletionApi>,
    concurrency: usize,
    progress: Arc<dyn ProgressSink>,
) -> Result<Vec<CsvRow>> {
    let total = rows.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let done = Arc::new(AtomicUsize::new(0));
    let step = (total / 20).max(1);

    let mut handles = Vec::with_capacity(total);
    for mut row in rows {
        let api = Arc::clone(&api);
        let semaphore = Arc::clone(&semaphore);
        let done = Arc::clone(&done);
        let progress = Arc::clone(&progress);

        handles.push(tokio::spawn(async move {
            let title = field_or(&row, "title", "summary").to_string();
            let body = field_or(&row, "body", "first_comment").to_string();

            let (title_ja, body_ja) = if title.is_empty() && body.is_empty() {
                (String::new(), String::new())
            } else {
                let _permit = semaphore
                    .acquire()
                    .await
                    .map_err(|_| SoupIssuesError::ApiError("semaphore closed".to_string()))?;
                let response = api.complete(&title, &body).await?;
                split_translation(&response)
            };

            row.insert("titleJa".to_string(), title_ja);
            row.insert("bodyJa".to_string(), body_ja);

            let finished = done.fetch_add(1, Ordering::SeqCst) + 1;
            if finished % step == 0 || finished == total {
                progress.report(finished, total);
            }

            Ok::<CsvRow, SoupIssuesError>(row)
        }));
    }

    // Awaiting in spawn order restores input order regardless of which
    // completions finished first.
    let mut out = Vec::with_capacity(total);
    for handle in handles {
        out.push(handle.await??);
    }
    Ok(out)
}

/// Reads the input CSV, translates every row, and writes the output CSV.
/// Returns the number of rows translated.
pub async fn translate_file(
    config: &TranslateConfig,
    api: Arc<dyn CompletionApi>,
    progress: Arc<dyn ProgressSink>,
) -> Result<usize> {
    if !file_exists(&config.input) {
        return Err(SoupIssuesError::FileNotFound(config.input.clone()));
    }

    let parsed = read_csv_file(&config.input).await?;
    let headers = derive_output_headers(&parsed.headers, parsed.rows.first());

    let translated = translate_rows(parsed.rows, api, config.concurrency, progress).await?;

    let out = serialize_rows(&headers, &translated, config.write);
    tokio::fs::write(&config.output, out).await?;

    Ok(translated.len())
}
