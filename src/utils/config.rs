use crate::csv_processor::CsvWriteOptions;
use crate::github::FetchRequest;

/// Environment variable holding the completion API key.
pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Resolved settings for one `translate` run. Built once at startup from CLI
/// arguments and the environment; no component reads ambient state directly.
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub input: String,
    pub output: String,
    pub concurrency: usize,
    pub model: String,
    pub temperature: f32,
    pub api_key: String,
    pub write: CsvWriteOptions,
}

/// Resolved settings for one `fetch` run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub token: String,
    pub request: FetchRequest,
    pub output: String,
    pub write: CsvWriteOptions,
}
