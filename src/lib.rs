pub mod cli;
pub mod csv_processor;
pub mod github;
pub mod progress;
pub mod translation;
pub mod utils;

pub use csv_processor::{parse_csv, serialize_rows, CsvRow, CsvWriteOptions, Newline, ParsedCsv};
pub use github::{FetchRequest, GithubClient, IssueResponse, IssueRow};
pub use progress::{ConsoleProgress, NoProgress, ProgressSink};
pub use translation::{translate_file, AnthropicClient, CompletionApi};
pub use utils::{FetchConfig, Result, SoupIssuesError, TranslateConfig};
