use crate::csv_processor::Newline;
use crate::translation::DEFAULT_MODEL;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "soup-issues")]
#[command(about = "Export open GitHub issues to CSV and translate them to Japanese", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch open issues from GitHub search and write them to CSV
    Fetch(FetchArgs),
    /// Translate the title/body columns of a CSV file to Japanese
    Translate(TranslateArgs),
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Repository owner
    #[arg(long)]
    pub owner: String,

    /// Repository name
    #[arg(long)]
    pub repo: String,

    /// SOUP registry identifier stamped on every exported row
    #[arg(long = "soup-id")]
    pub soup_id: String,

    /// Project identifier stamped on every exported row
    #[arg(long = "project-id")]
    pub project_id: String,

    /// Maximum number of issues to export (the search API caps at 1000)
    #[arg(short = 'n', long = "count", default_value = "100")]
    pub count: usize,

    /// Label filter; may be repeated
    #[arg(short = 'l', long = "label")]
    pub labels: Vec<String>,

    /// Free-text version token matched against title and body
    #[arg(long = "version-filter")]
    pub version_filter: Option<String>,

    /// Output CSV path
    #[arg(short, long)]
    pub out: String,

    /// Line terminator for the output CSV
    #[arg(long, value_enum, default_value = "crlf")]
    pub newline: NewlineArg,

    /// Prefix the output with a UTF-8 byte-order mark
    #[arg(long)]
    pub bom: bool,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,
}

#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Input CSV path
    #[arg(short = 'i', long = "in")]
    pub input: String,

    /// Output CSV path
    #[arg(short = 'o', long = "out")]
    pub out: String,

    /// Maximum number of in-flight completion requests
    #[arg(short, long, default_value = "5")]
    pub concurrency: usize,

    /// Model identifier for the completion API
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature
    #[arg(short = 't', long = "temp", default_value = "0.2")]
    pub temp: f32,

    /// Line terminator for the output CSV
    #[arg(long, value_enum, default_value = "crlf")]
    pub newline: NewlineArg,

    /// Prefix the output with a UTF-8 byte-order mark
    #[arg(long)]
    pub bom: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NewlineArg {
    Lf,
    Crlf,
}

impl From<NewlineArg> for Newline {
    fn from(arg: NewlineArg) -> Self {
        match arg {
            NewlineArg::Lf => Newline::Lf,
            NewlineArg::Crlf => Newline::Crlf,
        }
    }
}
