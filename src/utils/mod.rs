pub mod config;
pub mod errors;

pub use config::{FetchConfig, TranslateConfig};
pub use errors::{Result, SoupIssuesError};
