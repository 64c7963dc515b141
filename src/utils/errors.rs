use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoupIssuesError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),
}

pub type Result<T> = std::result::Result<T, SoupIssuesError>;

impl SoupIssuesError {
    /// Process exit code the CLI driver maps this error to.
    pub fn exit_code(&self) -> u8 {
        match self {
            SoupIssuesError::MissingApiKey(_) => 2,
            SoupIssuesError::FileNotFound(_) => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_condition() {
        assert_eq!(SoupIssuesError::MissingApiKey("X").exit_code(), 2);
        assert_eq!(SoupIssuesError::FileNotFound("a.csv".to_string()).exit_code(), 3);
        assert_eq!(SoupIssuesError::ApiError("boom".to_string()).exit_code(), 1);
    }
}
