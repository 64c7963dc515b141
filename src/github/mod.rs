pub mod client;
pub mod query;

pub use client::{
    page_count, write_issues_csv, FetchRequest, GithubClient, IssueResponse, IssueRow,
    ISSUE_HEADERS, MAX_RESULTS, PAGE_SIZE,
};
pub use query::build_search_query;
