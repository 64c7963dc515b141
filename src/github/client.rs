use super::query::build_search_query;
use crate::csv_processor::{write_csv_file, CsvRow, CsvWriteOptions};
use crate::utils::{Result, SoupIssuesError};
use futures_util::future::try_join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: usize = 100;
/// The search API refuses to page past the first 1000 matches.
pub const MAX_RESULTS: usize = 1000;

pub const ISSUE_HEADERS: [&str; 4] = ["soupId", "projectId", "title", "body"];

const SEARCH_URL: &str = "https://api.github.com/search/issues";
const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub soup_id: String,
    pub project_id: String,
    pub owner: String,
    pub repo: String,
    pub wanted_n: usize,
    pub labels: Vec<String>,
    pub version: Option<String>,
}

/// One issue flattened for CSV export. The correlation identifiers are
/// stamped from the request and constant across all rows of one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRow {
    pub soup_id: String,
    pub project_id: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssueResponse {
    /// API-reported total match count; may exceed `items.len()`.
    pub count: u64,
    /// The exact query string sent to the search endpoint.
    pub query: String,
    pub items: Vec<IssueRow>,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    total_count: u64,
    incomplete_results: bool,
    items: Vec<RawIssue>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    title: String,
    body: Option<String>,
}

/// Number of page requests needed for `wanted_n` results.
pub fn page_count(wanted_n: usize) -> usize {
    wanted_n.min(MAX_RESULTS).div_ceil(PAGE_SIZE)
}

pub struct GithubClient {
    client: Client,
    token: String,
    search_url: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Self {
        // GitHub rejects requests without a User-Agent.
        let client = Client::builder()
            .user_agent(concat!("soup-issues/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            token: token.into(),
            search_url: SEARCH_URL.to_string(),
        }
    }

    /// Fetches up to `wanted_n` open issues matching the request's filters.
    /// All pages are requested concurrently and reassembled in page order;
    /// any page failure fails the whole fetch.
    pub async fn fetch_issues(&self, request: &FetchRequest) -> Result<IssueResponse> {
        let query = build_search_query(
            &request.owner,
            &request.repo,
            &request.labels,
            request.version.as_deref(),
        );

        let pages = page_count(request.wanted_n);
        if pages == 0 {
            return Ok(IssueResponse {
                count: 0,
                query,
                items: Vec::new(),
            });
        }

        let requests = (1..=pages).map(|page| self.fetch_page(&query, page));
        let results = try_join_all(requests).await?;

        Ok(assemble_response(request, query, results))
    }

    async fn fetch_page(&self, query: &str, page: usize) -> Result<SearchPage> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("q", query.to_string()),
                ("per_page", PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ])
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SoupIssuesError::ApiError(format!(
                "search returned {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

/// Concatenates page items in page order, truncates to `wanted_n`, and stamps
/// the correlation identifiers. The first page's counters are authoritative.
fn assemble_response(
    request: &FetchRequest,
    query: String,
    pages: Vec<SearchPage>,
) -> IssueResponse {
    let first = &pages[0];
    if first.incomplete_results {
        tracing::warn!(query = %query, "GitHub reported incomplete results");
    }
    let count = first.total_count;

    let items = pages
        .into_iter()
        .flat_map(|page| page.items)
        .take(request.wanted_n)
        .map(|raw| IssueRow {
            soup_id: request.soup_id.clone(),
            project_id: request.project_id.clone(),
            title: raw.title,
            body: raw.body.unwrap_or_default(),
        })
        .collect();

    IssueResponse {
        count,
        query,
        items,
    }
}

fn issue_to_row(item: &IssueRow) -> CsvRow {
    CsvRow::from([
        ("soupId".to_string(), item.soup_id.clone()),
        ("projectId".to_string(), item.project_id.clone()),
        ("title".to_string(), item.title.clone()),
        ("body".to_string(), item.body.clone()),
    ])
}

/// Writes fetched issues to CSV. A caller-supplied header list overrides the
/// default `soupId,projectId,title,body` columns.
pub async fn write_issues_csv(
    path: &str,
    items: &[IssueRow],
    headers: Option<&[String]>,
    opts: CsvWriteOptions,
) -> Result<()> {
    let default_headers: Vec<String> = ISSUE_HEADERS.iter().map(|s| s.to_string()).collect();
    let headers = headers.unwrap_or(&default_headers);
    let rows: Vec<CsvRow> = items.iter().map(issue_to_row).collect();
    write_csv_file(path, headers, &rows, opts).await
}
