/// Builds a GitHub issue-search query string. Terms are space-joined in fixed
/// order: repository scope, issue/state filters, one quoted `label:` term per
/// non-empty label, the title/body scope, then the free-text version token.
/// Blank segments are omitted entirely.
pub fn build_search_query(
    owner: &str,
    repo: &str,
    labels: &[String],
    version: Option<&str>,
) -> String {
    let mut terms = vec![
        format!("repo:{}/{}", owner, repo),
        "is:issue".to_string(),
        "state:open".to_string(),
    ];

    for label in labels {
        let label = label.trim();
        if !label.is_empty() {
            terms.push(format!("label:\"{}\"", label));
        }
    }

    terms.push("in:title,body".to_string());

    if let Some(version) = version {
        let version = version.trim();
        if !version.is_empty() {
            terms.push(version.to_string());
        }
    }

    terms.join(" ")
}
