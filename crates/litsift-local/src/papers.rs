//! Paper metadata lookup (bounded) for screening workflows.
//!
//! Provider: OpenAlex single-work endpoint (public, no key):
//! https://api.openalex.org/works/doi:{doi}
//!
//! Notes:
//! - All lookups carry an explicit timeout; no retries.
//! - The `select` field set keeps responses lean (no full text, no
//!   inverted abstract).
//! - No secrets involved; the endpoint can be overridden via
//!   LITSIFT_OPENALEX_ENDPOINT for hermetic tests.

use std::time::Duration;

use litsift_core::{Error, PaperMeta, Result};
use serde::Deserialize;

fn normalize_ws(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn openalex_endpoint_from_env() -> Option<String> {
    std::env::var("LITSIFT_OPENALEX_ENDPOINT")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Resolved OpenAlex base endpoint (override honored).
pub fn endpoint() -> String {
    openalex_endpoint_from_env().unwrap_or_else(|| "https://api.openalex.org".to_string())
}

/// Strip the decorations a DOI arrives with in the wild
/// (`https://doi.org/...` URLs, `doi:` prefixes, stray whitespace).
pub fn normalize_doi(raw: &str) -> String {
    let s = raw.trim();
    let s = s.strip_prefix("https://doi.org/").unwrap_or(s);
    let s = s.strip_prefix("http://doi.org/").unwrap_or(s);
    let s = s.strip_prefix("doi:").unwrap_or(s);
    s.trim().to_string()
}

/// Look up one work by DOI and map it to [`PaperMeta`].
pub async fn fetch_metadata(
    http: &reqwest::Client,
    doi: &str,
    timeout_ms: u64,
) -> Result<PaperMeta> {
    fetch_metadata_from(http, &endpoint(), doi, timeout_ms).await
}

// Accepts either a base URL or one with a trailing slash.
pub(crate) async fn fetch_metadata_from(
    http: &reqwest::Client,
    base_endpoint: &str,
    doi: &str,
    timeout_ms: u64,
) -> Result<PaperMeta> {
    let doi = normalize_doi(doi);
    if doi.is_empty() {
        return Err(Error::InvalidInput("doi must be non-empty".to_string()));
    }
    let base = base_endpoint.trim().trim_end_matches('/');
    let mut url = reqwest::Url::parse(&format!("{base}/works/doi:{doi}"))
        .map_err(|e| Error::Fetch(e.to_string()))?;
    url.query_pairs_mut().append_pair(
        "select",
        "display_name,publication_year,host_venue,primary_location,authorships,doi,cited_by_count,open_access",
    );

    #[derive(Debug, Deserialize)]
    struct Work {
        display_name: Option<String>,
        publication_year: Option<i32>,
        doi: Option<String>,
        cited_by_count: Option<u64>,
        host_venue: Option<HostVenue>,
        primary_location: Option<Location>,
        authorships: Option<Vec<Authorship>>,
        open_access: Option<OpenAccess>,
    }
    #[derive(Debug, Deserialize)]
    struct HostVenue {
        display_name: Option<String>,
    }
    #[derive(Debug, Deserialize)]
    struct Location {
        pdf_url: Option<String>,
    }
    #[derive(Debug, Deserialize)]
    struct Authorship {
        author: Option<AuthorObj>,
    }
    #[derive(Debug, Deserialize)]
    struct AuthorObj {
        display_name: Option<String>,
    }
    #[derive(Debug, Deserialize)]
    struct OpenAccess {
        oa_url: Option<String>,
    }

    let resp = http
        .get(url)
        .timeout(Duration::from_millis(timeout_ms.clamp(1_000, 30_000)))
        .send()
        .await
        .map_err(|e| Error::Fetch(e.to_string()))?;
    let status = resp.status().as_u16();
    if status == 404 {
        return Err(Error::Fetch(format!("doi not found: {doi}")));
    }
    if !resp.status().is_success() {
        return Err(Error::Fetch(format!(
            "metadata lookup failed: HTTP {status}"
        )));
    }
    let work: Work = resp.json().await.map_err(|e| Error::Fetch(e.to_string()))?;

    let title = work
        .display_name
        .map(|s| normalize_ws(&s))
        .filter(|s| !s.is_empty());
    let authors = work
        .authorships
        .unwrap_or_default()
        .into_iter()
        .filter_map(|a| a.author.and_then(|x| x.display_name))
        .map(|s| normalize_ws(&s))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();
    let venue = work
        .host_venue
        .and_then(|v| v.display_name)
        .map(|s| normalize_ws(&s))
        .filter(|s| !s.is_empty());
    // Prefer the registered PDF location; fall back to the OA URL, which
    // sometimes points at a landing page instead of a file.
    let pdf_url = work
        .primary_location
        .and_then(|l| l.pdf_url)
        .or(work.open_access.and_then(|o| o.oa_url))
        .filter(|s| !s.trim().is_empty());
    // OpenAlex echoes DOIs as https://doi.org/ URLs.
    let doi = work
        .doi
        .map(|s| normalize_doi(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or(doi);

    Ok(PaperMeta {
        doi,
        title,
        year: work.publication_year,
        venue,
        authors,
        cited_by_count: work.cited_by_count,
        pdf_url,
        source: "openalex".to_string(),
    })
}
