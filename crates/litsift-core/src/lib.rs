use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("lexicon load failed: {0}")]
    LexiconLoad(String),
    #[error("extraction failed: {0}")]
    Extraction(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("export failed: {0}")]
    Export(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// `(token, count)` pairs, descending count, deterministic tie order.
pub type FrequencyRanking = Vec<(String, u64)>;

/// One scored document. Field names match the tabular export columns.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeResult {
    /// Best-effort registry identifier reconstructed from the file name.
    pub doi: String,
    /// Signed relevance: target-lexicon hits minus bycatch-lexicon hits.
    pub wordscore: i64,
    /// Most frequent surviving tokens across the whole document.
    pub frequency: FrequencyRanking,
    /// Most frequent research-design vocabulary hits.
    pub study_design: FrequencyRanking,
    /// Soft signals: `no_pages`, `empty_extraction`, `doi_unverified`,
    /// `extraction_failed`. Empty means a clean run.
    pub warnings: Vec<&'static str>,
}

impl ScrapeResult {
    /// Placeholder record for a document whose extraction failed; keeps
    /// batch output total (one record per input, always).
    pub fn degraded(doi: String, reason: &'static str) -> Self {
        Self {
            doi,
            wordscore: 0,
            frequency: Vec::new(),
            study_design: Vec::new(),
            warnings: vec![reason],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperMeta {
    pub doi: String,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub venue: Option<String>,
    pub authors: Vec<String>,
    pub cited_by_count: Option<u64>,
    pub pdf_url: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadReceipt {
    pub url: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// One unit of work, selected explicitly by the caller. There is no
/// runtime strategy lookup: callers construct the variant they mean.
#[derive(Debug, Clone)]
pub enum ScrapeRequest {
    /// Score a local PDF against the lexicons.
    PdfScore { path: PathBuf },
    /// Look up citation metadata for a DOI.
    MetadataFetch { doi: String },
    /// Fetch a PDF from a direct URL into a destination directory. With
    /// no `file_name` the URL's last path segment names the file.
    DownloadFetch {
        url: String,
        dest_dir: PathBuf,
        file_name: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub enum ScrapeOutput {
    Scored(ScrapeResult),
    Metadata(PaperMeta),
    Downloaded(DownloadReceipt),
}

#[async_trait::async_trait]
pub trait PageExtractor: Send + Sync {
    /// Ordered per-page text for one document. A page that yields no text
    /// extracts as an empty string; failing to open or parse the document
    /// at all is an error.
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}
