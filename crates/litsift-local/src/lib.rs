use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use litsift_core::{Error, PageExtractor, Result, ScrapeOutput, ScrapeRequest, ScrapeResult};

pub mod batch;
pub mod doi;
pub mod download;
pub mod export;
pub mod extract;
pub mod lexicon;
pub mod papers;
pub mod score;
pub mod textprep;
mod wordlists;

use crate::doi::{infer_doi, InferredDoi};
use crate::lexicon::{LexiconSources, LexiconStore, StopList};
use crate::score::{overlap, top_overlap, top_terms, wordscore};
use crate::textprep::TokenBag;

/// Entries kept in the whole-document frequency ranking.
pub const TOP_TERMS: usize = 5;
/// Entries kept in the research-design ranking.
pub const TOP_DESIGN_TERMS: usize = 3;

const META_TIMEOUT_MS: u64 = 10_000;
const DOWNLOAD_TIMEOUT_MS: u64 = 60_000;

/// Shared HTTP client with safety-default timeouts; per-request timeouts
/// still override these.
pub fn default_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("litsift/0.1")
        .redirect(reqwest::redirect::Policy::limited(10))
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| Error::Fetch(e.to_string()))
}

/// The scoring engine: three lexicons, a stop list, and a page extractor.
///
/// Construction is the only fallible moment (lexicon load); after that the
/// screener is read-only and safe to share across tasks. No state survives
/// a single `scrape` call.
pub struct Screener {
    lexicons: LexiconStore,
    stoplist: StopList,
    extractor: Arc<dyn PageExtractor>,
}

impl Screener {
    pub fn new(
        lexicons: LexiconStore,
        stoplist: StopList,
        extractor: Arc<dyn PageExtractor>,
    ) -> Self {
        Self {
            lexicons,
            stoplist,
            extractor,
        }
    }

    /// Built-in lexicons and stop lists.
    pub fn builtin(extractor: Arc<dyn PageExtractor>) -> Self {
        Self::new(LexiconStore::builtin(), StopList::builtin(), extractor)
    }

    /// Load lexicons (and optionally a names file) from disk. Fails fast:
    /// a screener with a broken lexicon must not be constructed.
    pub fn from_sources(
        sources: &LexiconSources,
        names_file: Option<&Path>,
        extractor: Arc<dyn PageExtractor>,
    ) -> Result<Self> {
        let lexicons = LexiconStore::load(sources)?;
        let stoplist = match names_file {
            Some(path) => StopList::with_names_file(path)?,
            None => StopList::builtin(),
        };
        Ok(Self::new(lexicons, stoplist, extractor))
    }

    /// Score one document: infer its identifier, extract page text, score.
    pub async fn scrape(&self, path: &Path) -> Result<ScrapeResult> {
        let inferred = infer_doi(path);
        let pages = self.extractor.extract_pages(path).await?;
        Ok(self.score_pages(inferred, &pages))
    }

    /// Pure scoring over already-extracted pages.
    pub fn score_pages(&self, id: InferredDoi, pages: &[String]) -> ScrapeResult {
        let mut warnings: Vec<&'static str> = Vec::new();
        if !id.verified {
            warnings.push("doi_unverified");
        }
        if pages.is_empty() {
            warnings.push("no_pages");
            return ScrapeResult {
                doi: id.doi,
                wordscore: 0,
                frequency: Vec::new(),
                study_design: Vec::new(),
                warnings,
            };
        }

        let bag = TokenBag::from_pages(pages, &self.stoplist);
        if bag.is_empty() {
            warnings.push("empty_extraction");
        }
        let target = overlap(&self.lexicons.target, &bag);
        let bycatch = overlap(&self.lexicons.bycatch, &bag);
        let research = overlap(&self.lexicons.research, &bag);
        ScrapeResult {
            doi: id.doi,
            wordscore: wordscore(&target, &bycatch),
            frequency: top_terms(&bag, TOP_TERMS),
            study_design: top_overlap(&research, TOP_DESIGN_TERMS),
            warnings,
        }
    }
}

/// Dispatch over the scrape strategies. Callers construct the variant
/// they mean; there is no runtime strategy registry.
pub struct Pipeline {
    screener: Arc<Screener>,
    http: reqwest::Client,
}

impl Pipeline {
    pub fn new(screener: Arc<Screener>) -> Result<Self> {
        Ok(Self {
            screener,
            http: default_client()?,
        })
    }

    pub fn with_client(screener: Arc<Screener>, http: reqwest::Client) -> Self {
        Self { screener, http }
    }

    pub fn screener(&self) -> &Arc<Screener> {
        &self.screener
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub async fn run(&self, req: ScrapeRequest) -> Result<ScrapeOutput> {
        match req {
            ScrapeRequest::PdfScore { path } => {
                Ok(ScrapeOutput::Scored(self.screener.scrape(&path).await?))
            }
            ScrapeRequest::MetadataFetch { doi } => Ok(ScrapeOutput::Metadata(
                papers::fetch_metadata(&self.http, &doi, META_TIMEOUT_MS).await?,
            )),
            ScrapeRequest::DownloadFetch {
                url,
                dest_dir,
                file_name,
            } => Ok(ScrapeOutput::Downloaded(
                download::download_pdf(
                    &self.http,
                    &url,
                    &dest_dir,
                    file_name.as_deref(),
                    download::DEFAULT_MAX_PDF_BYTES,
                    DOWNLOAD_TIMEOUT_MS,
                )
                .await?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use std::path::PathBuf;

    struct FakePages(Vec<String>);

    #[async_trait::async_trait]
    impl PageExtractor for FakePages {
        async fn extract_pages(&self, _path: &Path) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    fn fake(pages: &[&str]) -> Arc<dyn PageExtractor> {
        Arc::new(FakePages(pages.iter().map(|p| p.to_string()).collect()))
    }

    fn tiny_store() -> LexiconStore {
        LexiconStore {
            target: Lexicon::from_terms("target", ["design", "nudge", "user"]),
            bycatch: Lexicon::from_terms("bycatch", ["mental", "health"]),
            research: Lexicon::from_terms("research", ["study"]),
        }
    }

    #[tokio::test]
    async fn end_to_end_scoring_without_stemming() {
        let screener = Screener::new(
            tiny_store(),
            StopList::builtin(),
            fake(&["Design nudges for users", "mental health study"]),
        );
        let result = screener
            .scrape(&PathBuf::from("210615_10.1000example.pdf"))
            .await
            .unwrap();

        assert_eq!(result.doi, "10.1000/example");
        // Only "design" hits the target list: "nudges" and "users" are
        // plural forms and exact matching does not stem them.
        assert_eq!(result.wordscore, 1 - 2);
        assert_eq!(result.study_design, vec![("study".to_string(), 1)]);
        assert_eq!(
            result.frequency,
            vec![
                ("design".to_string(), 1),
                ("nudges".to_string(), 1),
                ("users".to_string(), 1),
                ("mental".to_string(), 1),
                ("health".to_string(), 1),
            ]
        );
        assert!(result.warnings.is_empty());
    }

    #[tokio::test]
    async fn builtin_lexicons_match_phrases_through_clean_text() {
        let screener = Screener::builtin(fake(&["Choice architecture and social media nudges."]));
        let result = screener
            .scrape(&PathBuf::from("210615_10.1000example.pdf"))
            .await
            .unwrap();

        // Two phrase hits ("choice architecture", "social media"); the
        // plural token "nudges" matches nothing.
        assert_eq!(result.wordscore, 2);
        assert_eq!(
            result.study_design,
            vec![("social media".to_string(), 1)]
        );
        assert_eq!(result.frequency.len(), TOP_TERMS);
    }

    #[tokio::test]
    async fn zero_pages_scores_zero_with_empty_rankings() {
        let screener = Screener::builtin(fake(&[]));
        let result = screener
            .scrape(&PathBuf::from("unconventional-name.pdf"))
            .await
            .unwrap();

        assert_eq!(result.wordscore, 0);
        assert!(result.frequency.is_empty());
        assert!(result.study_design.is_empty());
        assert_eq!(result.warnings, vec!["doi_unverified", "no_pages"]);
    }

    #[tokio::test]
    async fn blank_pages_are_flagged_not_dropped() {
        let screener = Screener::builtin(fake(&["", "   "]));
        let result = screener
            .scrape(&PathBuf::from("210615_10.1000example.pdf"))
            .await
            .unwrap();

        assert_eq!(result.wordscore, 0);
        assert!(result.frequency.is_empty());
        assert_eq!(result.warnings, vec!["empty_extraction"]);
    }

    #[tokio::test]
    async fn pipeline_dispatches_pdf_score_requests() {
        let screener = Arc::new(Screener::new(
            tiny_store(),
            StopList::builtin(),
            fake(&["nudge study design"]),
        ));
        let pipeline = Pipeline::new(screener).unwrap();

        let out = pipeline
            .run(ScrapeRequest::PdfScore {
                path: PathBuf::from("210615_10.1000example.pdf"),
            })
            .await
            .unwrap();
        match out {
            ScrapeOutput::Scored(r) => {
                assert_eq!(r.doi, "10.1000/example");
                assert_eq!(r.wordscore, 2);
            }
            other => panic!("expected a scored result, got {other:?}"),
        }
    }
}
