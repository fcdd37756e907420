//! Directory batch screening.
//!
//! Documents are independent; the only shared state is the read-only
//! screener behind an `Arc`. Work fans out over spawned tasks behind a
//! semaphore, and results come back in input (file-name) order so runs
//! are reproducible. One bad document never kills a batch unless the
//! caller asks for that via [`FailureMode::Fail`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use litsift_core::{Error, Result, ScrapeResult};
use serde::Serialize;
use tokio::sync::Semaphore;

use crate::doi::infer_doi;
use crate::Screener;

/// What to do when one document fails to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Emit a zero-score placeholder record and keep going (default).
    Degrade,
    /// Abort the whole batch on the first failure.
    Fail,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// True when every scanned document scored cleanly.
    pub ok: bool,
    pub scanned: usize,
    pub scored: usize,
    pub degraded: usize,
    /// One record per scanned document, in file-name order.
    pub results: Vec<ScrapeResult>,
    /// One entry per degraded document: file name plus cause.
    pub warnings: Vec<String>,
    pub timings_ms: BTreeMap<String, u128>,
}

/// Collect `*.pdf` files directly under `dir`, name-sorted
/// (case-insensitive) for reproducible batch order.
pub fn collect_pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| Error::InvalidInput(format!("cannot read {}: {e}", dir.display())))?;
    let mut out: Vec<PathBuf> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_pdf = path
            .extension()
            .and_then(|x| x.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            out.push(path);
        }
    }
    out.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    Ok(out)
}

/// Score every path, at most `max_parallel` documents in flight.
pub async fn screen_paths(
    screener: Arc<Screener>,
    paths: Vec<PathBuf>,
    max_parallel: usize,
    mode: FailureMode,
) -> Result<BatchSummary> {
    let max_parallel = max_parallel.clamp(1, 16);
    let semaphore = Arc::new(Semaphore::new(max_parallel));
    let t0 = Instant::now();

    let mut handles = Vec::with_capacity(paths.len());
    for path in &paths {
        let screener = screener.clone();
        let semaphore = semaphore.clone();
        let path = path.clone();
        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| Error::Extraction("batch semaphore closed".to_string()))?;
            screener.scrape(&path).await
        }));
    }

    let mut results = Vec::with_capacity(paths.len());
    let mut warnings = Vec::new();
    let mut degraded = 0usize;
    for (path, handle) in paths.iter().zip(handles) {
        let joined = handle
            .await
            .map_err(|e| Error::Extraction(format!("batch task join failed: {e}")));
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match joined.and_then(|r| r) {
            Ok(result) => results.push(result),
            Err(e) => match mode {
                FailureMode::Fail => return Err(e),
                FailureMode::Degrade => {
                    degraded += 1;
                    warnings.push(format!("{name}: {e}"));
                    results.push(ScrapeResult::degraded(
                        infer_doi(path).doi,
                        "extraction_failed",
                    ));
                }
            },
        }
    }

    let mut timings_ms = BTreeMap::new();
    timings_ms.insert("score".to_string(), t0.elapsed().as_millis());
    let scanned = results.len();
    Ok(BatchSummary {
        ok: degraded == 0,
        scanned,
        scored: scanned - degraded,
        degraded,
        results,
        warnings,
        timings_ms,
    })
}

/// Scan `dir` for PDFs and score them all.
pub async fn screen_directory(
    screener: Arc<Screener>,
    dir: &Path,
    max_parallel: usize,
    mode: FailureMode,
) -> Result<BatchSummary> {
    let t_total = Instant::now();
    let t_scan = Instant::now();
    let dir_owned = dir.to_path_buf();
    let paths = tokio::task::spawn_blocking(move || collect_pdf_files(&dir_owned))
        .await
        .map_err(|e| Error::Extraction(format!("scan join failed: {e}")))??;
    let scan_ms = t_scan.elapsed().as_millis();

    let mut summary = screen_paths(screener, paths, max_parallel, mode).await?;
    summary.timings_ms.insert("scan".to_string(), scan_ms);
    summary
        .timings_ms
        .insert("total".to_string(), t_total.elapsed().as_millis());
    Ok(summary)
}
