//! Tabular export of batch results.
//!
//! Column contract: `doi,wordscore,frequency,study_design`, in that
//! order; downstream spreadsheets key on the names. Ranking cells hold
//! compact JSON arrays (`[["term",3],...]`) so they stay machine-parseable
//! inside a CSV cell. An empty batch still gets the header row.

use std::path::Path;

use litsift_core::{Error, FrequencyRanking, Result, ScrapeResult};

pub const CSV_HEADER: [&str; 4] = ["doi", "wordscore", "frequency", "study_design"];

fn ranking_cell(ranking: &FrequencyRanking) -> Result<String> {
    serde_json::to_string(ranking).map_err(|e| Error::Export(e.to_string()))
}

/// Render results as CSV text.
pub fn csv_string(results: &[ScrapeResult]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)
        .map_err(|e| Error::Export(e.to_string()))?;
    for r in results {
        let wordscore = r.wordscore.to_string();
        let frequency = ranking_cell(&r.frequency)?;
        let study_design = ranking_cell(&r.study_design)?;
        wtr.write_record([
            r.doi.as_str(),
            wordscore.as_str(),
            frequency.as_str(),
            study_design.as_str(),
        ])
        .map_err(|e| Error::Export(e.to_string()))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))
}

/// Write results as CSV, creating parent directories as needed.
pub fn write_csv(path: &Path, results: &[ScrapeResult]) -> Result<()> {
    let csv = csv_string(results)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::Export(format!("mkdir failed for {}: {e}", parent.display())))?;
    }
    std::fs::write(path, csv)
        .map_err(|e| Error::Export(format!("write failed for {}: {e}", path.display())))
}
