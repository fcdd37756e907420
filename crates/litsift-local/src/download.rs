//! Direct-URL PDF download with the dated naming convention.
//!
//! Saved files are named `{yymmdd}_{doi-with-slash-removed}.pdf` when a
//! DOI is known; identifier inference (see `doi`) reverses exactly that
//! convention. Downloads are bounded by an explicit byte cap and refuse
//! bodies that do not carry the PDF magic header.

use std::path::Path;

use litsift_core::{DownloadReceipt, Error, Result};

use crate::extract::bytes_look_like_pdf;

/// 50 MiB; scholarly PDFs over this are almost always scans.
pub const DEFAULT_MAX_PDF_BYTES: u64 = 50 * 1024 * 1024;

/// Compose the dated file name a download is stored under.
pub fn dated_file_name(stamp: &str, doi: &str) -> String {
    format!("{stamp}_{}.pdf", doi.replace('/', ""))
}

fn file_name_from_url(url: &url::Url) -> Option<String> {
    let name = url
        .path_segments()
        .and_then(|segments| segments.last())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;
    if name.to_ascii_lowercase().ends_with(".pdf") {
        Some(name)
    } else {
        Some(format!("{name}.pdf"))
    }
}

/// Download one PDF into `dest_dir`, creating the directory if needed.
///
/// Fails (never truncates) when the body exceeds `max_bytes`: a partial
/// PDF is useless to the scoring pipeline.
pub async fn download_pdf(
    http: &reqwest::Client,
    url: &str,
    dest_dir: &Path,
    file_name: Option<&str>,
    max_bytes: u64,
    timeout_ms: u64,
) -> Result<DownloadReceipt> {
    let parsed =
        url::Url::parse(url).map_err(|e| Error::InvalidInput(format!("bad url {url}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidInput(format!(
            "only http(s) urls are supported, got {}",
            parsed.scheme()
        )));
    }
    let name = match file_name {
        Some(n) => n.to_string(),
        None => file_name_from_url(&parsed).unwrap_or_else(|| "download.pdf".to_string()),
    };

    let resp = http
        .get(parsed)
        .timeout(std::time::Duration::from_millis(
            timeout_ms.clamp(1_000, 120_000),
        ))
        .send()
        .await
        .map_err(|e| Error::Fetch(e.to_string()))?;
    let status = resp.status().as_u16();
    if !resp.status().is_success() {
        return Err(Error::Fetch(format!("download failed: HTTP {status}")));
    }

    let max = max_bytes as usize;
    let mut bytes = Vec::new();
    let mut stream = resp.bytes_stream();
    use futures_util::StreamExt;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Fetch(e.to_string()))?;
        if bytes.len().saturating_add(chunk.len()) > max {
            return Err(Error::Fetch(format!(
                "pdf exceeds the {max_bytes} byte cap"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }

    if !bytes_look_like_pdf(&bytes) {
        return Err(Error::Fetch(format!(
            "response from {url} is not a PDF (missing %PDF- header)"
        )));
    }

    let path = dest_dir.join(name);
    let written = bytes.len() as u64;
    let dest = path.clone();
    tokio::task::spawn_blocking(move || -> Result<()> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Fetch(format!("mkdir failed for {}: {e}", parent.display())))?;
        }
        std::fs::write(&dest, &bytes)
            .map_err(|e| Error::Fetch(format!("write failed for {}: {e}", dest.display())))
    })
    .await
    .map_err(|e| Error::Fetch(format!("write join failed: {e}")))??;

    Ok(DownloadReceipt {
        url: url.to_string(),
        path,
        bytes: written,
    })
}
