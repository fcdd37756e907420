//! PDF page-text extraction.
//!
//! Two engines: `lopdf` is primary and preserves page boundaries;
//! `pdf-extract` is a whole-document fallback for files the primary
//! cannot load or reads as blank (it does not preserve pages, so its
//! output comes back as a single page). Extraction quality varies by
//! PDF (text layer vs scanned images); blank output is a valid result
//! here and the caller decides how to flag it.

use std::path::Path;

use litsift_core::{Error, PageExtractor, Result};

fn env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn has_any_text(s: &str) -> bool {
    s.chars().any(|c| !c.is_whitespace())
}

/// Whether the fallback engine may run when the primary yields nothing.
///
/// Controls:
/// - LITSIFT_PDF_FALLBACK=auto | off (default: auto)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfFallback {
    Auto,
    Off,
}

impl PdfFallback {
    pub fn from_env() -> Self {
        match env("LITSIFT_PDF_FALLBACK").as_deref() {
            Some("off") => PdfFallback::Off,
            _ => PdfFallback::Auto,
        }
    }
}

/// Best-effort sniff for PDF bytes (magic header).
pub fn bytes_look_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}

/// Extract per-page text from an in-memory PDF body.
///
/// One unreadable page becomes an empty string rather than failing the
/// document. Encrypted documents are refused outright; neither engine
/// takes a password.
pub fn pdf_pages_from_bytes(bytes: &[u8], fallback: PdfFallback) -> Result<Vec<String>> {
    if !bytes_look_like_pdf(bytes) {
        return Err(Error::Extraction(
            "not a PDF (missing %PDF- header)".to_string(),
        ));
    }
    match lopdf::Document::load_mem(bytes) {
        Ok(doc) => {
            if doc.is_encrypted() {
                return Err(Error::Extraction(
                    "encrypted PDF (passwords not supported)".to_string(),
                ));
            }
            let mut pages = Vec::new();
            for (page_num, _page_id) in doc.get_pages() {
                // extract_text joins the requested pages; one page at a
                // time keeps boundaries.
                pages.push(doc.extract_text(&[page_num]).unwrap_or_default());
            }
            if pages.iter().any(|p| has_any_text(p)) || fallback == PdfFallback::Off {
                return Ok(pages);
            }
            match whole_document_text(bytes) {
                Some(text) => Ok(vec![text]),
                None => Ok(pages),
            }
        }
        Err(e) => {
            if fallback == PdfFallback::Auto {
                if let Some(text) = whole_document_text(bytes) {
                    return Ok(vec![text]);
                }
            }
            Err(Error::Extraction(format!("pdf load failed: {e}")))
        }
    }
}

// `pdf-extract` is pure-Rust and works from memory; page boundaries are
// lost, so a hit comes back as one page.
fn whole_document_text(bytes: &[u8]) -> Option<String> {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) if has_any_text(&text) => Some(text),
        _ => None,
    }
}

/// Filesystem-backed [`PageExtractor`] over the dual-engine pipeline.
#[derive(Debug, Clone, Copy)]
pub struct LocalExtractor {
    fallback: PdfFallback,
}

impl LocalExtractor {
    pub fn new() -> Self {
        Self {
            fallback: PdfFallback::from_env(),
        }
    }

    pub fn with_fallback(fallback: PdfFallback) -> Self {
        Self { fallback }
    }
}

impl Default for LocalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PageExtractor for LocalExtractor {
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let path = path.to_path_buf();
        let fallback = self.fallback;
        tokio::task::spawn_blocking(move || {
            let bytes = std::fs::read(&path).map_err(|e| {
                Error::Extraction(format!("read failed for {}: {e}", path.display()))
            })?;
            pdf_pages_from_bytes(&bytes, fallback)
        })
        .await
        .map_err(|e| Error::Extraction(format!("extraction join failed: {e}")))?
    }
}

/// Build a minimal text-layer PDF, one page per entry.
///
/// Used by the doctor self-test (write a known-good document through the
/// extraction pipeline and check the text survives) and by test fixtures.
pub fn synthetic_pdf(pages: &[&str]) -> Result<Vec<u8>> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let encoded = content
            .encode()
            .map_err(|e| Error::Extraction(format!("content encode failed: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }
    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| Error::Extraction(format!("pdf save failed: {e}")))?;
    Ok(buf)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sniff_accepts_pdf_magic_only() {
        assert!(bytes_look_like_pdf(b"%PDF-1.5\n..."));
        assert!(!bytes_look_like_pdf(b"<html><body>not found</body></html>"));
        assert!(!bytes_look_like_pdf(b""));
    }

    #[test]
    fn fixture_pdf_extracts_per_page() {
        let bytes = test_pdf::pdf_bytes(&["alpha page one", "beta page two"]);
        let pages = pdf_pages_from_bytes(&bytes, PdfFallback::Off).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("alpha page one"));
        assert!(pages[1].contains("beta page two"));
    }

    #[test]
    fn non_pdf_bytes_are_refused() {
        let err = pdf_pages_from_bytes(b"plain text file", PdfFallback::Auto).unwrap_err();
        assert!(err.to_string().contains("not a PDF"));
    }

    #[test]
    fn truncated_pdf_fails_with_load_error_when_fallback_off() {
        // Valid magic, garbage body: primary cannot load, fallback is off.
        let err =
            pdf_pages_from_bytes(b"%PDF-1.5 then nothing useful", PdfFallback::Off).unwrap_err();
        assert!(err.to_string().contains("extraction failed"));
    }

    #[tokio::test]
    async fn extractor_reads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.pdf");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&test_pdf::pdf_bytes(&["nudge intervention study"]))
            .unwrap();

        let pages = LocalExtractor::with_fallback(PdfFallback::Off)
            .extract_pages(&path)
            .await
            .unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("nudge intervention study"));
    }

    #[tokio::test]
    async fn missing_file_is_an_extraction_error() {
        let err = LocalExtractor::new()
            .extract_pages(Path::new("/nonexistent/paper.pdf"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("read failed"));
    }
}
