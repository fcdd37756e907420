//! Best-effort DOI recovery from the download naming convention.
//!
//! Downloads are stored as `{yymmdd}_{doi-with-slash-removed}.pdf`, so the
//! stem carries a 6-char date, an optional separator, then the DOI body
//! with its `/` dropped. Inference reverses that: drop the date, put the
//! slash back after the registrant prefix. The result is a filename
//! heuristic, never a validated identifier.

use std::path::Path;

/// A DOI guessed from a filename. `verified` only says the string has
/// registry shape (`10.` prefix, non-empty suffix), not that it resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredDoi {
    pub doi: String,
    pub verified: bool,
}

/// Recover a DOI from `path` per the download naming convention.
///
/// Never fails: filenames that do not follow the convention yield
/// whatever the slicing produces, flagged `verified: false`.
pub fn infer_doi(path: &Path) -> InferredDoi {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let doi = reconstruct(&stem);
    let verified = looks_like_doi(&doi);
    InferredDoi { doi, verified }
}

// Char-based throughout: stems can carry multi-byte characters and byte
// slicing would panic mid-codepoint.
fn reconstruct(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() <= 6 {
        return String::new();
    }
    let mut rest = &chars[6..];
    if matches!(rest.first(), Some('_') | Some('-')) {
        rest = &rest[1..];
    }
    if rest.len() <= 7 {
        return rest.iter().collect();
    }
    let (prefix, suffix) = rest.split_at(7);
    let mut out: String = prefix.iter().collect();
    out.push('/');
    out.extend(suffix.iter());
    out
}

fn looks_like_doi(candidate: &str) -> bool {
    match candidate.split_once('/') {
        Some((prefix, suffix)) => {
            prefix.starts_with("10.") && prefix.len() > 3 && !suffix.is_empty()
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn infer(name: &str) -> InferredDoi {
        infer_doi(&PathBuf::from(name))
    }

    #[test]
    fn recovers_doi_from_dated_file_name() {
        let got = infer("210615_10.1000example.pdf");
        assert_eq!(got.doi, "10.1000/example");
        assert!(got.verified);
    }

    #[test]
    fn dash_separator_is_accepted() {
        assert_eq!(infer("210615-10.1000example.pdf").doi, "10.1000/example");
    }

    #[test]
    fn directory_components_are_ignored() {
        let got = infer_doi(&PathBuf::from("papers/batch/210615_10.1000example.pdf"));
        assert_eq!(got.doi, "10.1000/example");
    }

    #[test]
    fn nonconforming_names_come_back_unverified() {
        let got = infer("interesting-paper.pdf");
        assert!(!got.verified);

        let got = infer("210615_notadoi.pdf");
        assert!(!got.verified);
    }

    #[test]
    fn short_stems_yield_empty_unverified() {
        let got = infer("ab.pdf");
        assert_eq!(got.doi, "");
        assert!(!got.verified);

        let got = infer("123456.pdf");
        assert_eq!(got.doi, "");
        assert!(!got.verified);
    }

    #[test]
    fn seven_or_fewer_remaining_chars_get_no_separator() {
        let got = infer("210615_10.1000.pdf");
        assert_eq!(got.doi, "10.1000");
        assert!(!got.verified);
    }

    proptest! {
        #[test]
        fn never_panics_on_arbitrary_names(name in "\\PC{0,40}") {
            let _ = infer_doi(&PathBuf::from(format!("{name}.pdf")));
        }

        #[test]
        fn four_digit_registrants_round_trip(
            registrant in "[0-9]{4}",
            suffix in "[a-z0-9]{1,16}",
        ) {
            let doi = format!("10.{registrant}/{suffix}");
            let file = format!("210615_10.{registrant}{suffix}.pdf");
            let got = infer(&file);
            prop_assert_eq!(got.doi, doi);
            prop_assert!(got.verified);
        }
    }
}
