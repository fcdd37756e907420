//! Lexicon store: the three screening vocabularies plus the normalizer's
//! exclusion lists.
//!
//! Notes:
//! - Every entry passes through `textprep::scrub` at load time, so entry
//!   representation always matches document representation (an entry
//!   written `Choice-Architecture` loads as the phrase
//!   `choice architecture`).
//! - Stores are immutable after construction; reloading means building a
//!   new store. Shared read-only access across tasks needs no locking.

use crate::textprep::scrub;
use crate::wordlists;
use litsift_core::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One named vocabulary, split at load into single-token entries and
/// multi-word phrases (the two matching paths differ).
#[derive(Debug, Clone)]
pub struct Lexicon {
    label: &'static str,
    singles: HashSet<String>,
    phrases: Vec<String>,
}

impl Lexicon {
    /// Build a vocabulary from raw entries; each entry is scrubbed, blanks
    /// drop out, duplicates collapse.
    pub fn from_terms<I, T>(label: &'static str, terms: I) -> Lexicon
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut singles = HashSet::new();
        let mut phrases = Vec::new();
        let mut seen_phrases = HashSet::new();
        for raw in terms {
            let entry = scrub(raw.as_ref());
            if entry.is_empty() {
                continue;
            }
            if entry.contains(' ') {
                if seen_phrases.insert(entry.clone()) {
                    phrases.push(entry);
                }
            } else {
                singles.insert(entry);
            }
        }
        Lexicon {
            label,
            singles,
            phrases,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn contains_single(&self, token: &str) -> bool {
        self.singles.contains(token)
    }

    /// Multi-word entries, in load order (the deterministic order of
    /// phrase matches in an overlap).
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.singles.len() + self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where each vocabulary comes from. `None` means the built-in list.
#[derive(Debug, Clone, Default)]
pub struct LexiconSources {
    pub target_file: Option<PathBuf>,
    pub bycatch_file: Option<PathBuf>,
    pub research_file: Option<PathBuf>,
    /// An empty target vocabulary is almost always a configuration
    /// mistake; loading fails unless the caller opts in.
    pub allow_empty_target: bool,
}

/// The three read-only screening vocabularies.
#[derive(Debug, Clone)]
pub struct LexiconStore {
    pub target: Lexicon,
    pub bycatch: Lexicon,
    pub research: Lexicon,
}

impl LexiconStore {
    /// Built-in screening vocabulary (prosocial-design literature triage).
    pub fn builtin() -> LexiconStore {
        LexiconStore {
            target: Lexicon::from_terms("target", wordlists::DEFAULT_TARGET_TERMS),
            bycatch: Lexicon::from_terms("bycatch", wordlists::DEFAULT_BYCATCH_TERMS),
            research: Lexicon::from_terms("research_design", wordlists::DEFAULT_RESEARCH_TERMS),
        }
    }

    /// Load with per-set file overrides; unset sources fall back to the
    /// built-in lists.
    pub fn load(sources: &LexiconSources) -> Result<LexiconStore> {
        let target = match &sources.target_file {
            Some(p) => Lexicon::from_terms("target", read_terms_file(p)?),
            None => Lexicon::from_terms("target", wordlists::DEFAULT_TARGET_TERMS),
        };
        let bycatch = match &sources.bycatch_file {
            Some(p) => Lexicon::from_terms("bycatch", read_terms_file(p)?),
            None => Lexicon::from_terms("bycatch", wordlists::DEFAULT_BYCATCH_TERMS),
        };
        let research = match &sources.research_file {
            Some(p) => Lexicon::from_terms("research_design", read_terms_file(p)?),
            None => Lexicon::from_terms("research_design", wordlists::DEFAULT_RESEARCH_TERMS),
        };
        if target.is_empty() && !sources.allow_empty_target {
            return Err(Error::LexiconLoad(
                "target lexicon is empty; pass allow_empty_target to proceed".to_string(),
            ));
        }
        // The opt-in covers the target set only.
        for lex in [&bycatch, &research] {
            if lex.is_empty() {
                return Err(Error::LexiconLoad(format!(
                    "{} lexicon is empty",
                    lex.label()
                )));
            }
        }
        Ok(LexiconStore {
            target,
            bycatch,
            research,
        })
    }
}

/// Stopword + personal-name exclusion sets for the normalizer.
#[derive(Debug, Clone)]
pub struct StopList {
    stopwords: HashSet<String>,
    names: HashSet<String>,
}

impl StopList {
    pub fn builtin() -> StopList {
        StopList {
            stopwords: wordlists::STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            names: wordlists::PERSONAL_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Built-in lists plus extra names from a listing file (bibliographies
    /// in a narrow field tend to repeat the same given names).
    pub fn with_names_file(path: &Path) -> Result<StopList> {
        let mut list = StopList::builtin();
        for entry in read_terms_file(path)? {
            let entry = scrub(&entry);
            if !entry.is_empty() {
                list.names.insert(entry);
            }
        }
        Ok(list)
    }

    /// A token survives only if it is in neither set.
    pub fn is_excluded(&self, token: &str) -> bool {
        self.stopwords.contains(token) || self.names.contains(token)
    }
}

/// Listing file format: one entry per line; blank lines and `#` comments
/// ignored.
fn read_terms_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::LexiconLoad(format!("{}: {e}", path.display())))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}
