//! Deterministic text normalization for lexicon matching.
//!
//! Note: everything here is matching-only and intentionally lossy. Display
//! text never goes through this module.

use crate::lexicon::StopList;
use std::collections::HashMap;

/// Tokens shorter than this are dropped as extraction noise (broken
/// hyphenation, column counters, stray ligature fragments).
const MIN_TOKEN_CHARS: usize = 2;

/// Normalize raw text into a lowercase, single-spaced, alphanumeric string.
///
/// - Unicode lowercase
/// - common Latin ligatures folded to their letter pairs (PDF extractors
///   emit `ﬁ`/`ﬂ` inside otherwise ordinary words)
/// - every run of non-alphanumeric characters becomes one space
/// - no leading/trailing space, never two spaces in a row
pub fn scrub(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_space = true;
    for ch in s.chars() {
        // Ligatures are alphabetic code points, so they would otherwise pass
        // through and split "finding" from "ﬁnding" at match time.
        let folded: &str = match ch {
            'ﬁ' => "fi",
            'ﬂ' => "fl",
            'ﬀ' => "ff",
            'ﬃ' => "ffi",
            'ﬄ' => "ffl",
            'ﬅ' | 'ﬆ' => "st",
            _ => "",
        };
        if !folded.is_empty() {
            out.push_str(folded);
            last_space = false;
            continue;
        }
        if ch.is_alphanumeric() {
            // Lowercasing can expand to multiple code points and introduce
            // combining marks (e.g. İ); keep only the alphanumeric ones so
            // scrubbing its own output changes nothing.
            for lc in ch.to_lowercase() {
                if lc.is_alphanumeric() {
                    out.push(lc);
                }
            }
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// One document's normalized token multiset plus the cleaned full text.
///
/// Keeps three views of the same content:
/// - `terms`: surviving tokens with occurrence counts, in first-seen order
///   (the deterministic tie-break for frequency rankings);
/// - `index`: membership lookups for single-word lexicon entries;
/// - `clean_text`: the pre-filter scrubbed text, for phrase entries that a
///   token stream alone cannot match.
#[derive(Debug, Clone)]
pub struct TokenBag {
    clean_text: String,
    terms: Vec<(String, u64)>,
    index: HashMap<String, usize>,
    total: u64,
}

impl TokenBag {
    /// Build from ordered per-page text. Failed pages arrive as empty
    /// strings and contribute nothing.
    pub fn from_pages(pages: &[String], stops: &StopList) -> TokenBag {
        Self::from_text(&pages.join("\n"), stops)
    }

    pub fn from_text(text: &str, stops: &StopList) -> TokenBag {
        let clean_text = scrub(text);
        let mut terms: Vec<(String, u64)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut total = 0u64;
        for token in clean_text.split(' ').filter(|t| !t.is_empty()) {
            if token.chars().count() < MIN_TOKEN_CHARS {
                continue;
            }
            if stops.is_excluded(token) {
                continue;
            }
            total += 1;
            match index.get(token) {
                Some(&i) => terms[i].1 += 1,
                None => {
                    index.insert(token.to_string(), terms.len());
                    terms.push((token.to_string(), 1));
                }
            }
        }
        TokenBag {
            clean_text,
            terms,
            index,
            total,
        }
    }

    /// Scrubbed full text, before stopword/name filtering. Phrase lookups
    /// run against this, so phrases containing stopwords still match.
    pub fn clean_text(&self) -> &str {
        &self.clean_text
    }

    /// Surviving tokens with counts, in first-seen order.
    pub fn terms(&self) -> &[(String, u64)] {
        &self.terms
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    pub fn term_count(&self, term: &str) -> u64 {
        self.index.get(term).map_or(0, |&i| self.terms[i].1)
    }

    /// Word-boundary-delimited containment of a multi-word entry.
    /// "asocial median" does not contain the phrase "social media".
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        self.phrase_count(phrase) > 0
    }

    /// Non-overlapping boundary-checked occurrences of `phrase` in the
    /// cleaned text. The boundary test reads single bytes, which is safe
    /// here: the only separator `scrub` emits is ASCII space.
    pub fn phrase_count(&self, phrase: &str) -> u64 {
        if phrase.is_empty() {
            return 0;
        }
        let hay = self.clean_text.as_str();
        let mut n = 0u64;
        for (i, m) in hay.match_indices(phrase) {
            let before_ok = i == 0 || hay.as_bytes()[i - 1] == b' ';
            let end = i + m.len();
            let after_ok = end == hay.len() || hay.as_bytes()[end] == b' ';
            if before_ok && after_ok {
                n += 1;
            }
        }
        n
    }

    pub fn distinct_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn total_tokens(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
