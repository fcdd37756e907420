//! Lexicon-overlap scoring and frequency rankings.
//!
//! Matching has two paths:
//! - single-word entries test membership in the filtered token set;
//! - multi-word entries scan the cleaned full text with word boundaries
//!   (a token stream alone cannot see phrases).
//!
//! No stemming on either path: `nudges` never matches `nudge`. The score
//! rewards distinct vocabulary hits, so occurrence counts feed the
//! rankings but not the score itself.

use crate::lexicon::Lexicon;
use crate::textprep::TokenBag;
use litsift_core::FrequencyRanking;

/// Entries of one lexicon found in one document, with occurrence counts.
/// Order is deterministic: token matches in the document's first-seen
/// order, then phrase matches in lexicon load order.
#[derive(Debug, Clone)]
pub struct LexiconOverlap {
    pub matched: Vec<(String, u64)>,
}

impl LexiconOverlap {
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

pub fn overlap(lexicon: &Lexicon, bag: &TokenBag) -> LexiconOverlap {
    let mut matched = Vec::new();
    for (term, count) in bag.terms() {
        if lexicon.contains_single(term) {
            matched.push((term.clone(), *count));
        }
    }
    for phrase in lexicon.phrases() {
        let n = bag.phrase_count(phrase);
        if n > 0 {
            matched.push((phrase.clone(), n));
        }
    }
    LexiconOverlap { matched }
}

/// Signed relevance: distinct target hits minus distinct bycatch hits.
/// Negative, zero, and positive are all meaningful; nothing clamps.
pub fn wordscore(target: &LexiconOverlap, bycatch: &LexiconOverlap) -> i64 {
    target.len() as i64 - bycatch.len() as i64
}

/// Top `n` document tokens by occurrence count. The input is in
/// first-seen order and the sort is stable, so ties keep encounter order.
pub fn top_terms(bag: &TokenBag, n: usize) -> FrequencyRanking {
    rank(bag.terms().to_vec(), n)
}

/// Top `n` overlap entries by occurrence count; same tie rule.
pub fn top_overlap(overlap: &LexiconOverlap, n: usize) -> FrequencyRanking {
    rank(overlap.matched.clone(), n)
}

fn rank(mut pairs: Vec<(String, u64)>, n: usize) -> FrequencyRanking {
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs.truncate(n);
    pairs
}
