//! Query text handling: tokenization, stop words, keyword extraction.

use std::collections::HashSet;

/// Longest keyword phrase extracted from a query.
pub const MAX_PHRASE_TERMS: usize = 3;

/// Lowercase alphanumeric tokens with stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    words(text).filter(|w| !is_stop_word(w)).collect()
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

/// Query keywords: every non-stop-word term plus contiguous phrases of up to
/// [`MAX_PHRASE_TERMS`] terms. Phrases never span a stop word. Longest first
/// within each run, deduplicated.
pub fn keywords(query: &str) -> Vec<String> {
    let mut runs: Vec<Vec<String>> = vec![Vec::new()];
    for word in words(query) {
        if is_stop_word(&word) || word.chars().count() < 2 {
            if runs.last().is_some_and(|r| !r.is_empty()) {
                runs.push(Vec::new());
            }
        } else if let Some(run) = runs.last_mut() {
            run.push(word);
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for run in runs.iter().filter(|r| !r.is_empty()) {
        for len in (1..=MAX_PHRASE_TERMS.min(run.len())).rev() {
            for window in run.windows(len) {
                let phrase = window.join(" ");
                if seen.insert(phrase.clone()) {
                    out.push(phrase);
                }
            }
        }
    }
    out
}

pub fn is_stop_word(word: &str) -> bool {
    matches!(
        word,
        "a" | "an"
            | "the"
            | "and"
            | "or"
            | "but"
            | "not"
            | "no"
            | "is"
            | "are"
            | "was"
            | "were"
            | "be"
            | "been"
            | "being"
            | "do"
            | "does"
            | "did"
            | "has"
            | "have"
            | "had"
            | "can"
            | "could"
            | "will"
            | "would"
            | "should"
            | "may"
            | "might"
            | "of"
            | "in"
            | "on"
            | "at"
            | "by"
            | "to"
            | "for"
            | "from"
            | "with"
            | "into"
            | "about"
            | "between"
            | "as"
            | "than"
            | "then"
            | "what"
            | "which"
            | "who"
            | "whom"
            | "when"
            | "where"
            | "why"
            | "how"
            | "this"
            | "that"
            | "these"
            | "those"
            | "it"
            | "its"
            | "they"
            | "their"
            | "them"
            | "we"
            | "our"
            | "you"
            | "your"
            | "i"
            | "me"
            | "my"
            | "there"
            | "here"
            | "all"
            | "any"
            | "some"
            | "such"
            | "each"
            | "other"
            | "more"
            | "most"
            | "so"
            | "if"
    )
}
