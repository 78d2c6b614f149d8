//! Keyword extraction from video scripts.
//!
//! Purely local and deterministic: the same script with the same stop-word
//! and category configuration always yields the same ordered keyword list.

use std::collections::HashMap;

use crate::types::ClipError;

/// Words skipped during frequency ranking regardless of how often they occur.
const STOP_WORDS: &[&str] = &[
    "this", "that", "then", "than", "with", "would", "could", "should", "have", "from", "your",
    "will", "they", "what", "when", "were", "been", "there", "their", "these", "those", "about",
    "which", "because", "while", "where", "after", "before", "into", "over", "just", "like",
    "also", "more", "some", "very", "every", "being",
];

/// Topical categories promoted to bonus keywords when the script mentions
/// them verbatim, even if they never rank by frequency.
const CATEGORIES: &[&str] = &[
    "nature",
    "business",
    "technology",
    "lifestyle",
    "urban",
    "travel",
    "food",
    "health",
    "fitness",
    "education",
];

/// How many frequency-ranked tokens survive per script.
const MAX_RANKED: usize = 8;

/// Tokens this short carry no search signal.
const MIN_TOKEN_LEN: usize = 4;

/// Derive an ordered, deduplicated keyword list from a free-text script.
///
/// Tokens are lowercased, stripped of punctuation and ranked by frequency
/// (first occurrence breaks ties); the top [`MAX_RANKED`] survive. Category
/// names found verbatim in the script are appended afterwards.
pub fn extract(script: &str) -> Result<Vec<String>, ClipError> {
    if script.trim().is_empty() {
        return Err(ClipError::EmptyScript);
    }

    let lowered = script.to_lowercase();

    // Frequency count with first-occurrence position for the tie-break.
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for raw in lowered.split_whitespace() {
        let token: String = raw.chars().filter(|c| c.is_alphanumeric()).collect();
        if token.chars().count() < MIN_TOKEN_LEN || STOP_WORDS.contains(&token.as_str()) {
            continue;
        }
        match counts.get_mut(&token) {
            Some(n) => *n += 1,
            None => {
                counts.insert(token.clone(), 1);
                order.push(token);
            }
        }
    }

    let mut ranked: Vec<(String, usize, usize)> = order
        .into_iter()
        .enumerate()
        .map(|(first_seen, token)| {
            let count = counts[&token];
            (token, count, first_seen)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    let mut keywords: Vec<String> = ranked
        .into_iter()
        .take(MAX_RANKED)
        .map(|(token, _, _)| token)
        .collect();

    // Bonus keywords: categories literally present anywhere in the script.
    for category in CATEGORIES {
        if lowered.contains(category) && !keywords.iter().any(|k| k == category) {
            keywords.push((*category).to_string());
        }
    }

    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script_is_rejected() {
        assert!(matches!(extract(""), Err(ClipError::EmptyScript)));
        assert!(matches!(extract("   \n\t  "), Err(ClipError::EmptyScript)));
    }

    #[test]
    fn short_tokens_and_stop_words_are_dropped() {
        // Every token is either ≤3 chars or a stop word.
        let keywords = extract("a an the is this that with would").unwrap();
        assert!(keywords.is_empty());
    }

    #[test]
    fn fewer_than_max_qualifying_words_returns_them_all() {
        let keywords = extract("mountain river mountain sunset").unwrap();
        assert_eq!(keywords, vec!["mountain", "river", "sunset"]);
    }

    #[test]
    fn frequency_ranks_before_first_occurrence() {
        // "river" appears twice, so it outranks the earlier "mountain".
        let keywords = extract("mountain river sunset river").unwrap();
        assert_eq!(keywords, vec!["river", "mountain", "sunset"]);
    }

    #[test]
    fn ties_break_by_first_occurrence() {
        let keywords = extract("delta alpha delta alpha bravo").unwrap();
        assert_eq!(keywords, vec!["delta", "alpha", "bravo"]);
    }

    #[test]
    fn top_eight_by_frequency_survive() {
        let script = "one1 one1 one1 two2 two2 two2 three3 three3 three3 four4 four4 four4 \
                      five5 five5 six6 six6 seven7 seven7 eight8 eight8 nine9 ten10";
        let keywords = extract(script).unwrap();
        assert_eq!(keywords.len(), 8);
        assert!(!keywords.contains(&"nine9".to_string()));
        assert!(!keywords.contains(&"ten10".to_string()));
    }

    #[test]
    fn punctuation_is_stripped_before_counting() {
        let keywords = extract("Sunset, sunset! SUNSET?").unwrap();
        assert_eq!(keywords, vec!["sunset"]);
    }

    #[test]
    fn literal_category_mention_becomes_bonus_keyword() {
        // Eight distinct words repeat twice, so "urban" (one mention) cannot
        // rank by frequency; it still surfaces as a category bonus.
        let script = "walking walking streets streets lights lights crowds crowds \
                      subway subway noise noise rooftops rooftops evening evening urban";
        let keywords = extract(script).unwrap();
        assert!(!keywords[..MAX_RANKED].contains(&"urban".to_string()));
        assert!(keywords.contains(&"urban".to_string()));
    }

    #[test]
    fn category_already_ranked_is_not_duplicated() {
        let keywords = extract("nature nature nature hiking").unwrap();
        assert_eq!(
            keywords.iter().filter(|k| *k == "nature").count(),
            1,
            "category must not appear twice: {keywords:?}"
        );
    }

    #[test]
    fn extraction_is_deterministic() {
        let script = "drone shot over coastline, waves crashing, golden light on water, \
                      surfers riding waves at dawn near the coastline";
        let first = extract(script).unwrap();
        for _ in 0..10 {
            assert_eq!(extract(script).unwrap(), first);
        }
    }
}
