//! Text Similarity Scorer: TF-IDF cosine similarity between a CV and a job description.
//!
//! The two texts form the whole corpus, so IDF only distinguishes shared terms from terms
//! unique to one side (smoothed: `ln(3 / (1 + df)) + 1`). Terms are unigrams plus bigrams of
//! adjacent non-stop-word tokens. All maps are ordered so the floating-point sums run in the
//! same order on every call and for either argument order.

use std::collections::BTreeMap;

const CORPUS_SIZE: f64 = 2.0;

/// Common English function words excluded from similarity terms.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "etc",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "out", "over", "own", "same", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
    "yours",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Lowercased alphanumeric tokens with stop-words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Unigram and bigram counts.
fn term_frequencies(tokens: &[String]) -> BTreeMap<String, f64> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0.0) += 1.0;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0.0) += 1.0;
    }
    counts
}

fn idf(document_frequency: f64) -> f64 {
    ((1.0 + CORPUS_SIZE) / (1.0 + document_frequency)).ln() + 1.0
}

fn weigh(tf: &BTreeMap<String, f64>, other: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    tf.iter()
        .map(|(term, count)| {
            let df = if other.contains_key(term) { 2.0 } else { 1.0 };
            (term.clone(), count * idf(df))
        })
        .collect()
}

fn norm(weights: &BTreeMap<String, f64>) -> f64 {
    weights.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// Similarity in `[0, 1]`; 0 when either text has no meaningful terms.
pub fn similarity(cv_text: &str, job_text: &str) -> f64 {
    let cv_tokens = tokenize(cv_text);
    let job_tokens = tokenize(job_text);
    if cv_tokens.is_empty() || job_tokens.is_empty() {
        return 0.0;
    }

    let cv_tf = term_frequencies(&cv_tokens);
    let job_tf = term_frequencies(&job_tokens);
    let cv_weights = weigh(&cv_tf, &job_tf);
    let job_weights = weigh(&job_tf, &cv_tf);

    // Shared terms in sorted order; identical sequence whichever side is iterated.
    let dot: f64 = cv_weights
        .iter()
        .filter_map(|(term, w)| job_weights.get(term).map(|other| w * other))
        .sum();

    let denominator = norm(&cv_weights) * norm(&job_weights);
    if denominator == 0.0 {
        return 0.0;
    }
    (dot / denominator).clamp(0.0, 1.0)
}
