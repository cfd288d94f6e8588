use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Maximum number of keywords reported for a page
pub const MAX_KEYWORDS: usize = 5;

/// Words ignored when ranking keywords
pub const STOP_WORDS: [&str; 30] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should",
];

/// A ranked keyword and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Statistics derived from the visible text of a page
#[derive(Debug, Clone, PartialEq)]
pub struct TextStats {
    pub word_count: usize,
    pub sentence_count: usize,
    /// Unrounded readability in [0, 100]
    pub readability: f64,
    /// At most `MAX_KEYWORDS` entries, most frequent first
    pub keywords: Vec<KeywordCount>,
}

/// Computes word, sentence, readability and keyword statistics for `text`
pub fn analyze(text: &str) -> TextStats {
    let text = normalize_whitespace_in_segment(text);
    let word_count = count_words(&text);
    let sentence_count = count_sentences(&text);

    TextStats {
        word_count,
        sentence_count,
        readability: readability(word_count, sentence_count),
        keywords: top_keywords(&text, MAX_KEYWORDS),
    }
}

/// Normalizes whitespace within a single line or paragraph
pub fn normalize_whitespace_in_segment(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn count_words(text: &str) -> usize {
    text.split(' ').filter(|word| !word.is_empty()).count()
}

/// Counts non-blank runs of text between `.`, `!` and `?`
pub fn count_sentences(text: &str) -> usize {
    static TERMINATORS: OnceLock<Regex> = OnceLock::new();
    let terminators =
        TERMINATORS.get_or_init(|| Regex::new(r"[.!?]+").expect("static regex must compile"));

    terminators
        .split(text)
        .filter(|sentence| !sentence.trim().is_empty())
        .count()
}

/// Sentence-length readability: `100 - (avg_words_per_sentence - 15) * 2`, clamped to [0, 100]
///
/// Text without any sentence gets the maximum value.
pub fn readability(word_count: usize, sentence_count: usize) -> f64 {
    if sentence_count == 0 {
        return 100.0;
    }
    let avg_words_per_sentence = word_count as f64 / sentence_count as f64;
    (100.0 - (avg_words_per_sentence - 15.0) * 2.0).clamp(0.0, 100.0)
}

/// Ranks the most frequent meaningful words; ties keep first-seen order
pub fn top_keywords(text: &str, limit: usize) -> Vec<KeywordCount> {
    let mut order: Vec<KeywordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in text.to_lowercase().split_whitespace() {
        let word: String = token.chars().filter(|c| c.is_alphanumeric()).collect();
        if word.chars().count() <= 2 || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        match index.get(&word) {
            Some(&slot) => order[slot].count += 1,
            None => {
                index.insert(word.clone(), order.len());
                order.push(KeywordCount {
                    keyword: word,
                    count: 1,
                });
            }
        }
    }

    // stable: equal counts stay in first-seen order
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(limit);
    order
}
