pub mod html;
pub mod text;


/// Result of parsing a page: structural signals plus text statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub signals: html::HtmlSignals,
    pub stats: text::TextStats,
}

/// Main parser that runs the HTML and text passes over a document
pub struct Parser;

impl Parser {
    /// Parse an HTML document
    pub fn parse(content: &str) -> ParseResult {
        let signals = html::parse(content);
        let stats = text::analyze(&signals.text);

        ::log::debug!(
            "Parsed {} words in {} sentences, {} keywords",
            stats.word_count,
            stats.sentence_count,
            stats.keywords.len()
        );

        ParseResult { signals, stats }
    }
}
