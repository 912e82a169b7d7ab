// file: src/analysis/keywords.rs
// description: keyword frequency extraction from search result text
// reference: markup stripping and script filtering over titles and descriptions

use crate::analysis::patterns::{HANGUL_FILTER, MARKUP_TAG, script_filter};
use crate::error::{InsightError, Result};
use crate::models::{Document, KeywordCount};
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// Counts words of one alphabetic script across a set of documents.
///
/// Characters outside the script are deleted rather than replaced, so
/// `"오메가3"` contributes the token `"오메가"` and fragments separated only by
/// punctuation fuse into a single token.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    script_filter: Regex,
}

impl KeywordExtractor {
    /// Extractor for Hangul syllables.
    pub fn new() -> Self {
        Self {
            script_filter: HANGUL_FILTER.clone(),
        }
    }

    /// Extractor for an arbitrary regex character class body, e.g. `"a-zA-Z"`.
    pub fn with_script_class(class: &str) -> Result<Self> {
        let script_filter = script_filter(class).map_err(|e| {
            InsightError::Config(format!("invalid script class '{}': {}", class, e))
        })?;
        Ok(Self { script_filter })
    }

    /// Returns the `top_n` most frequent tokens, most frequent first.
    ///
    /// Tokens of a single character and tokens equal to `exclude` are
    /// dropped. Equal counts keep first-seen order.
    pub fn extract_top_keywords(
        &self,
        documents: &[Document],
        exclude: &str,
        top_n: usize,
    ) -> Vec<KeywordCount> {
        if documents.is_empty() || top_n == 0 {
            return Vec::new();
        }

        let cleaned = self.clean_text(&Self::join_documents(documents));

        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut first_seen: Vec<&str> = Vec::new();

        for token in cleaned
            .split_whitespace()
            .filter(|token| token.chars().count() > 1 && *token != exclude)
        {
            let count = counts.entry(token).or_insert(0);
            if *count == 0 {
                first_seen.push(token);
            }
            *count += 1;
        }

        let mut ranked: Vec<KeywordCount> = first_seen
            .into_iter()
            .map(|token| KeywordCount::new(token, counts[token]))
            .collect();

        // stable: ties stay in first-seen order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(top_n);

        debug!(
            "Extracted {} keywords from {} documents ({} distinct tokens)",
            ranked.len(),
            documents.len(),
            counts.len()
        );

        ranked
    }

    fn join_documents(documents: &[Document]) -> String {
        documents
            .iter()
            .map(|doc| format!("{} {}", doc.title, doc.description))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn clean_text(&self, text: &str) -> String {
        let without_tags = MARKUP_TAG.replace_all(text, "");
        self.script_filter
            .replace_all(&without_tags, "")
            .into_owned()
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Hangul keyword extraction with the default extractor.
pub fn extract_top_keywords(
    documents: &[Document],
    exclude: &str,
    top_n: usize,
) -> Vec<KeywordCount> {
    KeywordExtractor::new().extract_top_keywords(documents, exclude, top_n)
}
