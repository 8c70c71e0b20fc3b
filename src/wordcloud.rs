use std::time::Instant;
use tracing::info;

use crate::chat::Message;
use crate::normalize::{normalize, tokenize};
use crate::reshape::{display_order, reshape};
use crate::stopwords::StopwordSet;

/// Builds the rendering corpus: tokenize message text, drop stopwords,
/// space-join, then normalize and reshape the whole blob once.
///
/// By default only messages whose text is a plain string participate;
/// `include_fragments` additionally reconstructs fragmented messages.
pub fn build_corpus(
    messages: &[Message],
    stopwords: &StopwordSet,
    include_fragments: bool,
) -> String {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "corpus",
        message_count = messages.len(),
        include_fragments,
        "Building word cloud corpus"
    );

    let mut corpus = String::new();
    for message in messages {
        if !include_fragments && !message.has_plain_text() {
            continue;
        }
        let text = message.flat_text();

        let kept: Vec<&str> = tokenize(&text)
            .into_iter()
            .filter(|token| !stopwords.contains(token))
            .collect();
        if kept.is_empty() {
            continue;
        }

        corpus.push(' ');
        corpus.push_str(&kept.join(" "));
    }

    let corpus = normalize(&corpus);
    let corpus = display_order(&reshape(&corpus));

    info!(
        action = "complete",
        component = "corpus",
        corpus_chars = corpus.chars().count(),
        duration_ms = start_time.elapsed().as_millis(),
        "Corpus built"
    );
    corpus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatExport;

    fn messages(json: &str) -> Vec<Message> {
        let export: ChatExport = serde_json::from_str(json).unwrap();
        export.messages
    }

    #[test]
    fn keeps_repeated_tokens_with_empty_stopword_set() {
        let msgs = messages(r#"{"messages": [{"id": 1, "text": "a a b"}]}"#);
        let corpus = build_corpus(&msgs, &StopwordSet::empty(), false);
        assert_eq!(corpus, "a a b");
    }

    #[test]
    fn all_stopwords_yield_an_empty_corpus() {
        let msgs = messages(r#"{"messages": [{"id": 1, "text": "که از"}]}"#);
        let stopwords = StopwordSet::from_lines("که\nاز\n");
        assert_eq!(build_corpus(&msgs, &stopwords, false), "");
    }

    #[test]
    fn filtering_is_normalization_consistent() {
        // Arabic-kaf spelling in the message, Persian spelling in the list
        let msgs = messages(r#"{"messages": [{"id": 1, "text": "كتاب hello"}]}"#);
        let stopwords = StopwordSet::from_lines("کتاب\n");
        assert_eq!(build_corpus(&msgs, &stopwords, false), "hello");
    }

    #[test]
    fn fragmented_messages_are_skipped_unless_requested() {
        let msgs = messages(
            r#"{"messages": [
                {"id": 1, "text": "plain"},
                {"id": 2, "text": ["frag ", {"type": "bold", "text": "ment"}]}
            ]}"#,
        );
        let empty = StopwordSet::empty();
        assert_eq!(build_corpus(&msgs, &empty, false), "plain");
        assert_eq!(build_corpus(&msgs, &empty, true), "plain frag ment");
    }

    #[test]
    fn corpus_is_reshaped_for_display() {
        let msgs = messages(r#"{"messages": [{"id": 1, "text": "سلام"}]}"#);
        let corpus = build_corpus(&msgs, &StopwordSet::empty(), false);
        // initial seen + lam-alef ligature + meem, reversed into visual order
        assert_eq!(corpus, "\u{FEE1}\u{FEFC}\u{FEB3}");
    }
}
