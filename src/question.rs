use crate::chat::Message;
use crate::normalize::sentence_split;

/// Question-indicator glyphs: the universal mark and the Persian mark.
const QUESTION_MARKS: [char; 2] = ['?', '؟'];

/// True if any sentence of the message contains a question mark. Fragmented
/// text is flattened first; empty text has no sentences and is never a
/// question. Stops at the first matching sentence.
pub fn is_question(message: &Message) -> bool {
    let text = message.flat_text();
    sentence_split(&text)
        .iter()
        .any(|sentence| sentence.contains(&QUESTION_MARKS[..]))
}
