use unicode_normalization::UnicodeNormalization;

/// Zero-width non-joiner, meaningful inside Persian words (e.g. "می‌شود").
pub const ZWNJ: char = '\u{200C}';

/// Sentence terminators recognized by [`sentence_split`]. The Persian
/// question mark counts as its own terminator.
const SENTENCE_TERMINATORS: [char; 5] = ['.', '!', '?', '؟', '\n'];

/// Canonicalizes Persian text: NFC, Arabic-to-Persian character unification,
/// removal of diacritics and tatweel, whitespace collapsed to single spaces.
/// Must be applied identically to stopwords and message text so membership
/// tests stay consistent.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true; // leading whitespace is dropped

    for ch in text.nfc() {
        let mapped = match ch {
            // Arabic letters used interchangeably with their Persian forms
            'ي' | 'ى' => Some('ی'),
            'ك' => Some('ک'),
            'ة' => Some('ه'),
            // Arabic-Indic digits to Extended Arabic-Indic (Persian) digits
            '٠'..='٩' => char::from_u32('۰' as u32 + (ch as u32 - '٠' as u32)),
            // Harakat and tatweel carry no lexical content
            '\u{064B}'..='\u{0652}' | '\u{0640}' => None,
            c if c == ZWNJ => Some(c),
            c if c.is_whitespace() => Some(' '),
            c if c.is_control() => Some(' '),
            c => Some(c),
        };

        let Some(ch) = mapped else { continue };
        if ch == ' ' {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }

    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Splits text into sentences on `.`, `!`, `?`, `؟` and newlines. The
/// terminator stays with its sentence; blank segments are dropped, so an
/// empty input yields no sentences.
pub fn sentence_split(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if SENTENCE_TERMINATORS.contains(&ch) {
            let end = idx + ch.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

/// Splits text into word tokens on any character that is neither
/// alphanumeric nor ZWNJ, dropping empties.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric() && c != ZWNJ)
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_arabic_characters() {
        assert_eq!(normalize("كتاب"), "کتاب");
        assert_eq!(normalize("علي"), "علی");
        assert_eq!(normalize("٤٢"), "۴۲");
    }

    #[test]
    fn strips_diacritics_and_tatweel() {
        // "كِتَاب" with kasra/fatha, plus tatweel stretching
        assert_eq!(normalize("كِتَاب"), "کتاب");
        assert_eq!(normalize("سـلام"), "سلام");
    }

    #[test]
    fn collapses_whitespace_and_keeps_zwnj() {
        assert_eq!(normalize("  a\t\tb\nc  "), "a b c");
        assert_eq!(normalize("می\u{200C}شود"), "می\u{200C}شود");
    }

    #[test]
    fn sentence_split_keeps_terminators() {
        assert_eq!(
            sentence_split("سلام. خوبی؟ بله"),
            vec!["سلام.", "خوبی؟", "بله"]
        );
    }

    #[test]
    fn sentence_split_of_empty_text_is_empty() {
        assert!(sentence_split("").is_empty());
        assert!(sentence_split("   \n  ").is_empty());
    }

    #[test]
    fn tokenize_splits_on_punctuation() {
        assert_eq!(tokenize("hello, world!"), vec!["hello", "world"]);
        assert_eq!(tokenize("می\u{200C}شود که"), vec!["می\u{200C}شود", "که"]);
        assert!(tokenize("?!.,").is_empty());
    }
}
