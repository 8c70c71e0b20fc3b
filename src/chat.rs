use anyhow::{Context, Result};
use serde::Deserialize;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::info;

/// A Telegram-style chat export: a document with a `messages` array.
/// Unknown top-level fields (export name, chat type, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct ChatExport {
    pub messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub id: i64,

    /// Sender display name. Service messages and deleted accounts have none.
    #[serde(default)]
    pub from: Option<String>,

    /// Id of the message this one replies to. The target is not guaranteed
    /// to exist in the loaded collection.
    #[serde(default)]
    pub reply_to_message_id: Option<i64>,

    /// Missing `text` deserializes as an empty plain string rather than
    /// failing the whole load.
    #[serde(default)]
    pub text: MessageText,
}

/// Message text as exported: either a flat string or an ordered list of
/// fragments (plain runs interleaved with annotated entities).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    Plain(String),
    Fragments(Vec<Fragment>),
}

impl Default for MessageText {
    fn default() -> Self {
        MessageText::Plain(String::new())
    }
}

/// One entry of a fragmented `text` field. `Other` absorbs fragments with no
/// usable text so a single malformed record never aborts deserialization.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Fragment {
    Text(String),
    Entity { text: String },
    Other(serde_json::Value),
}

impl Message {
    /// Flattens the message text into a single string. Plain text is borrowed
    /// unchanged (reconstruction is idempotent); fragment lists are
    /// concatenated in order with no separator, skipping fragments that carry
    /// no text.
    pub fn flat_text(&self) -> Cow<'_, str> {
        match &self.text {
            MessageText::Plain(text) => Cow::Borrowed(text.as_str()),
            MessageText::Fragments(fragments) => {
                let mut out = String::new();
                for fragment in fragments {
                    match fragment {
                        Fragment::Text(text) => out.push_str(text),
                        Fragment::Entity { text } => out.push_str(text),
                        Fragment::Other(_) => {}
                    }
                }
                Cow::Owned(out)
            }
        }
    }

    pub fn has_plain_text(&self) -> bool {
        matches!(self.text, MessageText::Plain(_))
    }
}

pub fn load_chat_export(path: &Path) -> Result<ChatExport> {
    info!(action = "load", component = "chat_export", file_path = ?path, "Loading chat data");

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read chat export {:?}", path))?;
    let export: ChatExport = serde_json::from_str(&raw)
        .with_context(|| format!("Chat export {:?} is not a valid export document", path))?;

    info!(
        action = "loaded",
        component = "chat_export",
        message_count = export.messages.len(),
        file_path = ?path,
        "Chat data loaded"
    );
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(json: &str) -> ChatExport {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_plain_and_fragmented_messages() {
        let export = parse(
            r#"{
                "name": "group",
                "messages": [
                    {"id": 1, "from": "A", "text": "hi"},
                    {"id": 2, "from": "B", "reply_to_message_id": 1,
                     "text": ["Hello ", {"type": "bold", "text": "world"}]}
                ]
            }"#,
        );
        assert_eq!(export.messages.len(), 2);
        assert_eq!(export.messages[0].flat_text(), "hi");
        assert_eq!(export.messages[1].flat_text(), "Hello world");
        assert_eq!(export.messages[1].reply_to_message_id, Some(1));
    }

    #[test]
    fn tolerates_missing_fields_and_junk_fragments() {
        let export = parse(
            r#"{"messages": [
                {"id": 7},
                {"id": 8, "text": [{"nonsense": true}, "ok", 42]}
            ]}"#,
        );
        assert_eq!(export.messages[0].from, None);
        assert_eq!(export.messages[0].flat_text(), "");
        assert_eq!(export.messages[1].flat_text(), "ok");
    }

    #[test]
    fn flat_text_is_idempotent_for_plain_strings() {
        let export = parse(r#"{"messages": [{"id": 1, "text": "already flat"}]}"#);
        let first = export.messages[0].flat_text().into_owned();
        assert_eq!(export.messages[0].flat_text(), first);
        assert!(matches!(export.messages[0].flat_text(), Cow::Borrowed(_)));
    }

    #[test]
    fn load_fails_with_path_in_error() {
        let err = load_chat_export(Path::new("/nonexistent/result.json")).unwrap_err();
        assert!(format!("{err}").contains("/nonexistent/result.json"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_chat_export(file.path()).is_err());
    }
}
