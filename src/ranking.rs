use clap::ValueEnum;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::info;

use crate::chat::Message;
use crate::question::is_question;

/// Placeholder sender used when a senderless reply is counted.
pub const ANONYMOUS_SENDER: &str = "(unknown)";

/// Ordered `(sender, count)` pairs, descending by count.
pub type RankingResult = Vec<(String, u32)>;

/// How replies from messages without a sender are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnonymousPolicy {
    /// Count them under the "(unknown)" placeholder
    Count,
    /// Exclude them from the ranking
    Drop,
}

/// Which message ids were judged interrogative. Lookup for an id that was
/// never inserted is false; there is no auto-vivification.
pub struct QuestionIndex {
    question_ids: HashSet<i64>,
}

impl QuestionIndex {
    pub fn build(messages: &[Message]) -> Self {
        let mut question_ids = HashSet::new();
        for message in messages {
            if is_question(message) {
                question_ids.insert(message.id);
            }
        }
        Self { question_ids }
    }

    /// Absent ids are not questions.
    pub fn is_question(&self, id: i64) -> bool {
        self.question_ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.question_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.question_ids.is_empty()
    }
}

/// Ranks senders by how often they replied to a question from the chat.
///
/// Two passes: the question index must be complete before attribution runs,
/// because a reply may reference a message appearing earlier or later in the
/// collection. Ties keep first-encountered order; `top_n == 0` yields an
/// empty result.
pub fn top_responders(
    messages: &[Message],
    top_n: usize,
    anonymous: AnonymousPolicy,
) -> RankingResult {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "responder_ranking",
        message_count = messages.len(),
        "Ranking question responders"
    );

    let index = QuestionIndex::build(messages);
    info!(
        action = "indexed",
        component = "responder_ranking",
        question_count = index.len(),
        "Question index built"
    );

    // Counts in first-encountered sender order so the later stable sort
    // breaks ties deterministically.
    let mut counts: Vec<(String, u32)> = Vec::new();
    let mut slot_by_sender: HashMap<String, usize> = HashMap::new();

    for message in messages {
        let Some(target_id) = message.reply_to_message_id else {
            continue;
        };
        if !index.is_question(target_id) {
            continue;
        }

        let sender = match (&message.from, anonymous) {
            (Some(name), _) => name.clone(),
            (None, AnonymousPolicy::Count) => ANONYMOUS_SENDER.to_string(),
            (None, AnonymousPolicy::Drop) => continue,
        };

        match slot_by_sender.get(&sender) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slot_by_sender.insert(sender.clone(), counts.len());
                counts.push((sender, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_n);

    info!(
        action = "complete",
        component = "responder_ranking",
        ranked_senders = counts.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Responder ranking completed"
    );
    counts
}
