use anyhow::Result;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::chat::{load_chat_export, Message};
use crate::ranking::{top_responders, AnonymousPolicy, RankingResult};
use crate::render::{render_word_cloud, RenderOptions};
use crate::stopwords::StopwordSet;
use crate::wordcloud::build_corpus;
use crate::{utils, Args};

/// Loaded chat data plus normalized stopwords, constructed once and shared
/// by both analyses.
pub struct ChatAnalyzer {
    messages: Vec<Message>,
    stopwords: StopwordSet,
}

impl ChatAnalyzer {
    pub fn from_export(chat_path: &Path, stopword_path: Option<&Path>) -> Result<Self> {
        let export = load_chat_export(chat_path)?;
        let stopwords = StopwordSet::load(stopword_path)?;
        Ok(Self {
            messages: export.messages,
            stopwords,
        })
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn top_responders(&self, top_n: usize, anonymous: AnonymousPolicy) -> RankingResult {
        top_responders(&self.messages, top_n, anonymous)
    }

    pub fn generate_word_cloud(
        &self,
        output_dir: &Path,
        options: &RenderOptions,
        include_fragments: bool,
    ) -> Result<std::path::PathBuf, crate::render::RenderError> {
        let corpus = build_corpus(&self.messages, &self.stopwords, include_fragments);
        render_word_cloud(&corpus, output_dir, options)
    }
}

pub fn run_chat_analysis(args: &Args) -> Result<()> {
    let total_start_time = Instant::now();
    info!(
        action = "start",
        component = "analysis",
        chat_path = ?args.chat,
        "Starting chat analysis"
    );

    let analyzer = ChatAnalyzer::from_export(&args.chat, args.stopwords.as_deref())?;

    if !args.no_ranking {
        let ranking = analyzer.top_responders(args.top, args.anonymous);
        print_ranking(&ranking, analyzer.message_count());
    }

    if !args.no_wordcloud {
        let options = RenderOptions::new(args.font.clone());
        let output_path =
            analyzer.generate_word_cloud(&args.output_dir, &options, args.include_fragments)?;
        println!("Word cloud written to {}", output_path.display());
    }

    info!(
        action = "complete",
        component = "analysis",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Chat analysis completed"
    );
    Ok(())
}

fn print_ranking(ranking: &RankingResult, message_count: usize) {
    println!(
        "\n--- Top question responders ({} messages analyzed) ---",
        utils::format_number(message_count as u32)
    );

    if ranking.is_empty() {
        println!("No question replies found.");
        return;
    }

    for (rank, (sender, count)) in ranking.iter().enumerate() {
        println!(
            "{:>2}. {}: {} answered question{}",
            rank + 1,
            sender,
            utils::format_number(*count),
            if *count == 1 { "" } else { "s" }
        );
    }
}
