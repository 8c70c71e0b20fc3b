use clap::Parser;
use std::path::PathBuf;

use crate::ranking::AnonymousPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "chatstat",
    about = "Analyze an exported chat transcript: rank question answerers and render a word cloud",
    version,
    long_about = None
)]
pub struct Args {
    /// Path to the exported chat JSON file
    #[arg(short, long, default_value = "result.json")]
    pub chat: PathBuf,

    /// Path to a custom stopword list (one token per line)
    #[arg(short, long)]
    pub stopwords: Option<PathBuf>,

    /// Directory the word cloud image is written into
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Path to a TrueType font with Persian glyph coverage
    #[arg(short, long, default_value = "BHoma.ttf")]
    pub font: PathBuf,

    /// Number of top responders to display
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// How replies from senderless messages are ranked
    #[arg(long, value_enum, default_value_t = AnonymousPolicy::Count)]
    pub anonymous: AnonymousPolicy,

    /// Also reconstruct fragmented messages into the word cloud corpus
    #[arg(long)]
    pub include_fragments: bool,

    /// Skip word cloud generation
    #[arg(long)]
    pub no_wordcloud: bool,

    /// Skip the responder leaderboard
    #[arg(long)]
    pub no_ranking: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
