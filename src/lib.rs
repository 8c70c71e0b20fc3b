pub mod analysis;
pub mod args;
pub mod chat;
pub mod normalize;
pub mod question;
pub mod ranking;
pub mod render;
pub mod reshape;
pub mod stopwords;
pub mod utils;
pub mod wordcloud;

pub use analysis::{run_chat_analysis, ChatAnalyzer};
pub use args::Args;
pub use chat::{ChatExport, Message};
pub use ranking::{top_responders, AnonymousPolicy, RankingResult};
pub use render::{render_word_cloud, RenderError, RenderOptions};
pub use stopwords::StopwordSet;
