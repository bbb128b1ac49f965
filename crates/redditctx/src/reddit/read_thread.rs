use crate::prelude::{println, *};
use colored::Colorize;
use redditctx_core::render::RenderMode;
use redditctx_core::stats::Stats;
use redditctx_core::thread::parse_thread;

use super::{fetch_thread, http_client, Session};

/// Environment variables that auto-select a thread when the positional
/// argument is absent; the first one present wins.
const THREAD_ENV_VARS: [&str; 2] = ["REDDITCTX_THREAD", "REDDITCTX_URL"];

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ReadOptions {
    /// Thread ID or full URL (e.g., "abc123" or "https://www.reddit.com/r/rust/comments/abc123/title/")
    pub thread: Option<String>,

    /// Output encoding
    #[arg(short, long, value_enum, default_value = "llm")]
    pub format: OutputFormat,

    /// Print the aggregate statistics table as well
    #[arg(long)]
    pub stats: bool,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
pub enum OutputFormat {
    /// Verbose text for LLM context windows
    Llm,
    /// One line per comment
    Compact,
    /// Structured JSON
    Json,
}

impl OutputFormat {
    fn mode(self) -> RenderMode {
        match self {
            OutputFormat::Llm => RenderMode::LlmText,
            OutputFormat::Compact => RenderMode::CompactText,
            OutputFormat::Json => RenderMode::Json,
        }
    }
}

pub async fn run(options: ReadOptions, global: crate::Global) -> Result<()> {
    let raw_input = options
        .thread
        .clone()
        .or_else(auto_thread_input)
        .unwrap_or_default();

    let mut session = Session::new();
    let Some(thread_id) = session.begin(&raw_input) else {
        return Err(eyre!(session
            .error_message()
            .unwrap_or_else(|| "A fetch is already in progress".to_string())));
    };

    if global.verbose {
        println!("Fetching thread: {}", thread_id);
    }

    let client = http_client()?;
    match fetch_thread(&client, &thread_id).await {
        Ok(payload) => match parse_thread(payload) {
            Ok((post, comments)) => session.complete(&post, &comments),
            Err(err) => session.fail(Error::Network(err.to_string())),
        },
        Err(err) => session.fail(err),
    }

    let Some(outputs) = session.outputs() else {
        return Err(eyre!(session.error_message().unwrap_or_default()));
    };

    if options.stats {
        println!("{}", "THREAD STATS".bright_cyan().bold());
        println!("{}", stats_table(&outputs.stats));
    }

    let rendered = outputs.rendered(options.format.mode());
    match options.format {
        OutputFormat::Json => println!("{}", rendered),
        _ => print!("{}", rendered),
    }

    Ok(())
}

fn auto_thread_input() -> Option<String> {
    THREAD_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
}

fn stats_table(stats: &Stats) -> prettytable::Table {
    let mut table = new_table();

    table.add_row(prettytable::row!["Post score", stats.post_score]);
    table.add_row(prettytable::row!["Comments", stats.total_comments]);
    table.add_row(prettytable::row!["Comment score", stats.total_comment_score]);
    table.add_row(prettytable::row![
        "Avg comment score",
        f!("{:.2}", stats.avg_comment_score)
    ]);
    table.add_row(prettytable::row![
        "Comments per score point",
        f!("{:.2}", stats.comments_per_score_point)
    ]);

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_maps_to_render_mode() {
        assert_eq!(OutputFormat::Llm.mode(), RenderMode::LlmText);
        assert_eq!(OutputFormat::Compact.mode(), RenderMode::CompactText);
        assert_eq!(OutputFormat::Json.mode(), RenderMode::Json);
    }

    #[test]
    fn test_stats_table_rows() {
        let stats = Stats {
            post_score: 10,
            total_comments: 2,
            total_comment_score: 4,
            avg_comment_score: 2.0,
            comments_per_score_point: 0.5,
        };

        let rendered = stats_table(&stats).to_string();
        assert!(rendered.contains("Post score"));
        assert!(rendered.contains("10"));
        assert!(rendered.contains("2.00"));
        assert!(rendered.contains("0.50"));
    }
}
