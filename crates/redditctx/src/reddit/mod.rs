use crate::prelude::{println, *};
use redditctx_core::thread::ThreadPayload;

pub mod normalize;
pub mod read_thread;
pub mod session;

pub use session::{FetchState, Session};

const REDDIT_API_BASE: &str = "https://www.reddit.com";

#[derive(Debug, clap::Parser)]
#[command(name = "reddit")]
#[command(about = "Reddit (www.reddit.com) thread operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Fetch a thread and render it for LLM consumption
    #[clap(name = "read")]
    Read(read_thread::ReadOptions),

    /// Resolve free-form input to a canonical thread ID
    #[clap(name = "normalize")]
    Normalize(normalize::NormalizeOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Reddit API Base: {}", REDDIT_API_BASE);
        println!();
    }

    match app.command {
        Commands::Read(options) => read_thread::run(options, global).await,
        Commands::Normalize(options) => normalize::run(options, global),
    }
}

// Shared utility functions
pub fn get_api_base() -> &'static str {
    REDDIT_API_BASE
}

/// Reddit rejects requests carrying the default reqwest user-agent.
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(f!("redditctx/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// One GET per fetch. `raw_json=1` asks for unescaped body text. A non-2xx
/// status maps to `FetchFailed`; a transport or body-parse failure maps to
/// `Network` with the cause logged.
pub async fn fetch_thread(
    client: &reqwest::Client,
    thread_id: &str,
) -> Result<ThreadPayload, Error> {
    let url = f!("{}/comments/{}.json?raw_json=1", get_api_base(), thread_id);

    let response = client.get(&url).send().await.map_err(|e| {
        log::warn!("transport failure for {url}: {e}");
        Error::Network(e.to_string())
    })?;

    if !response.status().is_success() {
        return Err(Error::FetchFailed(response.status().as_u16()));
    }

    response.json::<ThreadPayload>().await.map_err(|e| {
        log::warn!("unparseable thread payload from {url}: {e}");
        Error::Network(e.to_string())
    })
}
