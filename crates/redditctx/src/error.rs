/// User-facing failure taxonomy. Every failed fetch attempt surfaces exactly
/// one of these messages; the `Network` detail stays in the log.
#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Enter a thread ID or URL")]
    EmptyInput,

    #[error("Could not find a thread ID in the input")]
    InvalidInput,

    #[error("Reddit returned HTTP {0}")]
    FetchFailed(u16),

    #[error("Could not load the thread. Check the connection and try again.")]
    Network(String),
}
