use redditctx_core::normalize::normalize_thread_id;
use redditctx_core::render::{build_outputs, Outputs};
use redditctx_core::thread::{CommentRecord, PostSummary};

use crate::error::Error;

/// Request lifecycle for one thread fetch. Either terminal state leaves the
/// session ready for a new `begin`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Idle,
    Fetching,
    Success,
    Failed,
}

/// Owns the fetch lifecycle, the rendered outputs and the current error.
/// Outputs are replaced wholesale on every attempt, never merged, so a new
/// fetch can never surface stale or partial results.
#[derive(Debug, Default)]
pub struct Session {
    state: FetchState,
    outputs: Option<Outputs>,
    error: Option<Error>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    /// The loading flag that gates re-triggering while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Fetching
    }

    pub fn outputs(&self) -> Option<&Outputs> {
        self.outputs.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// Start a fetch attempt. Ignored while another fetch is in flight.
    /// Clears prior results immediately, rejects blank input before
    /// normalization, and returns the canonical thread id once the input
    /// survives both checks. No network I/O happens here.
    pub fn begin(&mut self, raw_input: &str) -> Option<String> {
        if self.is_loading() {
            return None;
        }
        self.state = FetchState::Fetching;
        self.outputs = None;
        self.error = None;

        let trimmed = raw_input.trim();
        if trimmed.is_empty() {
            self.fail(Error::EmptyInput);
            return None;
        }

        match normalize_thread_id(trimmed) {
            Ok(id) => Some(id),
            Err(_) => {
                self.fail(Error::InvalidInput);
                None
            }
        }
    }

    /// Fetching → Success. Runs the sort, the aggregation and all three
    /// renderers; outputs land atomically or not at all.
    pub fn complete(&mut self, post: &PostSummary, comments: &[CommentRecord]) {
        match build_outputs(post, comments) {
            Ok(outputs) => {
                self.outputs = Some(outputs);
                self.state = FetchState::Success;
            }
            Err(err) => self.fail(Error::Network(err.to_string())),
        }
    }

    /// Fetching → Failed with exactly one user-facing message.
    pub fn fail(&mut self, error: Error) {
        log::debug!("fetch attempt failed: {error:?}");
        self.outputs = None;
        self.error = Some(error);
        self.state = FetchState::Failed;
    }
}
