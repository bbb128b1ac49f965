use crate::prelude::{println, *};
use redditctx_core::normalize::normalize_thread_id;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct NormalizeOptions {
    /// Thread ID or full URL
    pub input: String,
}

pub fn run(options: NormalizeOptions, global: crate::Global) -> Result<()> {
    let trimmed = options.input.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput.into());
    }

    let id = normalize_thread_id(trimmed).map_err(|_| Error::InvalidInput)?;

    if global.verbose {
        println!("Canonical thread ID:");
    }
    println!("{}", id);

    Ok(())
}
