use url::Url;

/// Failure signal for [`normalize_thread_id`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("input is neither a thread id nor a recognizable thread URL")]
    InvalidInput,
}

/// Extract the canonical thread id from free-form input.
///
/// A trimmed input with no `/` and no whitespace is already a bare id and is
/// returned unchanged. Anything else must parse as an absolute URL whose path
/// contains a `comments` segment; the id is the segment immediately after it.
pub fn normalize_thread_id(input: &str) -> Result<String, NormalizeError> {
    let trimmed = input.trim();
    if !trimmed.contains('/') && !trimmed.contains(char::is_whitespace) {
        return Ok(trimmed.to_string());
    }

    let url = Url::parse(trimmed).map_err(|_| NormalizeError::InvalidInput)?;
    let mut segments = url
        .path_segments()
        .ok_or(NormalizeError::InvalidInput)?
        .filter(|segment| !segment.is_empty());

    while let Some(segment) = segments.next() {
        if segment == "comments" {
            return segments
                .next()
                .map(str::to_string)
                .ok_or(NormalizeError::InvalidInput);
        }
    }

    Err(NormalizeError::InvalidInput)
}
