use regex::Regex;
use serde::Serialize;

use crate::stats::{aggregate, Stats};
use crate::thread::{CommentRecord, PostSummary, UNKNOWN_AUTHOR};

/// Literal emitted in place of an empty post body.
pub const NO_BODY: &str = "(no body)";

/// Output encoding selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    LlmText,
    CompactText,
    Json,
}

/// Everything one fetch produces. Populated atomically by
/// [`build_outputs`] and replaced wholesale on the next fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Outputs {
    pub stats: Stats,
    pub llm_text: String,
    pub compact_text: String,
    pub json: String,
}

impl Outputs {
    pub fn rendered(&self, mode: RenderMode) -> &str {
        match mode {
            RenderMode::LlmText => &self.llm_text,
            RenderMode::CompactText => &self.compact_text,
            RenderMode::Json => &self.json,
        }
    }
}

/// `u/<name>` for a known post author, the sentinel otherwise.
pub fn post_author_display(post: &PostSummary) -> String {
    match &post.author {
        Some(author) => format!("u/{author}"),
        None => UNKNOWN_AUTHOR.to_string(),
    }
}

/// Collapse every run of two or more newlines to a single newline. Applied
/// once, over the fully assembled string.
fn collapse_blank_runs(text: &str) -> String {
    let re = Regex::new(r"\n{2,}").unwrap();
    re.replace_all(text, "\n").into_owned()
}

/// Collapse internal whitespace runs to single spaces and trim the ends.
fn squash_whitespace(text: &str) -> String {
    let re = Regex::new(r"\s+").unwrap();
    re.replace_all(text.trim(), " ").into_owned()
}

/// Header and post-body section shared by both text encodings.
fn push_header(out: &mut String, post: &PostSummary, author_display: &str, body: &str) {
    out.push_str(&format!("TITLE: {}\n", post.title));
    out.push_str(&format!("SUBREDDIT: r/{}\n", post.subreddit));
    out.push_str(&format!("POST_AUTHOR: {author_display}\n"));
    out.push_str("POST_BODY:\n");
    out.push_str(if body.is_empty() { NO_BODY } else { body });
    out.push('\n');
}

/// Verbose text for LLM context windows: one block per comment, depth label
/// and author line, then the trimmed body. Comments with an empty trimmed
/// body contribute nothing.
pub fn render_llm_text(
    post: &PostSummary,
    author_display: &str,
    body: &str,
    comments: &[CommentRecord],
) -> String {
    let mut out = String::new();
    push_header(&mut out, post, author_display, body);
    out.push_str("COMMENTS:\n");

    for comment in comments {
        let text = comment.body.trim();
        if text.is_empty() {
            continue;
        }
        out.push_str(&format!("d{} {}:\n{}\n", comment.depth, comment.author, text));
    }

    collapse_blank_runs(&out)
}

/// One line per comment: depth label, middle dot, author, colon, body with
/// all internal whitespace squashed. Empty-after-squash bodies contribute
/// nothing.
pub fn render_compact_text(
    post: &PostSummary,
    author_display: &str,
    body: &str,
    comments: &[CommentRecord],
) -> String {
    let mut out = String::new();
    push_header(&mut out, post, author_display, body);

    for comment in comments {
        let text = squash_whitespace(&comment.body);
        if text.is_empty() {
            continue;
        }
        out.push_str(&format!("d{} · {}: {}\n", comment.depth, comment.author, text));
    }

    collapse_blank_runs(&out)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreadJson<'a> {
    title: &'a str,
    subreddit: &'a str,
    post_author: &'a str,
    body: &'a str,
    stats: &'a Stats,
    comments: Vec<CommentJson<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentJson<'a> {
    id: &'a str,
    author: &'a str,
    body: &'a str,
    score: Option<i64>,
    depth: u32,
    parent_id: &'a str,
}

/// Structured JSON, pretty-printed with 2-space indentation. Field order and
/// presence are part of the contract; consumers parse this programmatically.
pub fn render_json(
    post: &PostSummary,
    author_display: &str,
    body: &str,
    stats: &Stats,
    comments: &[CommentRecord],
) -> serde_json::Result<String> {
    let comments = comments
        .iter()
        .map(|c| CommentJson {
            id: &c.id,
            author: &c.author,
            body: &c.body,
            score: c.score,
            depth: c.depth,
            parent_id: &c.parent_id,
        })
        .collect();

    serde_json::to_string_pretty(&ThreadJson {
        title: &post.title,
        subreddit: &post.subreddit,
        post_author: author_display,
        body,
        stats,
        comments,
    })
}

/// Run the whole render pipeline for one fetch: sort by score descending
/// (missing scores sort as 0, tie order unspecified), aggregate, then render
/// all three encodings from the same sorted model.
pub fn build_outputs(
    post: &PostSummary,
    comments: &[CommentRecord],
) -> serde_json::Result<Outputs> {
    let mut sorted: Vec<CommentRecord> = comments.to_vec();
    sorted.sort_unstable_by_key(|c| std::cmp::Reverse(c.score.unwrap_or(0)));

    let stats = aggregate(post, comments);
    let author_display = post_author_display(post);
    let body = post.selftext.trim().to_string();

    let llm_text = render_llm_text(post, &author_display, &body, &sorted);
    let compact_text = render_compact_text(post, &author_display, &body, &sorted);
    let json = render_json(post, &author_display, &body, &stats, &sorted)?;

    Ok(Outputs {
        stats,
        llm_text,
        compact_text,
        json,
    })
}
