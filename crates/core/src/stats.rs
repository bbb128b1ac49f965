use serde::Serialize;

use crate::thread::{CommentRecord, PostSummary};

/// Aggregate metrics over one fetched thread. Computed once per fetch and
/// replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub post_score: i64,
    pub total_comments: usize,
    pub total_comment_score: i64,
    pub avg_comment_score: f64,
    pub comments_per_score_point: f64,
}

/// Compute the summary metrics for a flattened thread. Missing comment
/// scores count as 0; both ratios are defined as 0 when their denominator
/// is 0.
pub fn aggregate(post: &PostSummary, comments: &[CommentRecord]) -> Stats {
    let total_comments = comments.len();
    let total_comment_score: i64 = comments.iter().map(|c| c.score.unwrap_or(0)).sum();

    let avg_comment_score = if total_comments == 0 {
        0.0
    } else {
        total_comment_score as f64 / total_comments as f64
    };

    let comments_per_score_point = if total_comment_score == 0 {
        0.0
    } else {
        total_comments as f64 / total_comment_score as f64
    };

    Stats {
        post_score: post.score,
        total_comments,
        total_comment_score,
        avg_comment_score,
        comments_per_score_point,
    }
}
