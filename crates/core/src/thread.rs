use serde::Deserialize;

/// Kind discriminator Reddit puts on comment nodes. Everything else in a
/// reply listing ("more" placeholders, etc.) is skipped.
pub const COMMENT_KIND: &str = "t1";

/// Substituted when the source omits a comment author.
pub const DELETED_AUTHOR: &str = "[deleted]";

/// Substituted when the source omits the post author.
pub const UNKNOWN_AUTHOR: &str = "[unknown]";

/// The thread endpoint returns an ordered pair of listings: element 0 holds
/// the post, element 1 the top-level comment nodes.
pub type ThreadPayload = (Listing, Listing);

#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    pub kind: String,
    pub data: NodeData,
}

/// Raw node payload. Posts and comments share this shape; the fields the
/// other kind lacks stay `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeData {
    pub id: Option<String>,
    pub author: Option<String>,
    pub score: Option<i64>,
    pub body: Option<String>,
    pub parent_id: Option<String>,
    pub replies: Option<Replies>,
    pub title: Option<String>,
    pub subreddit: Option<String>,
    pub selftext: Option<String>,
}

/// Reddit sends `""` instead of a listing when a comment has no replies.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Replies {
    Listing(Box<Listing>),
    Empty(String),
}

impl Replies {
    fn nodes(&self) -> &[Node] {
        match self {
            Replies::Listing(listing) => &listing.data.children,
            Replies::Empty(_) => &[],
        }
    }
}

/// One flattened comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: String,
    pub author: String,
    /// A genuinely missing score stays `None` for rendering; aggregation and
    /// the score sort coerce it to 0.
    pub score: Option<i64>,
    pub body: String,
    pub parent_id: String,
    /// Number of comment ancestors above this record, assigned by the walk.
    pub depth: u32,
}

/// The thread root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub title: String,
    pub subreddit: String,
    pub author: Option<String>,
    pub selftext: String,
    pub score: i64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("thread payload does not contain a post")]
    MissingPost,
}

/// Flatten a reply listing depth-first, pre-order: a comment is emitted
/// before its children, children in source order. The caller supplies the
/// depth of the top-level nodes (0 for a thread's direct replies).
///
/// Iterative on an explicit stack, so nesting depth is bounded by memory
/// rather than the call stack.
pub fn flatten_replies(nodes: &[Node], depth: u32, out: &mut Vec<CommentRecord>) {
    let mut stack: Vec<(&Node, u32)> = nodes.iter().rev().map(|node| (node, depth)).collect();

    while let Some((node, depth)) = stack.pop() {
        if node.kind != COMMENT_KIND {
            continue;
        }
        let data = &node.data;
        out.push(CommentRecord {
            id: data.id.clone().unwrap_or_default(),
            author: data
                .author
                .clone()
                .unwrap_or_else(|| DELETED_AUTHOR.to_string()),
            score: data.score,
            body: data.body.clone().unwrap_or_default(),
            parent_id: data.parent_id.clone().unwrap_or_default(),
            depth,
        });

        let children = data.replies.as_ref().map(Replies::nodes).unwrap_or(&[]);
        for child in children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }
}

/// Split a raw thread payload into the post summary and the flattened,
/// depth-annotated comment list. Missing post fields are normalized here so
/// the renderers never see nulls: empty strings for text, 0 for the score.
/// The post author stays optional and is rendered with a sentinel downstream.
pub fn parse_thread(payload: ThreadPayload) -> Result<(PostSummary, Vec<CommentRecord>), PayloadError> {
    let (post_listing, comment_listing) = payload;

    let post = post_listing
        .data
        .children
        .into_iter()
        .next()
        .ok_or(PayloadError::MissingPost)?
        .data;

    let summary = PostSummary {
        title: post.title.unwrap_or_default(),
        subreddit: post.subreddit.unwrap_or_default(),
        author: post.author,
        selftext: post.selftext.unwrap_or_default(),
        score: post.score.unwrap_or(0),
    };

    let mut comments = Vec::new();
    flatten_replies(&comment_listing.data.children, 0, &mut comments);

    Ok((summary, comments))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: &str, author: Option<&str>, score: Option<i64>, body: &str) -> Node {
        Node {
            kind: COMMENT_KIND.to_string(),
            data: NodeData {
                id: Some(id.to_string()),
                author: author.map(str::to_string),
                score,
                body: Some(body.to_string()),
                parent_id: Some("t3_post".to_string()),
                ..NodeData::default()
            },
        }
    }

    fn with_replies(mut node: Node, children: Vec<Node>) -> Node {
        node.data.replies = Some(Replies::Listing(Box::new(Listing {
            data: ListingData { children },
        })));
        node
    }

    fn more_node(children: Vec<Node>) -> Node {
        let mut node = Node {
            kind: "more".to_string(),
            data: NodeData::default(),
        };
        if !children.is_empty() {
            node = with_replies(node, children);
        }
        node
    }

    #[test]
    fn test_flatten_counts_every_comment() {
        let nodes = vec![
            with_replies(
                comment("a", Some("alice"), Some(3), "top"),
                vec![
                    comment("b", Some("bob"), Some(1), "child one"),
                    with_replies(
                        comment("c", Some("carol"), Some(2), "child two"),
                        vec![comment("d", Some("dan"), None, "grandchild")],
                    ),
                ],
            ),
            comment("e", Some("erin"), Some(0), "second top"),
        ];

        let mut out = Vec::new();
        flatten_replies(&nodes, 0, &mut out);

        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_flatten_preorder_and_depths() {
        let nodes = vec![
            with_replies(
                comment("a", Some("alice"), Some(3), "top"),
                vec![
                    comment("b", Some("bob"), Some(1), "child one"),
                    with_replies(
                        comment("c", Some("carol"), Some(2), "child two"),
                        vec![comment("d", Some("dan"), None, "grandchild")],
                    ),
                ],
            ),
            comment("e", Some("erin"), Some(0), "second top"),
        ];

        let mut out = Vec::new();
        flatten_replies(&nodes, 0, &mut out);

        let ids: Vec<&str> = out.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d", "e"]);

        let depths: Vec<u32> = out.iter().map(|c| c.depth).collect();
        assert_eq!(depths, [0, 1, 1, 2, 0]);
    }

    #[test]
    fn test_flatten_starts_at_caller_depth() {
        let nodes = vec![comment("a", Some("alice"), None, "body")];

        let mut out = Vec::new();
        flatten_replies(&nodes, 4, &mut out);

        assert_eq!(out[0].depth, 4);
    }

    #[test]
    fn test_non_comment_nodes_skipped_with_subtree() {
        let nodes = vec![
            more_node(vec![comment("hidden", Some("ghost"), Some(9), "unseen")]),
            comment("a", Some("alice"), Some(1), "visible"),
        ];

        let mut out = Vec::new();
        flatten_replies(&nodes, 0, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "a");
    }

    #[test]
    fn test_missing_author_gets_sentinel() {
        let nodes = vec![comment("a", None, Some(1), "orphaned")];

        let mut out = Vec::new();
        flatten_replies(&nodes, 0, &mut out);

        assert_eq!(out[0].author, DELETED_AUTHOR);
    }

    #[test]
    fn test_missing_body_becomes_empty_string() {
        let mut node = comment("a", Some("alice"), Some(1), "");
        node.data.body = None;

        let mut out = Vec::new();
        flatten_replies(&[node], 0, &mut out);

        assert_eq!(out[0].body, "");
    }

    #[test]
    fn test_missing_score_preserved_as_none() {
        let nodes = vec![comment("a", Some("alice"), None, "body")];

        let mut out = Vec::new();
        flatten_replies(&nodes, 0, &mut out);

        assert_eq!(out[0].score, None);
    }

    #[test]
    fn test_pathological_nesting() {
        let mut node = comment("leaf", Some("deep"), Some(1), "innermost");
        for i in 0..5_000 {
            node = with_replies(comment(&format!("n{i}"), Some("mid"), Some(0), "level"), vec![node]);
        }

        let mut out = Vec::new();
        flatten_replies(&[node], 0, &mut out);

        assert_eq!(out.len(), 5_001);
        assert_eq!(out.last().unwrap().id, "leaf");
        assert_eq!(out.last().unwrap().depth, 5_000);
    }

    const THREAD_FIXTURE: &str = r#"[
        {"kind": "Listing", "data": {"children": [
            {"kind": "t3", "data": {
                "id": "abc123",
                "title": "Hello",
                "subreddit": "test",
                "author": "alice",
                "score": 10,
                "selftext": ""
            }}
        ]}},
        {"kind": "Listing", "data": {"children": [
            {"kind": "t1", "data": {
                "id": "c1",
                "author": "bob",
                "score": 5,
                "body": "first",
                "parent_id": "t3_abc123",
                "replies": {"kind": "Listing", "data": {"children": [
                    {"kind": "t1", "data": {
                        "id": "c2",
                        "score": -1,
                        "body": "reply",
                        "parent_id": "t1_c1",
                        "replies": ""
                    }}
                ]}}
            }},
            {"kind": "more", "data": {"count": 3, "children": []}}
        ]}}
    ]"#;

    #[test]
    fn test_payload_deserializes_and_parses() {
        let payload: ThreadPayload = serde_json::from_str(THREAD_FIXTURE).unwrap();
        let (post, comments) = parse_thread(payload).unwrap();

        assert_eq!(post.title, "Hello");
        assert_eq!(post.subreddit, "test");
        assert_eq!(post.author, Some("alice".to_string()));
        assert_eq!(post.selftext, "");
        assert_eq!(post.score, 10);

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].id, "c1");
        assert_eq!(comments[0].depth, 0);
        assert_eq!(comments[1].id, "c2");
        assert_eq!(comments[1].depth, 1);
        assert_eq!(comments[1].author, DELETED_AUTHOR);
        assert_eq!(comments[1].score, Some(-1));
    }

    #[test]
    fn test_empty_string_replies_is_leaf() {
        let json = r#"{"kind": "t1", "data": {"id": "x", "body": "leaf", "replies": ""}}"#;
        let node: Node = serde_json::from_str(json).unwrap();

        let mut out = Vec::new();
        flatten_replies(&[node], 0, &mut out);

        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_null_replies_is_leaf() {
        let json = r#"{"kind": "t1", "data": {"id": "x", "body": "leaf", "replies": null}}"#;
        let node: Node = serde_json::from_str(json).unwrap();

        let mut out = Vec::new();
        flatten_replies(&[node], 0, &mut out);

        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_parse_thread_missing_post() {
        let empty = Listing {
            data: ListingData { children: vec![] },
        };
        let comments = Listing {
            data: ListingData { children: vec![] },
        };

        assert_eq!(
            parse_thread((empty, comments)).unwrap_err(),
            PayloadError::MissingPost
        );
    }

    #[test]
    fn test_parse_thread_defaults_missing_post_fields() {
        let post = Node {
            kind: "t3".to_string(),
            data: NodeData {
                id: Some("abc".to_string()),
                ..NodeData::default()
            },
        };
        let payload = (
            Listing {
                data: ListingData {
                    children: vec![post],
                },
            },
            Listing {
                data: ListingData { children: vec![] },
            },
        );

        let (summary, comments) = parse_thread(payload).unwrap();
        assert_eq!(summary.title, "");
        assert_eq!(summary.subreddit, "");
        assert_eq!(summary.author, None);
        assert_eq!(summary.selftext, "");
        assert_eq!(summary.score, 0);
        assert!(comments.is_empty());
    }
}
