use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned post identifier.
pub type PostId = i64;

/// Post entity - a blog post as held by the persistence gateway.
///
/// `id` and both timestamps are `None` until the first save. `tags` holds the
/// JSON-encoded tag set; see [`crate::mapper`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Option<PostId>,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
