//! Field-by-field conversion between [`PostRequest`], [`Post`] and [`PostResponse`].
//!
//! The entity keeps tags as a JSON array inside one text column. Encoding is
//! deterministic because the set is ordered.

use std::collections::BTreeSet;

use quill_shared::{PostRequest, PostResponse};

use crate::domain::Post;
use crate::error::DomainError;

const EMPTY_TAGS: &str = "[]";

/// Build an unsaved entity from a request. `id` and timestamps stay unset.
pub fn request_to_entity(request: &PostRequest) -> Result<Post, DomainError> {
    Ok(Post {
        id: None,
        title: request.title.clone().unwrap_or_default(),
        content: request.content.clone().unwrap_or_default(),
        category: request.category.clone().unwrap_or_default(),
        tags: Some(encode_tags(request.tags.as_ref())?),
        created_at: None,
        updated_at: None,
    })
}

pub fn entity_to_response(entity: Post) -> Result<PostResponse, DomainError> {
    let tags = decode_tags(entity.tags.as_deref())?;

    Ok(PostResponse {
        id: entity.id,
        title: entity.title,
        content: entity.content,
        category: entity.category,
        tags,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    })
}

/// Identity and timestamps from `old`, every mutable field from `new`.
pub fn merge_for_update(new: Post, old: Post) -> Post {
    Post {
        id: old.id,
        title: new.title,
        content: new.content,
        category: new.category,
        tags: new.tags,
        created_at: old.created_at,
        updated_at: old.updated_at,
    }
}

pub fn list_to_responses(
    entities: impl IntoIterator<Item = Post>,
) -> Result<Vec<PostResponse>, DomainError> {
    entities.into_iter().map(entity_to_response).collect()
}

pub fn encode_tags(tags: Option<&BTreeSet<String>>) -> Result<String, DomainError> {
    match tags {
        None => Ok(EMPTY_TAGS.to_string()),
        Some(tags) => serde_json::to_string(tags)
            .map_err(|e| DomainError::Mapping(format!("failed to serialize tags: {e}"))),
    }
}

/// Absent or blank text decodes to an empty set. Anything else must be a JSON array of strings.
pub fn decode_tags(raw: Option<&str>) -> Result<BTreeSet<String>, DomainError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(BTreeSet::new());
    };

    serde_json::from_str(raw)
        .map_err(|e| DomainError::Mapping(format!("failed to parse tags {raw:?}: {e}")))
}
