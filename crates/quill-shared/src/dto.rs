//! Data Transfer Objects - request/response types for the API.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::response::ValidationErrors;

const MUST_NOT_BE_BLANK: &str = "must not be blank";
const MUST_NOT_BE_EMPTY: &str = "must not be empty";

/// Request body for creating or replacing a post.
///
/// Every field is optional on the wire so a missing field surfaces as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<BTreeSet<String>>,
}

impl PostRequest {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            category: Some(category.into()),
            tags: Some(tags.into_iter().map(Into::into).collect()),
        }
    }

    /// Check required fields, collecting every violation rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        for (field, value) in [
            ("title", &self.title),
            ("content", &self.content),
            ("category", &self.category),
        ] {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                errors.push(field, MUST_NOT_BE_BLANK);
            }
        }

        if self.tags.as_ref().is_none_or(BTreeSet::is_empty) {
            errors.push("tags", MUST_NOT_BE_EMPTY);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub category: String,
    #[schema(value_type = Vec<String>)]
    pub tags: BTreeSet<String>,
    #[serde(with = "crate::timestamp")]
    #[schema(value_type = Option<String>, example = "2024-01-01T12:00:00Z")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "crate::timestamp")]
    #[schema(value_type = Option<String>, example = "2024-01-01T12:00:00Z")]
    pub updated_at: Option<DateTime<Utc>>,
}
