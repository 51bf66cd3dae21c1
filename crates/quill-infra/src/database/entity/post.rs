//! Post entity for SeaORM.

use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use quill_core::domain::Post;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    /// JSON array of tag strings.
    #[sea_orm(column_type = "Text", nullable)]
    pub tags: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// Stamps `created_at` on insert and `updated_at` on every save.
#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        if insert {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            title: model.title,
            content: model.content,
            category: model.category,
            tags: model.tags,
            created_at: Some(model.created_at.into()),
            updated_at: Some(model.updated_at.into()),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
///
/// An unsaved post leaves `id` unset so `save` inserts. A saved post keeps its
/// `id` and `created_at` unchanged so `save` updates without touching them.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.map_or(NotSet, Unchanged),
            title: Set(post.title),
            content: Set(post.content),
            category: Set(post.category),
            tags: Set(post.tags),
            created_at: post.created_at.map_or(NotSet, |at| Unchanged(at.into())),
            updated_at: post.updated_at.map_or(NotSet, |at| Set(at.into())),
        }
    }
}
