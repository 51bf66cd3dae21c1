//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_search_term(&self, pattern: &str) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(pattern, "Searching posts");

        let result = PostEntity::find()
            .filter(
                Condition::any()
                    .add(post::Column::Title.like(pattern))
                    .add(post::Column::Content.like(pattern))
                    .add(post::Column::Category.like(pattern)),
            )
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
