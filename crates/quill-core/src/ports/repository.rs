use async_trait::async_trait;

use crate::domain::{Post, PostId};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update) and return the stored state.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Deleting an absent ID succeeds.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// All posts in ascending ID order.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts whose title, content or category matches a SQL `LIKE` pattern.
    async fn find_by_search_term(&self, pattern: &str) -> Result<Vec<Post>, RepoError>;
}
