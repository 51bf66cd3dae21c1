//! In-memory post repository - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::domain::{Post, PostId};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

use super::pattern::like_matches;

#[derive(Default)]
struct Table {
    rows: BTreeMap<PostId, Post>,
    last_id: PostId,
}

/// In-memory post store keyed by ID, with a monotonically increasing ID sequence.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let now = Utc::now();

        let id = match post.id {
            Some(id) => {
                table.last_id = table.last_id.max(id);
                id
            }
            None => {
                table.last_id += 1;
                table.last_id
            }
        };

        // created_at survives updates; keep whatever the stored row had.
        let created_at = table
            .rows
            .get(&id)
            .and_then(|existing| existing.created_at)
            .or(post.created_at)
            .unwrap_or(now);

        post.id = Some(id);
        post.created_at = Some(created_at);
        post.updated_at = Some(now);
        table.rows.insert(id, post.clone());

        Ok(post)
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_search_term(&self, pattern: &str) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;

        Ok(table
            .rows
            .values()
            .filter(|p| {
                like_matches(pattern, &p.title)
                    || like_matches(pattern, &p.content)
                    || like_matches(pattern, &p.category)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, content: &str, category: &str) -> Post {
        Post {
            title: title.into(),
            content: content.into(),
            category: category.into(),
            tags: Some("[]".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids_and_equal_timestamps() {
        let repo = InMemoryPostRepository::new();

        let first = repo.save(post("a", "b", "c")).await.unwrap();
        let second = repo.save(post("d", "e", "f")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert!(first.created_at.is_some());
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_update_refreshes_only_updated_at() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.save(post("a", "b", "c")).await.unwrap();

        let mut changed = saved.clone();
        changed.title = "a2".into();
        changed.created_at = None;
        let updated = repo.save(changed).await.unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.created_at, saved.created_at);
        assert!(updated.updated_at >= saved.updated_at);
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().title, "a2");
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryPostRepository::new();
        repo.save(post("a", "b", "c")).await.unwrap();

        repo.delete(1).await.unwrap();
        repo.delete(1).await.unwrap();
        repo.delete(999).await.unwrap();
        assert!(repo.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryPostRepository::new();
        repo.save(post("a", "b", "c")).await.unwrap();
        repo.delete(1).await.unwrap();

        let next = repo.save(post("d", "e", "f")).await.unwrap();
        assert_eq!(next.id, Some(2));
    }

    #[tokio::test]
    async fn test_search_checks_all_three_columns() {
        let repo = InMemoryPostRepository::new();
        repo.save(post("rust tips", "x", "x")).await.unwrap();
        repo.save(post("x", "about rust", "x")).await.unwrap();
        repo.save(post("x", "x", "rustlang")).await.unwrap();
        repo.save(post("Rust", "go", "go")).await.unwrap();

        let found = repo.find_by_search_term("%rust%").await.unwrap();
        let ids: Vec<_> = found.iter().filter_map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
