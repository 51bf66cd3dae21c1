use std::sync::Arc;

use quill_shared::{PostRequest, PostResponse};

use crate::domain::PostId;
use crate::error::DomainError;
use crate::mapper;
use crate::ports::PostRepository;

/// CRUD flows for posts. Input is assumed validated by the caller.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, request: &PostRequest) -> Result<PostResponse, DomainError> {
        let entity = mapper::request_to_entity(request)?;
        let saved = self.repo.save(entity).await?;
        tracing::info!(post_id = ?saved.id, "Post created");

        mapper::entity_to_response(saved)
    }

    pub async fn get_by_id(&self, id: PostId) -> Result<PostResponse, DomainError> {
        tracing::debug!(post_id = id, "Fetching post");

        let entity = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { id })?;

        mapper::entity_to_response(entity)
    }

    /// A blank or missing term lists everything. Any other term is searched
    /// as given, surrounding whitespace included.
    pub async fn list(&self, search_term: Option<&str>) -> Result<Vec<PostResponse>, DomainError> {
        let entities = match search_term.filter(|t| !t.trim().is_empty()) {
            Some(term) => {
                tracing::debug!(term, "Searching posts");
                self.repo.find_by_search_term(&format!("%{term}%")).await?
            }
            None => self.repo.find_all().await?,
        };

        mapper::list_to_responses(entities)
    }

    /// Replace every mutable field of an existing post.
    ///
    /// The response is built from what `save` returns, so `updated_at` is the
    /// store's refreshed value.
    pub async fn update(
        &self,
        request: &PostRequest,
        id: PostId,
    ) -> Result<PostResponse, DomainError> {
        let incoming = mapper::request_to_entity(request)?;
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { id })?;

        let merged = mapper::merge_for_update(incoming, existing);
        let saved = self.repo.save(merged).await?;
        tracing::info!(post_id = id, "Post updated");

        mapper::entity_to_response(saved)
    }

    pub async fn delete(&self, id: PostId) -> Result<(), DomainError> {
        self.repo.delete(id).await?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;
    use crate::domain::Post;
    use crate::error::RepoError;
    use crate::ports::BaseRepository;

    /// Map-backed repository whose clock advances one second per save.
    #[derive(Default)]
    struct FakeRepo {
        rows: Mutex<BTreeMap<PostId, Post>>,
        saves: AtomicUsize,
        searches: Mutex<Vec<String>>,
    }

    impl FakeRepo {
        fn tick(&self) -> DateTime<Utc> {
            let n = self.saves.fetch_add(1, Ordering::SeqCst) as i64;
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::seconds(n)
        }

        fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BaseRepository<Post, PostId> for FakeRepo {
        async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, mut entity: Post) -> Result<Post, RepoError> {
            let now = self.tick();
            let mut rows = self.rows.lock().unwrap();
            let id = entity
                .id
                .unwrap_or_else(|| rows.keys().next_back().copied().unwrap_or(0) + 1);
            entity.id = Some(id);
            entity.created_at.get_or_insert(now);
            entity.updated_at = Some(now);
            rows.insert(id, entity.clone());
            Ok(entity)
        }

        async fn delete(&self, id: PostId) -> Result<(), RepoError> {
            self.rows.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for FakeRepo {
        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn find_by_search_term(&self, pattern: &str) -> Result<Vec<Post>, RepoError> {
            self.searches.lock().unwrap().push(pattern.to_string());
            let needle = pattern.trim_matches('%');
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|p| {
                    p.title.contains(needle)
                        || p.content.contains(needle)
                        || p.category.contains(needle)
                })
                .cloned()
                .collect())
        }
    }

    fn service() -> (PostService, Arc<FakeRepo>) {
        let repo = Arc::new(FakeRepo::default());
        (PostService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let (svc, _) = service();
        let res = svc
            .create(&PostRequest::new("A", "B", "C", ["x", "y"]))
            .await
            .unwrap();

        assert!(res.id.is_some());
        assert_eq!(res.created_at, res.updated_at);
        assert_eq!(res.tags, BTreeSet::from(["x".to_string(), "y".to_string()]));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let (svc, _) = service();
        let err = svc.get_by_id(404).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 404 }));
    }

    #[tokio::test]
    async fn test_update_unknown_id_does_not_save() {
        let (svc, repo) = service();
        let err = svc
            .update(&PostRequest::new("A", "B", "C", ["x"]), 77)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { id: 77 }));
        assert_eq!(repo.save_count(), 0);
    }

    #[tokio::test]
    async fn test_update_preserves_identity_and_reports_saved_timestamp() {
        let (svc, _) = service();
        let created = svc
            .create(&PostRequest::new("A", "B", "C", ["x"]))
            .await
            .unwrap();
        let id = created.id.unwrap();

        let updated = svc
            .update(&PostRequest::new("A2", "B2", "C2", ["z"]), id)
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.title, "A2");
        assert_eq!(updated.content, "B2");
        assert_eq!(updated.category, "C2");
        assert_eq!(updated.tags, BTreeSet::from(["z".to_string()]));
    }

    #[tokio::test]
    async fn test_blank_term_lists_everything() {
        let (svc, _) = service();
        for title in ["one", "two"] {
            svc.create(&PostRequest::new(title, "body", "cat", ["t"]))
                .await
                .unwrap();
        }

        let all = svc.list(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(svc.list(Some("")).await.unwrap(), all);
        assert_eq!(svc.list(Some("   ")).await.unwrap(), all);
    }

    #[tokio::test]
    async fn test_term_matches_title_content_or_category() {
        let (svc, _) = service();
        for (title, content, category) in [
            ("needle in title", "x", "x"),
            ("x", "has a needle", "x"),
            ("x", "x", "needlework"),
            ("hay", "hay", "hay"),
        ] {
            svc.create(&PostRequest::new(title, content, category, ["t"]))
                .await
                .unwrap();
        }

        let found = svc.list(Some("needle")).await.unwrap();
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|p| p.title != "hay"));
    }

    #[tokio::test]
    async fn test_term_is_wrapped_without_trimming() {
        let (svc, repo) = service();
        for title in ["a rust b", "rustacean", "trust"] {
            svc.create(&PostRequest::new(title, "x", "x", ["t"]))
                .await
                .unwrap();
        }

        let found = svc.list(Some(" rust ")).await.unwrap();

        assert_eq!(*repo.searches.lock().unwrap(), vec!["% rust %".to_string()]);
        let titles: Vec<_> = found.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["a rust b"]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (svc, _) = service();
        let created = svc
            .create(&PostRequest::new("A", "B", "C", ["x"]))
            .await
            .unwrap();
        let id = created.id.unwrap();

        svc.delete(id).await.unwrap();
        svc.delete(id).await.unwrap();
        assert!(matches!(
            svc.get_by_id(id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
