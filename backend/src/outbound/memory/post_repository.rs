//! In-memory `PostRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{Post, PostDraft, PostId, UserId};

/// Post store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<PostId, Post>>,
}

impl InMemoryPostRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(PostRepositoryError::query("post id already exists"));
        }
        posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn find_owned(
        &self,
        id: &PostId,
        author: &UserId,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let posts = self.posts.read().await;
        Ok(posts.get(id).filter(|post| post.author == *author).cloned())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostRepositoryError> {
        let posts = self.posts.read().await;
        let mut owned: Vec<Post> = posts
            .values()
            .filter(|post| post.author == *author)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });
        Ok(owned)
    }

    async fn update_owned(
        &self,
        id: &PostId,
        author: &UserId,
        draft: &PostDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.get_mut(id).filter(|post| post.author == *author) else {
            return Ok(None);
        };
        draft.title().clone_into(&mut post.title);
        draft.content().clone_into(&mut post.content);
        post.updated_at = updated_at;
        Ok(Some(post.clone()))
    }

    async fn delete_owned(
        &self,
        id: &PostId,
        author: &UserId,
    ) -> Result<bool, PostRepositoryError> {
        let mut posts = self.posts.write().await;
        let owned = posts.get(id).is_some_and(|post| post.author == *author);
        if owned {
            posts.remove(id);
        }
        Ok(owned)
    }
}
