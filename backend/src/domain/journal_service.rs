//! Journal domain service.
//!
//! Implements the post driving ports. Every repository call is scoped by
//! the author handed in by the HTTP layer, so a caller can only ever reach
//! their own posts.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{PostRepository, PostRepositoryError, PostsCommand, PostsQuery};
use crate::domain::{Error, Post, PostDraft, PostId, UserId};

/// Message used whenever a post is missing or belongs to someone else.
pub const POST_NOT_FOUND_MESSAGE: &str = "Post not found";

fn map_repository_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
        PostRepositoryError::AuthorMissing => Error::unauthorized("account no longer exists"),
    }
}

/// Journal service implementing post command and query ports.
#[derive(Clone)]
pub struct JournalService<R> {
    posts: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> JournalService<R> {
    /// Create a new service over a post repository and clock.
    pub fn new(posts: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { posts, clock }
    }
}

#[async_trait]
impl<R> PostsCommand for JournalService<R>
where
    R: PostRepository,
{
    async fn create(&self, author: &UserId, draft: PostDraft) -> Result<Post, Error> {
        let post = Post::compose(PostId::random(), *author, draft, self.clock.utc());
        self.posts
            .insert(&post)
            .await
            .map_err(map_repository_error)?;
        debug!(post_id = %post.id, author = %author, "post created");
        Ok(post)
    }

    async fn update(
        &self,
        author: &UserId,
        id: &PostId,
        draft: PostDraft,
    ) -> Result<Post, Error> {
        self.posts
            .update_owned(id, author, &draft, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND_MESSAGE))
    }

    async fn delete(&self, author: &UserId, id: &PostId) -> Result<(), Error> {
        let removed = self
            .posts
            .delete_owned(id, author)
            .await
            .map_err(map_repository_error)?;
        debug!(post_id = %id, author = %author, removed, "post delete");
        Ok(())
    }
}

#[async_trait]
impl<R> PostsQuery for JournalService<R>
where
    R: PostRepository,
{
    async fn list_for_author(&self, author: &UserId) -> Result<Vec<Post>, Error> {
        self.posts
            .list_by_author(author)
            .await
            .map_err(map_repository_error)
    }

    async fn find_for_author(&self, author: &UserId, id: &PostId) -> Result<Post, Error> {
        self.posts
            .find_owned(id, author)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND_MESSAGE))
    }
}

#[cfg(test)]
#[path = "journal_service_tests.rs"]
mod tests;
