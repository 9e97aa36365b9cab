//! Driving port for post mutations.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostDraft, PostId, UserId};

/// Domain use-case port for writing posts on behalf of their author.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Create a post owned by `author`.
    async fn create(&self, author: &UserId, draft: PostDraft) -> Result<Post, Error>;

    /// Replace title and content of a post `author` owns.
    ///
    /// Fails with [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound)
    /// when the post is absent or owned by someone else.
    async fn update(&self, author: &UserId, id: &PostId, draft: PostDraft)
        -> Result<Post, Error>;

    /// Delete a post `author` owns. Deleting an absent post succeeds.
    async fn delete(&self, author: &UserId, id: &PostId) -> Result<(), Error>;
}
