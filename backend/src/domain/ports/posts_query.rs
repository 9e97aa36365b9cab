//! Driving port for post reads.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostId, UserId};

/// Domain use-case port for reading an author's posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// Posts owned by `author`, newest first.
    async fn list_for_author(&self, author: &UserId) -> Result<Vec<Post>, Error>;

    /// A single post owned by `author`.
    ///
    /// Fails with [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound)
    /// when the post is absent or owned by someone else.
    async fn find_for_author(&self, author: &UserId, id: &PostId) -> Result<Post, Error>;
}
