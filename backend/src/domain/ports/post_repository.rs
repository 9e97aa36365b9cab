//! Port for post persistence.
//!
//! Every method that touches an existing post takes the author as well as
//! the post id, so adapters cannot express an unscoped lookup.

use async_trait::async_trait;

use crate::domain::{Post, PostDraft, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// The author referenced by a new post does not exist.
        AuthorMissing => "post author does not exist",
    }
}

/// Port for reading and writing posts scoped to their author.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post.
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError>;

    /// Fetch a post only if `author` owns it.
    async fn find_owned(
        &self,
        id: &PostId,
        author: &UserId,
    ) -> Result<Option<Post>, PostRepositoryError>;

    /// All posts owned by `author`, newest first.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostRepositoryError>;

    /// Replace title and content of an owned post. Returns the updated post,
    /// or `None` when no post with that id belongs to `author`.
    async fn update_owned(
        &self,
        id: &PostId,
        author: &UserId,
        draft: &PostDraft,
        updated_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<Post>, PostRepositoryError>;

    /// Delete an owned post. Returns whether a row was removed.
    async fn delete_owned(&self, id: &PostId, author: &UserId)
        -> Result<bool, PostRepositoryError>;
}
