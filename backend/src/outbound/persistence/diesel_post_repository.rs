//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Every statement on an existing post filters on both `id` and `author_id`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{Post, PostDraft, PostId, UserId};

use super::diesel_error_mapping::{DieselFailure, POST_AUTHOR_CONSTRAINT, classify};
use super::models::{PostRow, PostUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed post store.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    PostRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    match classify(error) {
        DieselFailure::Connection(message) => PostRepositoryError::connection(message),
        DieselFailure::ForeignKeyViolation { constraint }
            if constraint.as_deref() == Some(POST_AUTHOR_CONSTRAINT) =>
        {
            PostRepositoryError::author_missing()
        }
        DieselFailure::ForeignKeyViolation { .. } => {
            PostRepositoryError::query("foreign key violated")
        }
        DieselFailure::UniqueViolation { .. } => {
            PostRepositoryError::query("unique constraint violated")
        }
        DieselFailure::Query(message) => PostRepositoryError::query(message),
    }
}

fn row_to_post(row: PostRow) -> Post {
    Post {
        id: PostId::from_uuid(row.id),
        author: UserId::from_uuid(row.author_id),
        title: row.title,
        content: row.content,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn post_to_row(post: &Post) -> PostRow {
    PostRow {
        id: *post.id.as_uuid(),
        author_id: *post.author.as_uuid(),
        title: post.title.clone(),
        content: post.content.clone(),
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(posts::table)
            .values(&post_to_row(post))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_owned(
        &self,
        id: &PostId,
        author: &UserId,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        posts::table
            .filter(posts::id.eq(*id.as_uuid()))
            .filter(posts::author_id.eq(*author.as_uuid()))
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_post))
            .map_err(map_diesel_error)
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        posts::table
            .filter(posts::author_id.eq(*author.as_uuid()))
            .order((posts::created_at.desc(), posts::id.desc()))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(row_to_post).collect())
            .map_err(map_diesel_error)
    }

    async fn update_owned(
        &self,
        id: &PostId,
        author: &UserId,
        draft: &PostDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = PostUpdate {
            title: draft.title(),
            content: draft.content(),
            updated_at,
        };
        diesel::update(
            posts::table
                .filter(posts::id.eq(*id.as_uuid()))
                .filter(posts::author_id.eq(*author.as_uuid())),
        )
        .set(&changes)
        .returning(PostRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map(|row| row.map(row_to_post))
        .map_err(map_diesel_error)
    }

    async fn delete_owned(
        &self,
        id: &PostId,
        author: &UserId,
    ) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(
            posts::table
                .filter(posts::id.eq(*id.as_uuid()))
                .filter(posts::author_id.eq(*author.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map(|removed| removed > 0)
        .map_err(map_diesel_error)
    }
}
