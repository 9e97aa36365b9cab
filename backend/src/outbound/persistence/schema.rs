//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Unique, lowercased contact address.
        email -> Varchar,
        /// Bcrypt-encoded password hash.
        password_hash -> Text,
        /// Registration time.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Journal posts, each owned by one user.
    posts (id) {
        /// Primary key.
        id -> Uuid,
        /// Owning user; cascades on account deletion.
        author_id -> Uuid,
        /// Post title (max 200 characters).
        title -> Varchar,
        /// Post body.
        content -> Text,
        /// Creation time.
        created_at -> Timestamptz,
        /// Last edit time.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::allow_tables_to_appear_in_same_query!(users, posts);
