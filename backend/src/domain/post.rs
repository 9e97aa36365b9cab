//! Journal posts and the drafts they are written from.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 200;
/// Maximum body length in characters.
pub const CONTENT_MAX: usize = 50_000;

/// Validation errors for post identifiers and drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// Identifier was not a UUID.
    InvalidId,
    /// Title was blank once trimmed.
    EmptyTitle,
    /// Title exceeded [`TITLE_MAX`] characters.
    TitleTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Body was blank once trimmed.
    EmptyContent,
    /// Body exceeded [`CONTENT_MAX`] characters.
    ContentTooLong {
        /// Maximum permitted length.
        max: usize,
    },
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "post id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyContent => write!(f, "content must not be empty"),
            Self::ContentTooLong { max } => {
                write!(f, "content must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for PostValidationError {}

/// Post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostId(Uuid);

impl PostId {
    /// Parse a post id from its string form, as found in a URL path.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PostValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| PostValidationError::InvalidId)
    }

    /// Generate a new random [`PostId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier already read from storage.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<PostId> for String {
    fn from(value: PostId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for PostId {
    type Error = PostValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Title and body submitted from the compose or edit form.
///
/// Authorship is deliberately absent: the author always comes from the
/// session, never from user input.
///
/// # Examples
/// ```
/// use journal::domain::PostDraft;
///
/// let draft = PostDraft::try_from_parts("Hi", "World").expect("valid draft");
/// assert_eq!(draft.title(), "Hi");
/// assert!(PostDraft::try_from_parts("  ", "World").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
}

impl PostDraft {
    /// Validate raw form values. The title is trimmed; the body is kept as typed.
    pub fn try_from_parts(title: &str, content: &str) -> Result<Self, PostValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(PostValidationError::TitleTooLong { max: TITLE_MAX });
        }
        if content.trim().is_empty() {
            return Err(PostValidationError::EmptyContent);
        }
        if content.chars().count() > CONTENT_MAX {
            return Err(PostValidationError::ContentTooLong { max: CONTENT_MAX });
        }
        Ok(Self {
            title: title.to_owned(),
            content: content.to_owned(),
        })
    }

    /// Post title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Post body.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

/// A stored post, owned by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Post identifier.
    pub id: PostId,
    /// Owning user.
    pub author: UserId,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post for `author` from a validated draft.
    #[must_use]
    pub fn compose(id: PostId, author: UserId, draft: PostDraft, now: DateTime<Utc>) -> Self {
        let PostDraft { title, content } = draft;
        Self {
            id,
            author,
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}
