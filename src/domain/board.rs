/*
 * Responsibility
 * - Board エンティティと、作者を表す Username
 * - 作者 (username) と作成日時は生成時に一度だけ決まり、以後は変更できない
 * - 変更は update() 経由のみ (modifiedAt も同時に進める)
 */
use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

/// Subject recovered from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A board that has not been persisted yet (no id, no timestamps).
#[derive(Debug, Clone)]
pub struct NewBoard {
    pub title: String,
    pub content: String,
    pub username: Username,
}

/// A persisted post.
///
/// Fields are private so `username`, `id` and `created_at` can only be set
/// through [`Board::from_parts`] (storage) and never reassigned afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    id: i64,
    title: String,
    content: String,
    username: Username,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl Board {
    /// Rebuild a board from its stored representation.
    pub fn from_parts(
        id: i64,
        title: String,
        content: String,
        username: Username,
        created_at: DateTime<Utc>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            username,
            created_at,
            modified_at,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    pub fn is_authored_by(&self, username: &Username) -> bool {
        &self.username == username
    }

    /// Overwrite title/content. `None` keeps the current value.
    pub fn update(&mut self, title: Option<String>, content: Option<String>, now: DateTime<Utc>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        // Storage keeps microseconds; a lagging or coarse clock still has to move modifiedAt forward.
        self.modified_at = now.max(self.modified_at + TimeDelta::microseconds(1));
    }
}
