/*
 * Responsibility
 * - Boards の request/response DTO
 * - 公開 ID を返す場合は、encode 済みの値を返す (内部 ID を漏らさない)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::board_service::{CreateBoard, StatusResult, UpdateBoard};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_CONTENT_CHARS: usize = 10_000;

fn check_title(title: &str) -> Result<(), &'static str> {
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err("title must be <= 200 chars");
    }
    Ok(())
}

fn check_content(content: &str) -> Result<(), &'static str> {
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err("content must be <= 10000 chars");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
    pub content: String,
}

impl CreateBoardRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.content.trim().is_empty() {
            return Err("content is required");
        }
        check_title(&self.title)?;
        check_content(&self.content)
    }
}

impl From<CreateBoardRequest> for CreateBoard {
    fn from(req: CreateBoardRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBoardRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateBoardRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err("title cannot be empty");
            }
            check_title(title)?;
        }
        if let Some(content) = &self.content {
            if content.trim().is_empty() {
                return Err("content cannot be empty");
            }
            check_content(content)?;
        }

        Ok(())
    }
}

impl From<UpdateBoardRequest> for UpdateBoard {
    fn from(req: UpdateBoardRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub id: String, // encoded
    pub title: String,
    pub content: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub code: u16,
    pub message: String,
}

impl From<StatusResult> for StatusResponse {
    fn from(status: StatusResult) -> Self {
        Self {
            code: status.code,
            message: status.message.to_string(),
        }
    }
}
