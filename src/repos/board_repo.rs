/*
 * Responsibility
 * - boards テーブル向けの storage collaborator
 * - 読み取り (insert/find/list) は pool から直接、更新・削除は BoardTx 経由のみ
 * - BoardTx は commit() しないまま drop されると rollback される
 */
use async_trait::async_trait;
use chrono::{DateTime, Timelike, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{Board, NewBoard, Username};
use crate::repos::error::RepoError;

/// Storage for boards.
///
/// Implementations must be cheap to share (`Arc<dyn BoardRepo>`).
#[async_trait]
pub trait BoardRepo: Send + Sync {
    /// Persist a new board. Storage assigns the id; both timestamps are the same instant.
    async fn insert(&self, board: NewBoard) -> Result<Board, RepoError>;

    async fn find_by_id(&self, board_id: i64) -> Result<Option<Board>, RepoError>;

    /// Every board, newest first.
    async fn list_by_created_desc(&self) -> Result<Vec<Board>, RepoError>;

    /// Open a scoped transaction for read-modify-write paths.
    async fn begin(&self) -> Result<Box<dyn BoardTx>, RepoError>;
}

/// A unit of work over boards.
///
/// Nothing done through it is visible to other callers until `commit()`.
#[async_trait]
pub trait BoardTx: Send {
    /// Load a board and hold it against concurrent writers until the transaction ends.
    async fn find_by_id_for_update(&mut self, board_id: i64) -> Result<Option<Board>, RepoError>;

    async fn update(&mut self, board: &Board) -> Result<Board, RepoError>;

    async fn delete(&mut self, board_id: i64) -> Result<(), RepoError>;

    async fn commit(self: Box<Self>) -> Result<(), RepoError>;
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct BoardRow {
    #[sqlx(rename = "boardId")]
    board_id: i64,

    title: String,
    content: String,
    username: String,

    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,

    #[sqlx(rename = "modifiedAt")]
    modified_at: DateTime<Utc>,
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Self {
        Board::from_parts(
            row.board_id,
            row.title,
            row.content,
            Username::new(row.username),
            row.created_at,
            row.modified_at,
        )
    }
}

/// Timestamps come from the application clock only (inserts here, updates in
/// `Board::update`), truncated to the microseconds Postgres stores.
pub fn stamp_now() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

#[derive(Clone, Debug)]
pub struct PgBoardRepo {
    pool: PgPool,
}

impl PgBoardRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BoardRepo for PgBoardRepo {
    async fn insert(&self, board: NewBoard) -> Result<Board, RepoError> {
        let row = sqlx::query_as::<_, BoardRow>(
            r#"
            INSERT INTO boards (title, content, username, "createdAt", "modifiedAt")
            VALUES ($1, $2, $3, $4, $4)
            RETURNING
                "boardId", title, content, username, "createdAt", "modifiedAt"
            "#,
        )
        .bind(&board.title)
        .bind(&board.content)
        .bind(board.username.as_str())
        .bind(stamp_now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, board_id: i64) -> Result<Option<Board>, RepoError> {
        let row = sqlx::query_as::<_, BoardRow>(
            r#"
            SELECT
                "boardId", title, content, username, "createdAt", "modifiedAt"
            FROM boards
            WHERE "boardId" = $1
            "#,
        )
        .bind(board_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Board::from))
    }

    async fn list_by_created_desc(&self) -> Result<Vec<Board>, RepoError> {
        let rows = sqlx::query_as::<_, BoardRow>(
            r#"
            SELECT
                "boardId", title, content, username, "createdAt", "modifiedAt"
            FROM boards
            ORDER BY "createdAt" DESC, "boardId" DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Board::from).collect())
    }

    async fn begin(&self) -> Result<Box<dyn BoardTx>, RepoError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgBoardTx { tx }))
    }
}

pub struct PgBoardTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl BoardTx for PgBoardTx {
    async fn find_by_id_for_update(&mut self, board_id: i64) -> Result<Option<Board>, RepoError> {
        let row = sqlx::query_as::<_, BoardRow>(
            r#"
            SELECT
                "boardId", title, content, username, "createdAt", "modifiedAt"
            FROM boards
            WHERE "boardId" = $1
            FOR UPDATE
            "#,
        )
        .bind(board_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(Board::from))
    }

    async fn update(&mut self, board: &Board) -> Result<Board, RepoError> {
        // username / createdAt are never written back
        let row = sqlx::query_as::<_, BoardRow>(
            r#"
            UPDATE boards
            SET
                title = $2,
                content = $3,
                "modifiedAt" = $4
            WHERE "boardId" = $1
            RETURNING
                "boardId", title, content, username, "createdAt", "modifiedAt"
            "#,
        )
        .bind(board.id())
        .bind(board.title())
        .bind(board.content())
        .bind(board.modified_at())
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(row.into())
    }

    async fn delete(&mut self, board_id: i64) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            DELETE FROM boards
            WHERE "boardId" = $1
            "#,
        )
        .bind(board_id)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        self.tx.commit().await?;
        Ok(())
    }
}
