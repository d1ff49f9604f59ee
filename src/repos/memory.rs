//! In-memory `BoardRepo` for tests.
//!
//! A transaction holds the store lock from `begin()` until it is committed or
//! dropped, and stages its writes; readers therefore never see a half-applied
//! update, and dropping without `commit()` discards everything.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{Board, NewBoard};
use crate::repos::board_repo::stamp_now;
use crate::repos::{BoardRepo, BoardTx, RepoError};

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i64,
    rows: BTreeMap<i64, Board>,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryBoardRepo {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBoardRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoardRepo for MemoryBoardRepo {
    async fn insert(&self, board: NewBoard) -> Result<Board, RepoError> {
        let mut state = self.state.lock().await;
        state.next_id += 1;

        let now = stamp_now();
        let stored = Board::from_parts(
            state.next_id,
            board.title,
            board.content,
            board.username,
            now,
            now,
        );
        state.rows.insert(stored.id(), stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, board_id: i64) -> Result<Option<Board>, RepoError> {
        Ok(self.state.lock().await.rows.get(&board_id).cloned())
    }

    async fn list_by_created_desc(&self) -> Result<Vec<Board>, RepoError> {
        let state = self.state.lock().await;
        let mut boards: Vec<Board> = state.rows.values().cloned().collect();
        boards.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(boards)
    }

    async fn begin(&self) -> Result<Box<dyn BoardTx>, RepoError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        Ok(Box::new(MemoryBoardTx {
            guard,
            staged: BTreeMap::new(),
        }))
    }
}

struct MemoryBoardTx {
    guard: OwnedMutexGuard<MemoryState>,
    // None = deleted in this transaction
    staged: BTreeMap<i64, Option<Board>>,
}

#[async_trait]
impl BoardTx for MemoryBoardTx {
    async fn find_by_id_for_update(&mut self, board_id: i64) -> Result<Option<Board>, RepoError> {
        if let Some(staged) = self.staged.get(&board_id) {
            return Ok(staged.clone());
        }
        Ok(self.guard.rows.get(&board_id).cloned())
    }

    async fn update(&mut self, board: &Board) -> Result<Board, RepoError> {
        self.staged.insert(board.id(), Some(board.clone()));
        Ok(board.clone())
    }

    async fn delete(&mut self, board_id: i64) -> Result<(), RepoError> {
        self.staged.insert(board_id, None);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let MemoryBoardTx { mut guard, staged } = *self;
        for (board_id, board) in staged {
            match board {
                Some(board) => {
                    guard.rows.insert(board_id, board);
                }
                None => {
                    guard.rows.remove(&board_id);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use chrono::Utc;

    use super::*;
    use crate::domain::Username;

    fn new_board(title: &str) -> NewBoard {
        NewBoard {
            title: title.to_string(),
            content: "body".to_string(),
            username: Username::new("alice"),
        }
    }

    #[tokio::test]
    async fn dropped_transaction_discards_staged_writes() {
        let repo = MemoryBoardRepo::new();
        let created = repo.insert(new_board("Hello")).await.unwrap();

        {
            let mut tx = repo.begin().await.unwrap();
            let mut board = tx.find_by_id_for_update(created.id()).await.unwrap().unwrap();
            board.update(Some("changed".to_string()), None, Utc::now());
            tx.update(&board).await.unwrap();
            tx.delete(created.id()).await.unwrap();
        }

        let stored = repo.find_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn readers_wait_for_open_transaction() {
        let repo = MemoryBoardRepo::new();
        let created = repo.insert(new_board("Hello")).await.unwrap();

        let mut tx = repo.begin().await.unwrap();
        let mut board = tx.find_by_id_for_update(created.id()).await.unwrap().unwrap();
        board.update(Some("Hi".to_string()), None, Utc::now());
        tx.update(&board).await.unwrap();

        let reader = {
            let repo = repo.clone();
            let board_id = created.id();
            tokio::spawn(async move { repo.find_by_id(board_id).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!reader.is_finished());

        tx.commit().await.unwrap();
        let seen = reader.await.unwrap().unwrap().unwrap();
        assert_eq!(seen.title(), "Hi");
    }

    #[tokio::test]
    async fn ids_are_unique_and_list_is_newest_first() {
        let repo = MemoryBoardRepo::new();
        let first = repo.insert(new_board("first")).await.unwrap();
        let second = repo.insert(new_board("second")).await.unwrap();
        let third = repo.insert(new_board("third")).await.unwrap();

        let ids: Vec<i64> = repo
            .list_by_created_desc()
            .await
            .unwrap()
            .iter()
            .map(Board::id)
            .collect();

        assert_eq!(ids, vec![third.id(), second.id(), first.id()]);
    }
}
