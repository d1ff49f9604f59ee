/*
 * Responsibility
 * - 永続化層 (storage collaborator) の公開インターフェース
 */
pub mod board_repo;
pub mod error;
#[cfg(test)]
pub mod memory;

pub use board_repo::{BoardRepo, BoardTx, PgBoardRepo};
pub use error::RepoError;
