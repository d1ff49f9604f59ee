/*
 * Responsibility
 * - HTTP/DB に依存しないドメイン型 (Board, Username)
 */
pub mod board;

pub use board::{Board, NewBoard, Username};
