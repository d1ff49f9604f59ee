/**
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - decode ロジック / extractor 実装はここに置かない (core.rs)
 */
use super::core::PublicId;

// boards
pub enum BoardTag {}
pub type PublicBoardId = PublicId<BoardTag>;
