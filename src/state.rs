/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - boards: BoardService (repo + identity extractor), id_codec: IdCodec
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use crate::services::{board_service::BoardService, id_codec::IdCodec};

#[derive(Clone)]
pub struct AppState {
    pub boards: BoardService,
    pub id_codec: IdCodec,
}

impl AppState {
    pub fn new(boards: BoardService, id_codec: IdCodec) -> Self {
        Self { boards, id_codec }
    }
}
