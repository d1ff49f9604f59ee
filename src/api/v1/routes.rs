/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /boards
 * - 認証はルート単位では掛けない (作者の解決が必要なユースケースだけ BoardService が token を検証する)
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{
    boards::{create_board, delete_board, get_board, list_boards, update_board},
    health::health,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/boards", get(list_boards).post(create_board))
        .route(
            "/boards/{board_id}",
            get(get_board).put(update_board).delete(delete_board),
        )
}
