/*
 * Responsibility
 * - /boards 系 CRUD handler
 * - Path の {board_id} は公開 ID → extractor で復号して内部 ID で受け取る
 * - DTO validation → BoardService 呼び出し → 公開 ID に encode してレスポンス
 * - bearer token は検証せずに BoardService に渡す (作者の解決はサービス側)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::boards::{BoardResponse, CreateBoardRequest, StatusResponse, UpdateBoardRequest},
        extractors::{AppJson, BearerToken, PublicBoardId},
    },
    domain::Board,
    error::AppError,
    state::AppState,
};

fn to_response(state: &AppState, board: Board) -> Result<BoardResponse, AppError> {
    let public_id = state.id_codec.encode(board.id())?;

    Ok(BoardResponse {
        id: public_id,
        title: board.title().to_string(),
        content: board.content().to_string(),
        username: board.username().to_string(),
        created_at: board.created_at(),
        modified_at: board.modified_at(),
    })
}

pub async fn list_boards(
    State(state): State<AppState>,
) -> Result<Json<Vec<BoardResponse>>, AppError> {
    let boards = state.boards.list().await?;

    let res = boards
        .into_iter()
        .map(|board| to_response(&state, board))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(res))
}

pub async fn create_board(
    State(state): State<AppState>,
    token: BearerToken,
    AppJson(req): AppJson<CreateBoardRequest>,
) -> Result<(StatusCode, Json<BoardResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))?;

    let board = state.boards.create(req.into(), token.as_deref()).await?;

    Ok((StatusCode::CREATED, Json(to_response(&state, board)?)))
}

pub async fn get_board(
    State(state): State<AppState>,
    board_id: PublicBoardId,
) -> Result<Json<BoardResponse>, AppError> {
    let board = state.boards.get(board_id.id).await?;

    Ok(Json(to_response(&state, board)?))
}

pub async fn update_board(
    State(state): State<AppState>,
    board_id: PublicBoardId,
    token: BearerToken,
    AppJson(req): AppJson<UpdateBoardRequest>,
) -> Result<Json<BoardResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))?;

    let board = state
        .boards
        .update(board_id.id, req.into(), token.as_deref())
        .await?;

    Ok(Json(to_response(&state, board)?))
}

pub async fn delete_board(
    State(state): State<AppState>,
    board_id: PublicBoardId,
    token: BearerToken,
) -> Result<Json<StatusResponse>, AppError> {
    let status = state.boards.delete(board_id.id, token.as_deref()).await?;

    Ok(Json(status.into()))
}
