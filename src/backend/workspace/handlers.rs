/**
 * Board and List Handlers
 *
 * Every route here sits behind the authentication gate. Each handler asks
 * the resource's policy before touching the store, and a denied decision
 * is reported as 404 so that other users' ids look exactly like ids that do
 * not exist.
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::workspace::models::{Board, BoardRequest, List};

const BOARD_NOT_FOUND: &str = "board not found";
const LIST_NOT_FOUND: &str = "list not found";

/// Parse a positive integer path id
fn parse_id(raw: &str, message: &'static str) -> Result<i64, BackendError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(BackendError::validation(message)),
    }
}

fn parse_board_id(raw: &str) -> Result<i64, BackendError> {
    parse_id(raw, "invalid board id")
}

/// Turn a denied decision into a 404
fn require(allowed: bool, not_found: &'static str) -> Result<(), BackendError> {
    if allowed {
        Ok(())
    } else {
        Err(BackendError::not_found(not_found))
    }
}

/// GET /boards
pub async fn index(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Board>>, BackendError> {
    let boards = state.boards.list_boards(user.id).await.map_err(|e| {
        tracing::error!(user_id = user.id, error = %e, "Failed to list boards");
        e
    })?;

    Ok(Json(boards))
}

/// POST /boards
pub async fn store(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<BoardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Board>), BackendError> {
    let Json(request) = payload?;
    let input = request.validate()?;

    require(state.board_policy.can_create(&user, 0).await?, BOARD_NOT_FOUND)?;

    let board = state.boards.create_board(user.id, &input).await.map_err(|e| {
        tracing::error!(user_id = user.id, error = %e, "Failed to create board");
        e
    })?;

    tracing::info!(user_id = user.id, board_id = board.id, "Board created");
    Ok((StatusCode::CREATED, Json(board)))
}

/// GET /boards/{id}
pub async fn show(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Board>, BackendError> {
    let id = parse_board_id(&id)?;
    require(state.board_policy.can_view(&user, id).await?, BOARD_NOT_FOUND)?;

    let board = state.boards.get_board(id).await.map_err(|e| {
        tracing::error!(user_id = user.id, board_id = id, error = %e, "Failed to get board");
        e
    })?;

    board.map(Json).ok_or_else(|| BackendError::not_found(BOARD_NOT_FOUND))
}

/// PUT /boards/{id}
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<BoardRequest>, JsonRejection>,
) -> Result<Json<Board>, BackendError> {
    let id = parse_board_id(&id)?;
    let Json(request) = payload?;
    let input = request.validate()?;

    require(state.board_policy.can_update(&user, id).await?, BOARD_NOT_FOUND)?;

    let board = state.boards.update_board(id, &input).await.map_err(|e| {
        tracing::error!(user_id = user.id, board_id = id, error = %e, "Failed to update board");
        e
    })?;

    board.map(Json).ok_or_else(|| BackendError::not_found(BOARD_NOT_FOUND))
}

/// DELETE /boards/{id}
pub async fn destroy(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, BackendError> {
    let id = parse_board_id(&id)?;
    require(state.board_policy.can_delete(&user, id).await?, BOARD_NOT_FOUND)?;

    let deleted = state.boards.delete_board(id).await.map_err(|e| {
        tracing::error!(user_id = user.id, board_id = id, error = %e, "Failed to delete board");
        e
    })?;
    require(deleted, BOARD_NOT_FOUND)?;

    tracing::info!(user_id = user.id, board_id = id, "Board deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /boards/{board_id}/lists
pub async fn list_index(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<String>,
) -> Result<Json<Vec<List>>, BackendError> {
    let board_id = parse_board_id(&board_id)?;
    require(state.board_policy.can_view(&user, board_id).await?, BOARD_NOT_FOUND)?;

    let lists = state.boards.lists_for_board(board_id).await.map_err(|e| {
        tracing::error!(user_id = user.id, board_id, error = %e, "Failed to get lists for board");
        e
    })?;

    Ok(Json(lists))
}

/// GET /boards/{board_id}/lists/{id}
pub async fn list_show(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((board_id, id)): Path<(String, String)>,
) -> Result<Json<List>, BackendError> {
    let board_id = parse_board_id(&board_id)?;
    let id = parse_id(&id, "invalid list id")?;
    require(state.list_policy.can_view(&user, id).await?, LIST_NOT_FOUND)?;

    let list = state.boards.get_list(id).await.map_err(|e| {
        tracing::error!(user_id = user.id, list_id = id, error = %e, "Failed to get list");
        e
    })?;

    list.filter(|list| list.board_id == board_id)
        .map(Json)
        .ok_or_else(|| BackendError::not_found(LIST_NOT_FOUND))
}
