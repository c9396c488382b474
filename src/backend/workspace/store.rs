/**
 * Workspace Store
 *
 * Persistence for boards and lists. Lookups here are by id only: the caller
 * has already passed the ownership policy for that id. A resource deleted
 * between the policy check and the lookup comes back as `None`.
 */

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use sqlx::PgPool;

use crate::backend::error::StoreError;
use crate::backend::policy::{OwnershipStore, ResourceKind};
use crate::backend::workspace::models::{Board, BoardInput, List};

/// Board and list persistence
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// All boards owned by a user, oldest first
    async fn list_boards(&self, user_id: i64) -> Result<Vec<Board>, StoreError>;

    /// Create a board owned by `user_id`
    async fn create_board(&self, user_id: i64, input: &BoardInput) -> Result<Board, StoreError>;

    async fn get_board(&self, id: i64) -> Result<Option<Board>, StoreError>;

    /// Replace a board's name and description
    async fn update_board(&self, id: i64, input: &BoardInput) -> Result<Option<Board>, StoreError>;

    /// Delete a board and its lists; `false` if it did not exist
    async fn delete_board(&self, id: i64) -> Result<bool, StoreError>;

    /// Lists on a board ordered by position
    async fn lists_for_board(&self, board_id: i64) -> Result<Vec<List>, StoreError>;

    async fn get_list(&self, id: i64) -> Result<Option<List>, StoreError>;
}

/// PostgreSQL-backed workspace store
#[derive(Debug, Clone)]
pub struct PgBoardStore {
    pool: PgPool,
}

impl PgBoardStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const BOARD_COLUMNS: &str = "id, name, description, user_id, created_at, updated_at";
const LIST_COLUMNS: &str = "id, name, board_id, position, created_at, updated_at";

#[async_trait]
impl BoardStore for PgBoardStore {
    async fn list_boards(&self, user_id: i64) -> Result<Vec<Board>, StoreError> {
        let boards = sqlx::query_as::<_, Board>(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(boards)
    }

    async fn create_board(&self, user_id: i64, input: &BoardInput) -> Result<Board, StoreError> {
        let now = Utc::now();

        let board = sqlx::query_as::<_, Board>(&format!(
            r#"
            INSERT INTO boards (name, description, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {BOARD_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(user_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(board)
    }

    async fn get_board(&self, id: i64) -> Result<Option<Board>, StoreError> {
        let board = sqlx::query_as::<_, Board>(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(board)
    }

    async fn update_board(&self, id: i64, input: &BoardInput) -> Result<Option<Board>, StoreError> {
        let board = sqlx::query_as::<_, Board>(&format!(
            r#"
            UPDATE boards
            SET name = $1, description = $2, updated_at = $3
            WHERE id = $4
            RETURNING {BOARD_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(board)
    }

    async fn delete_board(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn lists_for_board(&self, board_id: i64) -> Result<Vec<List>, StoreError> {
        let lists = sqlx::query_as::<_, List>(&format!(
            "SELECT {LIST_COLUMNS} FROM lists WHERE board_id = $1 ORDER BY position, id"
        ))
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lists)
    }

    async fn get_list(&self, id: i64) -> Result<Option<List>, StoreError> {
        let list = sqlx::query_as::<_, List>(&format!(
            "SELECT {LIST_COLUMNS} FROM lists WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(list)
    }
}

#[derive(Debug, Default)]
struct Workspace {
    boards: BTreeMap<i64, Board>,
    lists: BTreeMap<i64, List>,
    next_board_id: i64,
    next_list_id: i64,
}

/// In-process workspace store
///
/// Also answers ownership queries, so one instance backs both the board
/// handlers and the board/list policies.
#[derive(Debug, Default)]
pub struct MemoryWorkspaceStore {
    inner: Mutex<Workspace>,
}

impl MemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a list to a board
    ///
    /// Returns `None` if the board does not exist.
    pub fn insert_list(&self, board_id: i64, name: &str) -> Option<List> {
        let mut workspace = self.inner.lock();
        if !workspace.boards.contains_key(&board_id) {
            return None;
        }

        workspace.next_list_id += 1;
        let position = workspace
            .lists
            .values()
            .filter(|list| list.board_id == board_id)
            .count() as i32;
        let now = Utc::now();
        let list = List {
            id: workspace.next_list_id,
            name: name.to_string(),
            board_id,
            position,
            created_at: now,
            updated_at: now,
        };
        workspace.lists.insert(list.id, list.clone());
        Some(list)
    }
}

#[async_trait]
impl BoardStore for MemoryWorkspaceStore {
    async fn list_boards(&self, user_id: i64) -> Result<Vec<Board>, StoreError> {
        Ok(self
            .inner
            .lock()
            .boards
            .values()
            .filter(|board| board.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_board(&self, user_id: i64, input: &BoardInput) -> Result<Board, StoreError> {
        let mut workspace = self.inner.lock();
        workspace.next_board_id += 1;
        let now = Utc::now();
        let board = Board {
            id: workspace.next_board_id,
            name: input.name.clone(),
            description: input.description.clone(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        workspace.boards.insert(board.id, board.clone());
        Ok(board)
    }

    async fn get_board(&self, id: i64) -> Result<Option<Board>, StoreError> {
        Ok(self.inner.lock().boards.get(&id).cloned())
    }

    async fn update_board(&self, id: i64, input: &BoardInput) -> Result<Option<Board>, StoreError> {
        let mut workspace = self.inner.lock();
        Ok(workspace.boards.get_mut(&id).map(|board| {
            board.name = input.name.clone();
            board.description = input.description.clone();
            board.updated_at = Utc::now();
            board.clone()
        }))
    }

    async fn delete_board(&self, id: i64) -> Result<bool, StoreError> {
        let mut workspace = self.inner.lock();
        let existed = workspace.boards.remove(&id).is_some();
        workspace.lists.retain(|_, list| list.board_id != id);
        Ok(existed)
    }

    async fn lists_for_board(&self, board_id: i64) -> Result<Vec<List>, StoreError> {
        let mut lists: Vec<List> = self
            .inner
            .lock()
            .lists
            .values()
            .filter(|list| list.board_id == board_id)
            .cloned()
            .collect();
        lists.sort_by_key(|list| (list.position, list.id));
        Ok(lists)
    }

    async fn get_list(&self, id: i64) -> Result<Option<List>, StoreError> {
        Ok(self.inner.lock().lists.get(&id).cloned())
    }
}

#[async_trait]
impl OwnershipStore for MemoryWorkspaceStore {
    async fn owns(&self, kind: ResourceKind, resource_id: i64, owner_id: i64) -> Result<bool, StoreError> {
        let workspace = self.inner.lock();
        let board_owner = |board_id: i64| workspace.boards.get(&board_id).map(|board| board.user_id);

        let owner = match kind {
            ResourceKind::Board => board_owner(resource_id),
            ResourceKind::List => workspace
                .lists
                .get(&resource_id)
                .and_then(|list| board_owner(list.board_id)),
        };

        Ok(owner == Some(owner_id))
    }
}
