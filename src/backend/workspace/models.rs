/**
 * Workspace Models
 *
 * Boards belong to a user; lists belong to a board and are owned through it.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::SharedError;

/// Maximum board name length in characters
pub const MAX_NAME_LEN: usize = 255;

/// Maximum board description length in characters
pub const MAX_DESCRIPTION_LEN: usize = 10_000;

/// A board owned by one user
#[derive(Debug, Clone, Serialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Board {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A list on a board
#[derive(Debug, Clone, Serialize, PartialEq, Eq, sqlx::FromRow)]
pub struct List {
    pub id: i64,
    pub name: String,
    pub board_id: i64,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /boards` and `PUT /boards/{id}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BoardRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Validated board fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardInput {
    pub name: String,
    /// `None` when the description was absent or blank
    pub description: Option<String>,
}

impl BoardRequest {
    /// Trim and validate the request
    pub fn validate(self) -> Result<BoardInput, SharedError> {
        let name = self.name.trim().to_string();
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        if name.is_empty() {
            return Err(SharedError::validation("name", "name is a required field"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(SharedError::validation(
                "name",
                "name must not be more than 255 characters long",
            ));
        }
        if description
            .as_ref()
            .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN)
        {
            return Err(SharedError::validation(
                "description",
                "description must not be more than 10,000 characters long",
            ));
        }

        Ok(BoardInput { name, description })
    }
}
