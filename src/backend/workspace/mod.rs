//! Workspace Module
//!
//! Boards and their lists. The handlers here are thin: they parse ids and
//! bodies, consult the ownership policies and hand off to a `BoardStore`.
//!
//! # Module Structure
//!
//! ```text
//! workspace/
//! ├── mod.rs      - Module exports
//! ├── models.rs   - Board, List and request validation
//! ├── store.rs    - BoardStore trait, PostgreSQL and in-memory stores
//! └── handlers.rs - /boards HTTP handlers
//! ```

pub mod models;
pub mod store;
pub mod handlers;

pub use models::{Board, BoardInput, BoardRequest, List};
pub use store::{BoardStore, MemoryWorkspaceStore, PgBoardStore};
