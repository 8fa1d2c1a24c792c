//! SQLite persistence layer for the key-value store.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use models::{KvEntry, NewKvEntry};
pub use repository::KvRepository;
