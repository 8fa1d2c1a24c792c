//! Saving and restoring a game through durable key-value storage.
//!
//! A saved game is two entries under fixed keys: the position encoding and
//! the move history as JSON text. Loading replays the history through the
//! engine instead of jumping to the stored position, so the history shown
//! afterwards is the engine's own.

use std::collections::HashMap;

use derive_getters::Getters;
use derive_new::new;
use strictly_chess_engine::{EngineError, GameEngine};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, KvRepository, NewKvEntry};

/// Key holding the position encoding (FEN).
pub const POSITION_KEY: &str = "chess.position";

/// Key holding the move history as a JSON array of SAN strings.
pub const HISTORY_KEY: &str = "chess.history";

/// Durable string-keyed storage.
pub trait KeyValueStore {
    /// Reads the value under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, DbError>;

    /// Writes all entries as one atomic record.
    fn put_all(&mut self, entries: Vec<NewKvEntry>) -> Result<(), DbError>;
}

impl KeyValueStore for KvRepository {
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        KvRepository::get(self, key)
    }

    fn put_all(&mut self, entries: Vec<NewKvEntry>) -> Result<(), DbError> {
        KvRepository::put_all(self, &entries)
    }
}

/// Volatile store, used when no database is wanted and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a single raw value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put_all(&mut self, entries: Vec<NewKvEntry>) -> Result<(), DbError> {
        for entry in entries {
            self.entries.insert(entry.key().clone(), entry.value().clone());
        }
        Ok(())
    }
}

/// A saved game: position encoding plus the moves that reached it.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct PersistedGame {
    position: String,
    moves: Vec<String>,
}

/// Failure while saving or loading.
#[derive(Debug, Clone, derive_more::Display)]
pub enum PersistError {
    /// The store could not be read or written.
    #[display("Storage failure: {}", _0)]
    Storage(DbError),
    /// The stored record is incomplete or malformed.
    #[display("Saved game is corrupted: {}", _0)]
    Corrupted(String),
    /// The stored history could not be replayed.
    #[display("Saved game could not be restored: {}", _0)]
    Replay(EngineError),
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Storage(e) => Some(e),
            PersistError::Replay(e) => Some(e),
            PersistError::Corrupted(_) => None,
        }
    }
}

impl From<DbError> for PersistError {
    fn from(err: DbError) -> Self {
        Self::Storage(err)
    }
}

/// Result of a load that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing has been saved yet.
    NoSavedGame,
    /// The saved game was replayed.
    Restored {
        /// Number of moves replayed.
        moves: usize,
    },
}

/// Saves and restores games through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct PersistenceAdapter<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    /// Creates an adapter over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes the engine's current position and history, replacing any earlier save.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Storage`] if the write fails.
    #[instrument(skip_all)]
    pub fn save<E: GameEngine + ?Sized>(
        &mut self,
        engine: &E,
    ) -> Result<PersistedGame, PersistError> {
        let game = PersistedGame::new(engine.position_encoding(), engine.history());
        let history = serde_json::to_string(game.moves())
            .map_err(|e| PersistError::Corrupted(format!("history not serializable: {}", e)))?;

        self.store.put_all(vec![
            NewKvEntry::new(POSITION_KEY.to_string(), game.position().clone()),
            NewKvEntry::new(HISTORY_KEY.to_string(), history),
        ])?;

        info!(moves = game.moves().len(), "Game saved");
        Ok(game)
    }

    /// Reads the saved record without touching any engine.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Corrupted`] when only one of the two keys is
    /// present or the history is not a JSON list of strings.
    #[instrument(skip_all)]
    pub fn read(&self) -> Result<Option<PersistedGame>, PersistError> {
        let position = self.store.get(POSITION_KEY)?;
        let history = self.store.get(HISTORY_KEY)?;

        match (position, history) {
            (None, None) => {
                debug!("No saved game");
                Ok(None)
            }
            (Some(position), Some(history)) => {
                let moves: Vec<String> = serde_json::from_str(&history).map_err(|e| {
                    PersistError::Corrupted(format!("history is not a list of moves: {}", e))
                })?;
                Ok(Some(PersistedGame::new(position, moves)))
            }
            (Some(_), None) => Err(PersistError::Corrupted("history is missing".to_string())),
            (None, Some(_)) => Err(PersistError::Corrupted("position is missing".to_string())),
        }
    }

    /// Resets `engine` and replays the saved moves into it.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Replay`] when a stored move cannot be played.
    /// The engine keeps the moves replayed before the failure.
    #[instrument(skip_all)]
    pub fn load<E: GameEngine + ?Sized>(
        &self,
        engine: &mut E,
    ) -> Result<LoadOutcome, PersistError> {
        let Some(game) = self.read()? else {
            return Ok(LoadOutcome::NoSavedGame);
        };

        engine.load_moves(game.moves()).map_err(|e| {
            warn!(error = %e, "Replay of saved game failed");
            PersistError::Replay(e)
        })?;

        let restored = engine.position_encoding();
        if &restored != game.position() {
            warn!(
                saved = %game.position(),
                restored = %restored,
                "Replayed position differs from saved position"
            );
        }

        info!(moves = game.moves().len(), "Game restored");
        Ok(LoadOutcome::Restored {
            moves: game.moves().len(),
        })
    }
}
