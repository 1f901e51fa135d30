//! Shared application state.
//!
//! `rusqlite::Connection` is `!Sync`, so the store sits behind a
//! `tokio::sync::Mutex`; handlers await the lock instead of blocking a
//! runtime thread.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::store::{StoreError, TodoStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<TodoStore>>,
}

impl AppState {
    pub fn new(store: TodoStore) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// State backed by a private in-memory database.
    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self::new(TodoStore::in_memory()?))
    }

    /// Takes the store back out once no other handle is alive. Returns `None`
    /// if a clone of this state still exists.
    pub fn into_store(self) -> Option<TodoStore> {
        Arc::try_unwrap(self.store).ok().map(Mutex::into_inner)
    }
}
