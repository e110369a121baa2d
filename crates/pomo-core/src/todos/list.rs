use std::sync::Arc;

use tracing::{error, info};

use super::errors::TodoError;
use super::types::TodoItem;
use crate::storage::{self, KeyValueStore, TODOS_KEY};

/// Ordered todo list bound to a store.
///
/// Positions are 1-based, matching what `pomo todo list` prints.
pub struct TodoList {
    items: Vec<TodoItem>,
    store: Arc<dyn KeyValueStore>,
    /// Set when the stored list exists but could not be read. Mutations are
    /// refused so the stored data is never replaced.
    load_error: Option<String>,
}

impl TodoList {
    /// Load the persisted list.
    ///
    /// A missing list yields an empty list. An unreadable or corrupted list
    /// also shows as empty, but the list becomes read-only (see
    /// [`TodoList::load_error`]).
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let loaded = storage::load::<Vec<TodoItem>>(store.as_ref(), TODOS_KEY);
        let (items, load_error) = match loaded {
            Ok(Some(items)) => (items, None),
            Ok(None) => (Vec::new(), None),
            Err(e) => {
                error!(
                    event = "core.todos.load_failed",
                    error = %e,
                    "Todo list could not be loaded - showing an empty, read-only list"
                );
                (Vec::new(), Some(e.to_string()))
            }
        };

        Self {
            items,
            store,
            load_error,
        }
    }

    /// Why the stored list could not be read, if it could not.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item. Text is trimmed; empty text is rejected.
    pub fn add(&mut self, text: &str) -> Result<&TodoItem, TodoError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoError::EmptyText);
        }

        let mut items = self.items.clone();
        items.push(TodoItem::new(text));
        self.commit(items)?;

        info!(event = "core.todos.added", count = self.items.len());
        Ok(&self.items[self.items.len() - 1])
    }

    /// Flip the completion flag of the item at `position`.
    pub fn toggle(&mut self, position: usize) -> Result<&TodoItem, TodoError> {
        let index = self.index_of(position)?;
        let mut items = self.items.clone();
        items[index].completed = !items[index].completed;
        self.commit(items)?;

        info!(
            event = "core.todos.toggled",
            position = position,
            completed = self.items[index].completed,
        );
        Ok(&self.items[index])
    }

    /// Remove and return the item at `position`.
    pub fn delete(&mut self, position: usize) -> Result<TodoItem, TodoError> {
        let index = self.index_of(position)?;
        let mut items = self.items.clone();
        let removed = items.remove(index);
        self.commit(items)?;

        info!(
            event = "core.todos.deleted",
            position = position,
            count = self.items.len(),
        );
        Ok(removed)
    }

    fn index_of(&self, position: usize) -> Result<usize, TodoError> {
        if position == 0 || position > self.items.len() {
            return Err(TodoError::NotFound {
                position,
                len: self.items.len(),
            });
        }
        Ok(position - 1)
    }

    /// Persist `items`, then make them current. On failure nothing changes.
    fn commit(&mut self, items: Vec<TodoItem>) -> Result<(), TodoError> {
        if let Some(message) = &self.load_error {
            return Err(TodoError::Unreadable {
                message: message.clone(),
            });
        }

        storage::save(self.store.as_ref(), TODOS_KEY, &items)?;
        self.items = items;
        Ok(())
    }
}
