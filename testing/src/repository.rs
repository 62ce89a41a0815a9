//! In-memory todo repository.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on a poisoned lock

use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use todo_gen_core::{Result, Todo, TodoError, TodoKey, TodoRepository};

/// Number of calls each repository operation has received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryCalls {
    /// `scan` calls
    pub scans: usize,
    /// `put` calls
    pub puts: usize,
    /// `delete` calls
    pub deletes: usize,
}

impl RepositoryCalls {
    /// Total number of calls across all operations.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.scans + self.puts + self.deletes
    }
}

/// HashMap-backed [`TodoRepository`] for fast, deterministic tests.
///
/// Clones share the same storage, so a test can keep one handle for
/// assertions while the code under test owns another.
///
/// # Example
///
/// ```
/// use todo_gen_testing::InMemoryTodoRepository;
/// use todo_gen_core::{Backend, TodoError};
///
/// let repository = InMemoryTodoRepository::new();
/// repository.fail_with(TodoError::unavailable(Backend::Store, "throttled"));
/// assert!(repository.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryTodoRepository {
    items: Arc<RwLock<HashMap<TodoKey, Todo>>>,
    failure: Arc<RwLock<Option<TodoError>>>,
    calls: Arc<RwLock<RepositoryCalls>>,
}

impl InMemoryTodoRepository {
    /// Create a new empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with the given todos
    #[must_use]
    pub fn with_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        let repository = Self::new();
        for todo in todos {
            repository.seed(todo);
        }
        repository
    }

    /// Insert a todo directly, bypassing call counting
    pub fn seed(&self, todo: Todo) {
        self.items.write().unwrap().insert(todo.key(), todo);
    }

    /// Make every following operation fail with `error`
    pub fn fail_with(&self, error: TodoError) {
        *self.failure.write().unwrap() = Some(error);
    }

    /// Clear an injected failure
    pub fn recover(&self) {
        *self.failure.write().unwrap() = None;
    }

    /// Snapshot of the stored todos, in no particular order
    #[must_use]
    pub fn todos(&self) -> Vec<Todo> {
        self.items.read().unwrap().values().cloned().collect()
    }

    /// Number of stored todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().unwrap().len()
    }

    /// Check if the repository is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().unwrap().is_empty()
    }

    /// Calls received so far
    #[must_use]
    pub fn calls(&self) -> RepositoryCalls {
        *self.calls.read().unwrap()
    }

    fn record(&self, update: impl FnOnce(&mut RepositoryCalls)) -> Result<()> {
        update(&mut self.calls.write().unwrap());
        match self.failure.read().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn scan(&self) -> BoxFuture<'_, Result<Vec<Todo>>> {
        Box::pin(async move {
            self.record(|calls| calls.scans += 1)?;
            Ok(self.todos())
        })
    }

    fn put(&self, todo: Todo) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.record(|calls| calls.puts += 1)?;
            self.items.write().unwrap().insert(todo.key(), todo);
            Ok(())
        })
    }

    fn delete(&self, key: TodoKey) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            self.record(|calls| calls.deletes += 1)?;
            self.items.write().unwrap().remove(&key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_gen_core::{Backend, TodoId};

    fn todo(id: &str, epoch: i64) -> Todo {
        Todo::new(TodoId::from_string(id), format!("todo {id}"), epoch)
    }

    #[tokio::test]
    async fn test_put_scan_delete() {
        let repository = InMemoryTodoRepository::new();

        repository.put(todo("a", 1)).await.unwrap();
        repository.put(todo("b", 2)).await.unwrap();
        assert_eq!(repository.scan().await.unwrap().len(), 2);

        repository.delete(todo("a", 1).key()).await.unwrap();
        assert_eq!(repository.todos(), vec![todo("b", 2)]);

        assert_eq!(
            repository.calls(),
            RepositoryCalls {
                scans: 1,
                puts: 2,
                deletes: 1
            }
        );
    }

    #[tokio::test]
    async fn test_delete_requires_both_key_parts() {
        let repository = InMemoryTodoRepository::with_todos([todo("a", 1)]);

        repository
            .delete(TodoKey::new(TodoId::from_string("a"), 2))
            .await
            .unwrap();

        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure_blocks_writes() {
        let repository = InMemoryTodoRepository::new();
        repository.fail_with(TodoError::unavailable(Backend::Store, "down"));

        let result = repository.put(todo("a", 1)).await;

        assert!(matches!(result, Err(TodoError::Unavailable { .. })));
        assert!(repository.is_empty());

        repository.recover();
        repository.put(todo("a", 1)).await.unwrap();
        assert_eq!(repository.len(), 1);
    }
}
