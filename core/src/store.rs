//! Todo persistence.
//!
//! [`TodoRepository`] is the narrow contract a key-value backend fulfils:
//! scan everything, put one item, delete one key. [`TodoStore`] layers the
//! todo lifecycle on top of it: id generation and time stamping on create,
//! display formatting and newest-first ordering on list.
//!
//! # Implementations
//!
//! - `RedisTodoRepository` (in `todo-gen-redis`): Production implementation
//! - `InMemoryTodoRepository` (in `todo-gen-testing`): Fast, deterministic testing

use crate::environment::Clock;
use crate::error::Result;
use crate::todo::{self, ListedTodo, Todo, TodoId, TodoKey};
use crate::validation::validate_todo_text;
use chrono::FixedOffset;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Key-value backend holding todo items.
///
/// # Dyn Compatibility
///
/// Methods return boxed futures so the repository can be shared as
/// `Arc<dyn TodoRepository>` across request handlers.
pub trait TodoRepository: Send + Sync {
    /// Fetch every stored todo, in no particular order.
    ///
    /// Implementations over a paginating backend must follow continuation
    /// tokens until the full set has been read.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend cannot be reached or an item
    /// cannot be decoded.
    fn scan(&self) -> BoxFuture<'_, Result<Vec<Todo>>>;

    /// Write a todo unconditionally.
    ///
    /// # Errors
    ///
    /// Returns a store error if the write fails.
    fn put(&self, todo: Todo) -> BoxFuture<'_, Result<()>>;

    /// Delete the todo with the given key.
    ///
    /// Deleting a key that does not exist succeeds.
    ///
    /// # Errors
    ///
    /// Returns a store error if the delete fails.
    fn delete(&self, key: TodoKey) -> BoxFuture<'_, Result<()>>;
}

/// Todo lifecycle on top of a [`TodoRepository`].
///
/// Cheap to clone; all handlers share one instance.
#[derive(Clone)]
pub struct TodoStore {
    repository: Arc<dyn TodoRepository>,
    clock: Arc<dyn Clock>,
    display_offset: Option<FixedOffset>,
}

impl TodoStore {
    /// Create a new store over the given repository and clock.
    ///
    /// Timestamps are displayed in the server's local time zone.
    #[must_use]
    pub fn new(repository: Arc<dyn TodoRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            display_offset: None,
        }
    }

    /// Display timestamps at a fixed UTC offset instead of local time.
    #[must_use]
    pub const fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = Some(offset);
        self
    }

    /// List all todos, newest first. Todos created in the same second are
    /// ordered by id.
    ///
    /// # Errors
    ///
    /// Propagates any repository failure.
    pub async fn list(&self) -> Result<Vec<ListedTodo>> {
        let mut todos = self.repository.scan().await?;
        todos.sort_by(|a, b| {
            b.created_at_epoch
                .cmp(&a.created_at_epoch)
                .then_with(|| a.id.cmp(&b.id))
        });

        tracing::debug!(count = todos.len(), "Listed todos");

        Ok(todos
            .into_iter()
            .map(|todo| ListedTodo {
                created_at_formatted: self.format(todo.created_at_epoch),
                todo,
            })
            .collect())
    }

    /// Create a todo from user-supplied text.
    ///
    /// The text is validated first; nothing is written if it is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Validation`](crate::TodoError::Validation) for
    /// invalid text, or the repository failure.
    pub async fn create(&self, text: String) -> Result<Todo> {
        validate_todo_text(&text)?;
        self.insert(text).await
    }

    /// Create a todo without validating its text.
    ///
    /// Used for text that has already been checked by its producer.
    ///
    /// # Errors
    ///
    /// Propagates any repository failure.
    pub async fn insert(&self, text: String) -> Result<Todo> {
        let todo = Todo::new(TodoId::new(), text, self.clock.now().timestamp());

        self.repository.put(todo.clone()).await?;

        tracing::info!(
            todo_id = %todo.id,
            created_at_epoch = todo.created_at_epoch,
            "Created todo"
        );

        Ok(todo)
    }

    /// Delete a todo by its composite key.
    ///
    /// # Errors
    ///
    /// Propagates any repository failure. A missing key is not an error.
    pub async fn delete(&self, key: TodoKey) -> Result<()> {
        let id = key.id.clone();
        self.repository.delete(key).await?;

        tracing::info!(todo_id = %id, "Deleted todo");

        Ok(())
    }

    fn format(&self, epoch: i64) -> String {
        match &self.display_offset {
            Some(offset) => todo::format_epoch_in(epoch, offset),
            None => todo::format_epoch(epoch),
        }
    }
}
