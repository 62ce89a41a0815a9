//! Todo domain types.
//!
//! A todo is immutable once created: it is only ever listed or deleted. Its
//! identity in the store is the pair `(id, created_at_epoch)`, where the id
//! provides uniqueness and the epoch is carried because the store partitions
//! on it.

use chrono::{Local, TimeZone};
use std::fmt;
use uuid::Uuid;

/// Display format for creation timestamps (`YYYY-MM-DD HH:MM:SS`).
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Opaque unique identifier for a todo.
///
/// Generated server-side at creation; clients only ever echo it back.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(String);

impl TodoId {
    /// Creates a new random `TodoId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an identifier read back from the store or a form field.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite store key of a todo.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoKey {
    /// Todo identifier
    pub id: TodoId,
    /// Creation time in seconds since the Unix epoch
    pub created_at_epoch: i64,
}

impl TodoKey {
    /// Creates a key from its parts
    #[must_use]
    pub const fn new(id: TodoId, created_at_epoch: i64) -> Self {
        Self {
            id,
            created_at_epoch,
        }
    }
}

/// A single todo list entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Todo text (validated for user input)
    pub text: String,
    /// Creation time in seconds since the Unix epoch
    pub created_at_epoch: i64,
}

impl Todo {
    /// Creates a todo from its parts
    #[must_use]
    pub const fn new(id: TodoId, text: String, created_at_epoch: i64) -> Self {
        Self {
            id,
            text,
            created_at_epoch,
        }
    }

    /// Returns the composite store key
    #[must_use]
    pub fn key(&self) -> TodoKey {
        TodoKey::new(self.id.clone(), self.created_at_epoch)
    }
}

/// A todo as presented on the list page.
///
/// `created_at_formatted` is derived on read and never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListedTodo {
    /// The stored todo
    pub todo: Todo,
    /// Creation time rendered with [`DISPLAY_FORMAT`]
    pub created_at_formatted: String,
}

/// Formats an epoch in the server's local time zone.
#[must_use]
pub fn format_epoch(epoch: i64) -> String {
    format_epoch_in(epoch, &Local)
}

/// Formats an epoch in the given time zone.
///
/// Epochs outside the representable range fall back to the raw number.
#[must_use]
pub fn format_epoch_in<Tz>(epoch: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    tz.timestamp_opt(epoch, 0).earliest().map_or_else(
        || epoch.to_string(),
        |time| time.format(DISPLAY_FORMAT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(TodoId::new(), TodoId::new());
    }

    #[test]
    fn test_key_carries_both_parts() {
        let todo = Todo::new(TodoId::from_string("abc"), "Buy milk".into(), 1_678_886_400);
        assert_eq!(
            todo.key(),
            TodoKey::new(TodoId::from_string("abc"), 1_678_886_400)
        );
    }

    #[test]
    fn test_format_epoch_utc() {
        assert_eq!(format_epoch_in(1_678_886_400, &Utc), "2023-03-15 13:20:00");
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code
    fn test_format_epoch_with_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_epoch_in(0, &tz), "1970-01-01 02:00:00");
    }

    #[test]
    fn test_format_epoch_out_of_range_falls_back() {
        assert_eq!(format_epoch_in(i64::MAX, &Utc), i64::MAX.to_string());
    }
}
