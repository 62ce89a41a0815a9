//! Mapping between todos and Redis hashes.
//!
//! Each todo lives in one hash at `{table}:{id}:{createdAtEpoch}` with the
//! fields `Id`, `Text` and `CreatedAtEpoch`. The key only addresses the item;
//! decoding always reads the fields.

use std::collections::HashMap;
use todo_gen_core::{Backend, Result, Todo, TodoError, TodoId, TodoKey};

/// Hash field holding the todo id.
pub const FIELD_ID: &str = "Id";
/// Hash field holding the todo text.
pub const FIELD_TEXT: &str = "Text";
/// Hash field holding the creation epoch, in decimal seconds.
pub const FIELD_CREATED_AT_EPOCH: &str = "CreatedAtEpoch";

/// Redis key of the item addressed by `key` in `table`.
#[must_use]
pub fn item_key(table: &str, key: &TodoKey) -> String {
    format!("{table}:{}:{}", key.id, key.created_at_epoch)
}

/// `SCAN MATCH` pattern selecting every item of `table`.
///
/// Glob metacharacters in the table name are escaped so they match
/// literally.
#[must_use]
pub fn scan_pattern(table: &str) -> String {
    let mut pattern = String::with_capacity(table.len() + 2);
    for ch in table.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push_str(":*");
    pattern
}

/// Field/value pairs written for `todo`.
#[must_use]
pub fn encode_item(todo: &Todo) -> [(&'static str, String); 3] {
    [
        (FIELD_ID, todo.id.to_string()),
        (FIELD_TEXT, todo.text.clone()),
        (FIELD_CREATED_AT_EPOCH, todo.created_at_epoch.to_string()),
    ]
}

/// Decode the hash read from `key`.
///
/// An empty hash means the key vanished between `SCAN` and `HGETALL` and
/// yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`TodoError::BadResponse`] if a field is missing or the epoch is
/// not an integer.
pub fn decode_item(key: &str, mut fields: HashMap<String, String>) -> Result<Option<Todo>> {
    if fields.is_empty() {
        return Ok(None);
    }

    let mut take = |field: &str| {
        fields.remove(field).ok_or_else(|| {
            TodoError::bad_response(Backend::Store, format!("item {key} has no {field} field"))
        })
    };

    let id = take(FIELD_ID)?;
    let text = take(FIELD_TEXT)?;
    let epoch = take(FIELD_CREATED_AT_EPOCH)?;

    let created_at_epoch = epoch.parse::<i64>().map_err(|e| {
        TodoError::bad_response(
            Backend::Store,
            format!("item {key} has invalid {FIELD_CREATED_AT_EPOCH} {epoch:?}: {e}"),
        )
    })?;

    Ok(Some(Todo::new(
        TodoId::from_string(id),
        text,
        created_at_epoch,
    )))
}
