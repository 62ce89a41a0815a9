//! [`TodoRepository`] over a Redis connection manager.

use crate::item::{decode_item, encode_item, item_key, scan_pattern};
use futures::future::BoxFuture;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, ErrorKind, RedisError};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::time::Duration;
use todo_gen_core::{Backend, Result, Todo, TodoError, TodoKey, TodoRepository};

/// Keys requested per `SCAN` round trip.
const SCAN_BATCH: usize = 100;

/// Redis-backed todo repository.
///
/// Every call is bounded by the configured timeout; a call that overruns
/// reports the store as unavailable.
#[derive(Clone)]
pub struct RedisTodoRepository {
    conn_manager: ConnectionManager,
    table: String,
    timeout: Duration,
}

impl RedisTodoRepository {
    /// Connect to Redis and address the items of `table`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Unavailable`] if the URL is invalid or the first
    /// connection cannot be established within `timeout`.
    pub async fn new(redis_url: &str, table: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            TodoError::unavailable(Backend::Store, format!("failed to create Redis client: {e}"))
        })?;

        let conn_manager = bounded(timeout, ConnectionManager::new(client)).await?;

        Ok(Self {
            conn_manager,
            table: table.into(),
            timeout,
        })
    }

    /// Table (key prefix) this repository addresses.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    async fn scan_all(&self) -> Result<Vec<Todo>> {
        let mut conn = self.conn_manager.clone();
        let pattern = scan_pattern(&self.table);
        let mut seen = HashSet::new();
        let mut todos = Vec::new();
        let mut cursor: u64 = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = bounded(
                self.timeout,
                redis::cmd("SCAN")
                    .arg(cursor)
                    .arg("MATCH")
                    .arg(&pattern)
                    .arg("COUNT")
                    .arg(SCAN_BATCH)
                    .query_async(&mut conn),
            )
            .await?;

            // SCAN may return a key more than once
            let fresh: Vec<String> = keys.into_iter().filter(|k| seen.insert(k.clone())).collect();

            if !fresh.is_empty() {
                let mut pipe = redis::pipe();
                for key in &fresh {
                    pipe.hgetall(key);
                }
                let items: Vec<HashMap<String, String>> =
                    bounded(self.timeout, pipe.query_async(&mut conn)).await?;

                for (key, fields) in fresh.iter().zip(items) {
                    if let Some(todo) = decode_item(key, fields)? {
                        todos.push(todo);
                    }
                }
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        tracing::debug!(table = %self.table, count = todos.len(), "Scanned todos from Redis");

        Ok(todos)
    }

    async fn put_item(&self, todo: Todo) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        let key = item_key(&self.table, &todo.key());

        let _: () = bounded(self.timeout, conn.hset_multiple(&key, &encode_item(&todo))).await?;

        tracing::debug!(key = %key, "Stored todo in Redis");

        Ok(())
    }

    async fn delete_item(&self, key: TodoKey) -> Result<()> {
        let mut conn = self.conn_manager.clone();
        let key = item_key(&self.table, &key);

        let removed: u64 = bounded(self.timeout, conn.del(&key)).await?;

        tracing::debug!(key = %key, removed, "Deleted todo from Redis");

        Ok(())
    }
}

impl TodoRepository for RedisTodoRepository {
    fn scan(&self) -> BoxFuture<'_, Result<Vec<Todo>>> {
        Box::pin(self.scan_all())
    }

    fn put(&self, todo: Todo) -> BoxFuture<'_, Result<()>> {
        Box::pin(self.put_item(todo))
    }

    fn delete(&self, key: TodoKey) -> BoxFuture<'_, Result<()>> {
        Box::pin(self.delete_item(key))
    }
}

/// Run a Redis call under `timeout`, mapping both failure modes into
/// [`TodoError`].
async fn bounded<T>(
    timeout: Duration,
    call: impl Future<Output = std::result::Result<T, RedisError>>,
) -> Result<T> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map_err(map_redis_error),
        Err(_) => Err(TodoError::unavailable(
            Backend::Store,
            format!("Redis call timed out after {}ms", timeout.as_millis()),
        )),
    }
}

/// Decoding failures are bad responses; everything else means the store
/// could not serve the call.
fn map_redis_error(err: RedisError) -> TodoError {
    match err.kind() {
        ErrorKind::TypeError | ErrorKind::ResponseError => {
            TodoError::bad_response(Backend::Store, err.to_string())
        }
        _ => TodoError::unavailable(Backend::Store, err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;

    #[test]
    fn test_type_errors_are_bad_responses() {
        let err = RedisError::from((ErrorKind::TypeError, "expected hash"));
        assert!(matches!(
            map_redis_error(err),
            TodoError::BadResponse {
                backend: Backend::Store,
                ..
            }
        ));
    }

    #[test]
    fn test_io_errors_are_unavailable() {
        let err = RedisError::from((ErrorKind::IoError, "connection reset"));
        assert!(matches!(
            map_redis_error(err),
            TodoError::Unavailable {
                backend: Backend::Store,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_overrunning_call_is_unavailable() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<(), RedisError>(())
        };

        let err = bounded(Duration::from_millis(10), slow).await.unwrap_err();

        assert!(err.to_string().contains("timed out"));
        assert_eq!(err.backend(), Some(Backend::Store));
    }
}
