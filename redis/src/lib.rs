//! # Todo Gen Redis
//!
//! Redis implementation of [`TodoRepository`](todo_gen_core::TodoRepository).
//!
//! Todos are stored as hashes under a per-table key prefix:
//!
//! ```text
//! {table}:{id}:{createdAtEpoch}  ->  { Id, Text, CreatedAtEpoch }
//! ```
//!
//! Listing walks the whole prefix with `SCAN` (following the cursor until it
//! returns to zero) and fetches each batch with one pipelined `HGETALL`.
//!
//! # Example
//!
//! ```no_run
//! use todo_gen_redis::RedisTodoRepository;
//! use std::time::Duration;
//!
//! # async fn example() -> todo_gen_core::Result<()> {
//! let repository =
//!     RedisTodoRepository::new("redis://127.0.0.1:6379", "todos", Duration::from_secs(10)).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]

pub mod item;
mod repository;

pub use repository::RedisTodoRepository;
