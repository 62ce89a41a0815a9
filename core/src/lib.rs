//! # Todo Gen Core
//!
//! Domain types and backend contracts for the todo-gen service.
//!
//! The service is a thin shell over two remote collaborators: a key-value
//! store that holds the todos and a text-generation model that suggests new
//! ones. This crate owns everything that must behave identically no matter
//! which concrete backends are plugged in:
//!
//! - **Todo model**: [`Todo`], its composite [`TodoKey`], display formatting
//! - **Validation**: the length and printability rule for todo text
//! - **Todo store**: list / create / delete semantics on top of a
//!   [`TodoRepository`](store::TodoRepository)
//! - **Generation**: the fixed suggestion request and response cleanup on top
//!   of a [`TextGenerator`](generation::TextGenerator)
//! - **Errors**: the closed [`TodoError`] taxonomy
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────┐      ┌──────────────────────┐
//! │ HTTP handlers      │─────▶│ TodoStore            │──▶ dyn TodoRepository
//! │ (todo-gen-web)     │      │ (list/create/delete) │     (redis, in-memory)
//! │                    │      └──────────────────────┘
//! │                    │      ┌──────────────────────┐
//! │                    │─────▶│ suggest_todo()       │──▶ dyn TextGenerator
//! └────────────────────┘      └──────────────────────┘     (bedrock, scripted)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use todo_gen_core::{TodoStore, environment::SystemClock};
//! use std::sync::Arc;
//!
//! let store = TodoStore::new(Arc::new(repository), Arc::new(SystemClock));
//! let todo = store.create("Buy milk".to_string()).await?;
//! let listed = store.list().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod environment;
pub mod error;
pub mod generation;
pub mod store;
pub mod todo;
pub mod validation;

// Re-export key types for convenience
pub use error::{Backend, Result, TodoError, ValidationError};
pub use generation::{GenerationRequest, TextGenerator, suggest_todo};
pub use store::{TodoRepository, TodoStore};
pub use todo::{ListedTodo, Todo, TodoId, TodoKey};
pub use validation::{MAX_TODO_CHARS, validate_todo_text};
