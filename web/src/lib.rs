//! Axum HTTP shell for the todo-gen service.
//!
//! The service is a single server-rendered page plus three form endpoints.
//! Handlers are thin: they extract form fields, call into
//! [`todo_gen_core`], and map the outcome to a redirect, a page or a
//! plain-text error.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         HTTP shell (Axum)               │  ← forms, redirects, HTML
//! │  - correlation id + request tracing     │
//! │  - AppError → status + text/plain       │
//! ├─────────────────────────────────────────┤
//! │         todo-gen-core                   │
//! │  - validation, TodoStore                │  ← backend-agnostic
//! │  - suggest_todo                         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use todo_gen_web::{AppState, BasePath, PageSettings, todo_router};
//!
//! let state = AppState::new(store, generator, PageSettings::new(BasePath::new("/"), motd));
//! let app = todo_router(state);
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use middleware::{CORRELATION_ID_HEADER, CorrelationId, correlation_id_layer};
pub use router::todo_router;
pub use state::{AppState, BasePath, PageSettings};
