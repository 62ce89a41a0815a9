//! HTTP request handlers.

pub mod health;
pub mod todos;

pub use health::health_check;
pub use todos::{add_todo, delete_todo, generate_todo, list_todos, redirect_to_list};
