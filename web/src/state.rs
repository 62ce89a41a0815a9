//! Application state for Axum handlers.
//!
//! Built once at startup and cloned into every handler. Nothing in it is
//! mutable: the key-value store is the only source of truth.

use std::fmt;
use std::sync::Arc;
use todo_gen_core::{TextGenerator, TodoStore};

/// Normalised mount prefix of the application.
///
/// Always starts and ends with `/`; the root mount is `/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// Normalise a configured prefix (`""`, `"test"`, `"/test"`, `"/test/"`
    /// all work).
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_gen_web::BasePath;
    ///
    /// assert_eq!(BasePath::new("test").as_str(), "/test/");
    /// assert_eq!(BasePath::new("").as_str(), "/");
    /// assert_eq!(BasePath::new("/test/").join("add"), "/test/add");
    /// ```
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        let trimmed = prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            Self("/".to_string())
        } else {
            Self(format!("/{trimmed}/"))
        }
    }

    /// The prefix itself; also the list page URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute path of `route` under this prefix.
    #[must_use]
    pub fn join(&self, route: &str) -> String {
        format!("{}{}", self.0, route.trim_start_matches('/'))
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::new("/")
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Page-level settings fixed at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageSettings {
    /// Message of the day; `None` hides the banner.
    pub motd: Option<String>,
    /// Mount prefix for form actions and redirects.
    pub base_path: BasePath,
}

impl PageSettings {
    /// Settings for the given prefix, with an optional message of the day.
    ///
    /// An empty message counts as unset.
    #[must_use]
    pub fn new(base_path: BasePath, motd: Option<String>) -> Self {
        Self {
            motd: motd.filter(|m| !m.is_empty()),
            base_path,
        }
    }
}

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Todo persistence.
    pub todos: TodoStore,
    /// Suggestion backend.
    pub generator: Arc<dyn TextGenerator>,
    /// Page settings.
    pub page: Arc<PageSettings>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(todos: TodoStore, generator: Arc<dyn TextGenerator>, page: PageSettings) -> Self {
        Self {
            todos,
            generator,
            page: Arc::new(page),
        }
    }
}
