//! # Todo Gen Testing
//!
//! Testing utilities for the todo-gen workspace.
//!
//! This crate provides:
//! - [`InMemoryTodoRepository`]: HashMap-backed store with failure injection
//!   and call counting
//! - [`ScriptedGenerator`]: text generator that replays queued answers and
//!   records every request
//! - [`FixedClock`]: deterministic time
//!
//! ## Example
//!
//! ```
//! use todo_gen_testing::{test_clock, InMemoryTodoRepository};
//! use todo_gen_core::TodoStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> todo_gen_core::Result<()> {
//! let repository = InMemoryTodoRepository::new();
//! let store = TodoStore::new(Arc::new(repository.clone()), Arc::new(test_clock()));
//!
//! store.create("Buy milk".to_string()).await?;
//! assert_eq!(repository.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::unwrap_used)] // Lock poisoning in test doubles is a test failure

pub mod generator;
pub mod repository;

/// Mock implementations of environment traits.
pub mod mocks {
    use chrono::{DateTime, Utc};
    use todo_gen_core::environment::Clock;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_gen_testing::mocks::FixedClock;
    /// use todo_gen_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }

        /// Create a fixed clock at the given Unix timestamp (seconds)
        #[must_use]
        pub fn at_epoch(epoch: i64) -> Self {
            Self::new(DateTime::from_timestamp(epoch, 0).unwrap_or_default())
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::at_epoch(TEST_EPOCH)
    }

    /// Unix timestamp of [`test_clock`].
    pub const TEST_EPOCH: i64 = 1_735_689_600;
}

// Re-export commonly used items
pub use generator::ScriptedGenerator;
pub use mocks::{FixedClock, TEST_EPOCH, test_clock};
pub use repository::{InMemoryTodoRepository, RepositoryCalls};

#[cfg(test)]
mod tests {
    use super::*;
    use todo_gen_core::environment::Clock;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().timestamp(), TEST_EPOCH);
    }
}
