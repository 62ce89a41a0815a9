//! Scripted text generator.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Panics only on a poisoned lock

use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use todo_gen_core::{Backend, GenerationRequest, Result, TextGenerator, TodoError};

/// [`TextGenerator`] that replays queued answers in order.
///
/// Every request is recorded so tests can assert on what was sent. When the
/// queue runs dry the generator reports itself unavailable.
///
/// # Example
///
/// ```
/// use todo_gen_testing::ScriptedGenerator;
///
/// let generator = ScriptedGenerator::new()
///     .then_complete(["  \"Buy milk.\"  "])
///     .then_complete(Vec::<String>::new());
/// assert_eq!(generator.remaining(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedGenerator {
    answers: Arc<Mutex<VecDeque<Result<Vec<String>>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl ScriptedGenerator {
    /// Create a generator with no queued answers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful answer with the given candidates
    #[must_use]
    pub fn then_complete<I, S>(self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers
            .lock()
            .unwrap()
            .push_back(Ok(candidates.into_iter().map(Into::into).collect()));
        self
    }

    /// Queue a failure
    #[must_use]
    pub fn then_fail(self, error: TodoError) -> Self {
        self.answers.lock().unwrap().push_back(Err(error));
        self
    }

    /// Requests received so far
    #[must_use]
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of answers not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn complete(&self, request: GenerationRequest) -> BoxFuture<'_, Result<Vec<String>>> {
        Box::pin(async move {
            self.requests.lock().unwrap().push(request);
            self.answers.lock().unwrap().pop_front().unwrap_or_else(|| {
                Err(TodoError::unavailable(
                    Backend::Generator,
                    "no scripted answer left",
                ))
            })
        })
    }
}
