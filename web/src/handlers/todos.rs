//! Todo list handlers.
//!
//! Writes never return a body: success is a `303 See Other` back to the list
//! page, so the browser's history behaves like a plain form application.
//! Non-POST requests to the write routes get the same redirect.

use crate::error::AppError;
use crate::render::render_index;
use crate::state::AppState;
use axum::{
    Form,
    extract::State,
    response::{Html, Redirect},
};
use serde::Deserialize;
use todo_gen_core::{TodoError, TodoId, TodoKey, suggest_todo};

/// Form body of `POST /add`.
#[derive(Debug, Default, Deserialize)]
pub struct AddForm {
    /// Todo text
    #[serde(default)]
    pub text: String,
}

/// Form body of `POST /delete`.
///
/// The epoch is kept as text so a malformed value is reported by the handler
/// instead of being rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    /// Todo id
    #[serde(default)]
    pub id: String,
    /// Creation epoch in decimal seconds
    #[serde(default, rename = "createdAtEpoch")]
    pub created_at_epoch: String,
}

/// `GET /`: render every todo, newest first.
///
/// # Errors
///
/// `500` if the store cannot be read or the page cannot be rendered.
pub async fn list_todos(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let todos = state
        .todos
        .list()
        .await
        .map_err(|e| AppError::from_todo("failed to get todos", e))?;

    let html = render_index(&state.page, &todos).map_err(|e| {
        AppError::internal(format!("failed to execute template: {e}")).with_source(e.into())
    })?;

    Ok(Html(html))
}

/// `POST /add`: validate and store user text.
///
/// An empty or missing `text` field is a no-op.
///
/// # Errors
///
/// `400` with the validation message for invalid text, `500` if the store
/// write fails.
pub async fn add_todo(
    State(state): State<AppState>,
    form: Option<Form<AddForm>>,
) -> Result<Redirect, AppError> {
    let text = form.map(|Form(form)| form.text).unwrap_or_default();

    if !text.is_empty() {
        state
            .todos
            .create(text)
            .await
            .map_err(|e| AppError::from_todo("failed to add todo", e))?;
    }

    Ok(redirect_home(&state))
}

/// `POST /generate`: ask the model for a todo and store it.
///
/// # Errors
///
/// `500` naming the failed step: building the request, invoking the model,
/// decoding its answer, an empty or unusable answer, or the store write.
pub async fn generate_todo(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let text = suggest_todo(state.generator.as_ref())
        .await
        .map_err(generation_error)?;

    state
        .todos
        .insert(text)
        .await
        .map_err(|e| AppError::from_todo("failed to add generated todo", e))?;

    Ok(redirect_home(&state))
}

/// `POST /delete`: remove the todo with the posted composite key.
///
/// # Errors
///
/// `400` if `createdAtEpoch` is not an integer (the store is not called),
/// `500` if the delete fails.
pub async fn delete_todo(
    State(state): State<AppState>,
    form: Option<Form<DeleteForm>>,
) -> Result<Redirect, AppError> {
    let form = form.map(|Form(form)| form).unwrap_or_default();

    let created_at_epoch = form
        .created_at_epoch
        .parse::<i64>()
        .map_err(|_| AppError::bad_request("invalid createdAtEpoch"))?;

    state
        .todos
        .delete(TodoKey::new(TodoId::from_string(form.id), created_at_epoch))
        .await
        .map_err(|e| AppError::from_todo("failed to delete todo", e))?;

    Ok(redirect_home(&state))
}

/// Fallback for non-POST requests to the write routes.
#[allow(clippy::unused_async)]
pub async fn redirect_to_list(State(state): State<AppState>) -> Redirect {
    redirect_home(&state)
}

fn redirect_home(state: &AppState) -> Redirect {
    Redirect::to(state.page.base_path.as_str())
}

fn generation_error(err: TodoError) -> AppError {
    let message = match &err {
        TodoError::EmptyResponse { .. } => "empty response from bedrock".to_string(),
        TodoError::InvalidRequest { message, .. } => {
            format!("failed to marshal request: {message}")
        }
        TodoError::BadResponse { message, .. } => {
            format!("failed to unmarshal response: {message}")
        }
        TodoError::UnusableOutput { reason, .. } => {
            format!("failed to add generated todo: {reason}")
        }
        other => format!("failed to invoke bedrock model: {other}"),
    };

    AppError::internal(message).with_source(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use todo_gen_core::{Backend, ValidationError};

    #[test]
    fn test_generation_errors_name_the_failed_step() {
        let cases = [
            (
                TodoError::EmptyResponse {
                    backend: Backend::Generator,
                },
                "empty response from bedrock",
            ),
            (
                TodoError::bad_response(Backend::Generator, "expected value"),
                "failed to unmarshal response: expected value",
            ),
            (
                TodoError::InvalidRequest {
                    backend: Backend::Generator,
                    message: "key must be a string".into(),
                },
                "failed to marshal request: key must be a string",
            ),
            (
                TodoError::unavailable(Backend::Generator, "Throttled - too many requests"),
                "failed to invoke bedrock model: generator unavailable: Throttled - too many requests",
            ),
            (
                TodoError::UnusableOutput {
                    backend: Backend::Generator,
                    reason: ValidationError::NonPrintable { ch: '\n' },
                },
                "failed to add generated todo: Todo text contains non-printable characters.",
            ),
        ];

        for (err, expected) in cases {
            let app_error = generation_error(err);
            assert_eq!(app_error.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(app_error.message(), expected);
        }
    }
}
