//! Route table.

use crate::handlers::{
    add_todo, delete_todo, generate_todo, health_check, list_todos, redirect_to_list,
};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the application router, mounted under the state's base path.
///
/// | Route | Method | Handler |
/// |---|---|---|
/// | `{prefix}` | GET | list page |
/// | `{prefix}add` | POST | add a todo |
/// | `{prefix}generate` | POST | add a generated todo |
/// | `{prefix}delete` | POST | delete a todo |
/// | `{prefix}health` | GET | liveness |
///
/// Any other method on the three write routes redirects to the list page.
#[must_use]
pub fn todo_router(state: AppState) -> Router {
    let base = state.page.base_path.clone();

    let mut router = Router::new()
        .route(base.as_str(), get(list_todos))
        .route(&base.join("add"), post(add_todo).fallback(redirect_to_list))
        .route(
            &base.join("generate"),
            post(generate_todo).fallback(redirect_to_list),
        )
        .route(
            &base.join("delete"),
            post(delete_todo).fallback(redirect_to_list),
        )
        .route(&base.join("health"), get(health_check));

    // `/test` as well as `/test/`
    let bare = base.as_str().trim_end_matches('/');
    if !bare.is_empty() {
        router = router.route(bare, get(list_todos));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
