//! Route definitions for the to-do surface.
//!
//! Mounted under `/api/todo`:
//! - `GET /` - SSE feed: snapshot, then live updates
//! - `POST /` - create an item (form body)
//! - `POST /:id/delete` - delete an item

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{create_todo, delete_todo, stream_todos, TodoAppState};

pub fn todo_routes() -> Router<TodoAppState> {
    Router::new()
        .route("/", get(stream_todos).post(create_todo))
        .route("/:id/delete", post(delete_todo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::todo::HtmlItemRenderer;
    use crate::adapters::memory::{InMemoryItemStore, InMemoryPubSub};
    use crate::live::UpdateBroadcaster;
    use std::sync::Arc;

    fn test_state() -> TodoAppState {
        TodoAppState::new(
            Arc::new(InMemoryItemStore::new()),
            Arc::new(InMemoryPubSub::new()),
            Arc::new(UpdateBroadcaster::with_default_capacity()),
            Arc::new(HtmlItemRenderer),
            "todo_events".to_string(),
        )
    }

    #[tokio::test]
    async fn router_builds_with_state() {
        let _router: Router = todo_routes().with_state(test_state());
    }
}
