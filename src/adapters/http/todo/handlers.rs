//! HTTP handlers for the to-do surface.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use futures::StreamExt;
use tracing::error;

use crate::application::handlers::{
    CreateItemCommand, CreateItemHandler, DeleteItemHandler, StreamUpdatesHandler,
};
use crate::domain::TodoError;
use crate::live::{ItemRenderer, UpdateBroadcaster};
use crate::ports::{ItemStore, PubSubTransport};

use super::dto::{CreateTodoForm, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for the to-do routes.
#[derive(Clone)]
pub struct TodoAppState {
    create_handler: Arc<CreateItemHandler>,
    delete_handler: Arc<DeleteItemHandler>,
    stream_handler: Arc<StreamUpdatesHandler>,
}

impl TodoAppState {
    pub fn new(
        store: Arc<dyn ItemStore>,
        transport: Arc<dyn PubSubTransport>,
        broadcaster: Arc<UpdateBroadcaster>,
        renderer: Arc<dyn ItemRenderer>,
        channel: String,
    ) -> Self {
        Self {
            create_handler: Arc::new(CreateItemHandler::new(
                store.clone(),
                transport.clone(),
                renderer.clone(),
                channel.clone(),
            )),
            delete_handler: Arc::new(DeleteItemHandler::new(
                store.clone(),
                transport,
                renderer.clone(),
                channel,
            )),
            stream_handler: Arc::new(StreamUpdatesHandler::new(store, broadcaster, renderer)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET / - the full list as SSE: snapshot frames first, live updates
/// after, until the client disconnects.
///
/// Frames are written verbatim; the SSE layout is produced by
/// [`WireEvent::to_frame`](crate::live::WireEvent::to_frame), not by a
/// framework serializer.
pub async fn stream_todos(State(state): State<TodoAppState>) -> Response {
    match state.stream_handler.handle().await {
        Ok(events) => {
            let body =
                Body::from_stream(events.map(|event| Ok::<_, Infallible>(event.to_frame())));
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/event-stream"),
                    (header::CACHE_CONTROL, "no-cache"),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => todo_error_response(e),
    }
}

/// POST / - create an item from a form body. Subscribers learn about
/// the item through their feeds; the response body is empty.
pub async fn create_todo(
    State(state): State<TodoAppState>,
    Form(form): Form<CreateTodoForm>,
) -> Response {
    match state
        .create_handler
        .handle(CreateItemCommand { text: form.content })
        .await
    {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => todo_error_response(e),
    }
}

/// POST /:id/delete - delete an item. Deleting an id that is already
/// gone still returns 200.
pub async fn delete_todo(State(state): State<TodoAppState>, Path(id): Path<i64>) -> Response {
    match state.delete_handler.handle(id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => todo_error_response(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════

fn todo_error_response(error: TodoError) -> Response {
    match error {
        TodoError::EmptyText | TodoError::TextTooLong => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        TodoError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(error.to_string())),
        )
            .into_response(),
        TodoError::Store(_) => {
            error!(error = %error, "to-do request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("internal server error")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryItemStore, InMemoryPubSub};
    use super::super::render::HtmlItemRenderer;

    fn test_state() -> (TodoAppState, Arc<InMemoryItemStore>, Arc<InMemoryPubSub>) {
        let store = Arc::new(InMemoryItemStore::new());
        let transport = Arc::new(InMemoryPubSub::new());
        let broadcaster = Arc::new(UpdateBroadcaster::with_default_capacity());
        let state = TodoAppState::new(
            store.clone(),
            transport.clone(),
            broadcaster,
            Arc::new(HtmlItemRenderer),
            "todo_events".to_string(),
        );
        (state, store, transport)
    }

    #[tokio::test]
    async fn create_persists_and_publishes() {
        let (state, store, transport) = test_state();

        let response = create_todo(
            State(state),
            Form(CreateTodoForm {
                content: "buy milk".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.len(), 1);
        assert_eq!(transport.message_count(), 1);
    }

    #[tokio::test]
    async fn create_rejects_blank_content() {
        let (state, store, _) = test_state();

        let response = create_todo(
            State(state),
            Form(CreateTodoForm {
                content: "   ".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_returns_ok() {
        let (state, _, transport) = test_state();

        let response = delete_todo(State(state), Path(99)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(transport.message_count(), 0);
    }

    #[tokio::test]
    async fn stream_response_is_server_sent_events() {
        let (state, _, _) = test_state();

        let response = stream_todos(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/event-stream"
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-cache"
        );
    }

    #[test]
    fn validation_errors_map_to_400() {
        assert_eq!(
            todo_error_response(TodoError::EmptyText).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            todo_error_response(TodoError::TextTooLong).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            todo_error_response(TodoError::NotFound(1)).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn store_errors_map_to_500() {
        assert_eq!(
            todo_error_response(TodoError::store("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
