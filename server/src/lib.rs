//! In-memory todo list HTTP service.
//!
//! # Overview
//! A JSON CRUD API over a single owned [`TodoStore`], plus `/` and `/health`.
//! Nothing is persisted; a restart starts again from an empty list with ids
//! counting from 1.
//!
//! # Design
//! - The store is plain synchronous code with no knowledge of HTTP. Handlers
//!   in [`routes`] translate its results into status codes and JSON bodies.
//! - The store is injected as router state ([`Db`]) rather than held in a
//!   global, so every [`app`] call starts from a fresh, independent list.
//! - Every failure leaves the server as `{"error": "..."}`.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;
pub mod telemetry;
pub mod types;

use std::{any::Any, future::Future, sync::Arc};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub use config::ServerConfig;
pub use error::{ApiError, ConfigError, StoreError};
pub use store::TodoStore;
pub use types::{CreateTodo, Todo, UpdateTodo};

use error::ErrorBody;

/// Shared handle to the store, handed to every handler as router state.
pub type Db = Arc<RwLock<TodoStore>>;

/// Router over a fresh, empty store.
pub fn app() -> Router {
    router(Db::default())
}

/// Router over the given store.
pub fn router(db: Db) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/todos", get(routes::list_todos).post(routes::create_todo))
        .route(
            "/todos/{id}",
            get(routes::get_todo)
                .put(routes::update_todo)
                .delete(routes::delete_todo),
        )
        .fallback(routes::fallback)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .with_state(db)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Serves a fresh [`app`] on `listener` until the process exits.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serves `db` on `listener`, draining in-flight requests once `shutdown`
/// resolves.
pub async fn serve<F>(listener: TcpListener, db: Db, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(db))
        .with_graceful_shutdown(shutdown)
        .await
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new("internal server error")),
    )
        .into_response()
}
