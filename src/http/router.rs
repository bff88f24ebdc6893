use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::ModelClient;
use crate::calcom::CalendarApi;
use crate::http::handlers;
use crate::session::SessionStore;
use crate::state::AppState;

/// Build the API router with all routes and middleware.
pub fn build_router<M, C, S>(state: AppState<M, C, S>) -> Router
where
    M: ModelClient + 'static,
    C: CalendarApi + 'static,
    S: SessionStore + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/calcom/event-types", get(handlers::list_event_types::<M, C, S>))
        .route("/calcom/slots", get(handlers::list_slots::<M, C, S>))
        .route("/calcom/bookings", post(handlers::create_booking::<M, C, S>))
        .route("/chat/message", post(handlers::chat_message::<M, C, S>));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
