pub mod auth;
pub mod items;
pub mod orders;
pub mod users;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{require_order_owner, require_seller, require_user, ServerState};
use crate::openapi::ApiDoc;

#[utoipa::path(get, path = "/api/health-checker", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::new("shop api is running"))
}

/// Build the full application router: public, signed-in, seller-only and
/// order-owner routes plus the API docs.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let public = Router::new()
        .route("/api/health-checker", get(health))
        .route("/api/auth/signup", post(auth::sign_up))
        .route("/api/auth/signin", post(auth::sign_in))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/items", get(items::list))
        .route("/api/items/:id", get(items::get).delete(items::delete));

    let signed_in = Router::new()
        .route("/api/items/:id", axum::routing::put(items::update))
        .route("/api/items/rating/:id", post(items::rate))
        .route("/api/items/comment/:id", post(items::comment))
        .route("/api/items/:id/purchase", post(items::purchase))
        .route("/api/users/me", get(users::me))
        .route("/api/users/me/orders", get(users::my_orders))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    // layers run bottom-up: identity first, then the role check
    let seller_only = Router::new()
        .route("/api/items", post(items::create))
        .route("/api/order/:id/status", post(orders::set_status))
        .route_layer(middleware::from_fn(require_seller))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let order_owner = Router::new()
        .route("/api/users/:user_id/orders/:order_id/cancel", post(users::cancel_order))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_order_owner))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    public
        .merge(signed_in)
        .merge(seller_only)
        .merge(order_owner)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
