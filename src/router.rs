use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::{handlers::rest, service::NoteService};

pub fn build_router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(rest::get_routes))
        .route("/notes/", get(rest::get_all_notes))
        .route("/notes/create", post(rest::create_note))
        .route("/notes/{id}", get(rest::get_one_note))
        .route("/notes/{id}/update", put(rest::update_note))
        .route("/notes/{id}/delete", delete(rest::delete_note))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}
