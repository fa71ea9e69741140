// src/routes.rs

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta o router completo da aplicação.
pub fn app(app_state: AppState) -> Router {
    let finance_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/periods", get(handlers::dashboard::get_periods));

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(handlers::dashboard::health))
        .nest("/api/finance", finance_routes)
        .with_state(app_state)
}
