use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

mod caja;
mod chatbot;
pub mod common;
mod config;
mod logs;
mod personal;
mod recursos;
mod reportes;

pub fn build_routes(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        // Config
        .route(
            "/api/config",
            get(config::load_config).put(config::save_config),
        )
        // Logs
        .route("/api/logs", get(logs::get_logs))
        .route("/api/logs/clear", post(logs::clear_logs))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            common::require_admin,
        ));

    Router::new()
        // Recursos
        .route(
            "/api/recursos/:recurso",
            get(recursos::list).post(recursos::create),
        )
        .route(
            "/api/recursos/:recurso/batch-delete",
            post(recursos::batch_delete),
        )
        .route(
            "/api/recursos/:recurso/:id",
            get(recursos::detail)
                .put(recursos::update)
                .delete(recursos::delete),
        )
        // Caja
        .route("/api/caja/registrar", post(caja::registrar))
        .route("/api/caja/resumen", get(caja::resumen))
        // Reportes
        .route("/api/reportes/flujo", get(reportes::flujo))
        .route("/api/reportes/resumen", get(reportes::resumen))
        .route("/api/reportes/inventario", get(reportes::inventario))
        .route("/api/reportes/:tipo", get(reportes::serie))
        // Gestión de personal
        .route(
            "/api/gestion-personal/colaboradores",
            get(personal::colaboradores),
        )
        .route("/api/gestion-personal/resumen", get(personal::resumen))
        // Chatbot
        .route("/api/chatbot", post(chatbot::preguntar))
        // Health
        .route("/healthz", get(|| async { "ok" }))
        .merge(admin)
        .with_state(state)
}

/// Rutas, CORS, log de peticiones y, si hay `static_dir`, la SPA con `index.html` de respaldo
pub fn build_app(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let app = build_routes(state)
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(common::request_logger));

    let Some(static_dir) = static_dir else {
        return app;
    };
    let index_path = static_dir.join("index.html");
    if static_dir.exists() && index_path.exists() {
        tracing::info!("Serving static files from {:?}", static_dir);
        let serve_dir = ServeDir::new(static_dir).not_found_service(ServeFile::new(&index_path));
        app.fallback_service(serve_dir)
    } else {
        tracing::warn!("Static directory {:?} or index.html not found", static_dir);
        app
    }
}
