use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use tower_http::services::{ServeDir, ServeFile};

use reschedule_cell::{reschedule_routes, RescheduleState};

pub fn create_router(state: Arc<RescheduleState>) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/", get(|| async { "Missed appointment reschedule service is running!" }))
        .merge(reschedule_routes(state))
        .route_service(
            "/secure_link_page/",
            ServeFile::new(static_dir.join("secure_link_page").join("index.html")),
        )
        .route_service("/admin.html", ServeFile::new(static_dir.join("admin.html")))
        .nest_service("/static", ServeDir::new(static_dir))
}
