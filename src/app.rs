use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::state::Dashboard;
use crate::ui::page;

// ---------------------------------------------------------------------------
// HTTP surface
// ---------------------------------------------------------------------------

/// Shared, read-only dashboard handed to every handler.
pub type SharedDashboard = Arc<Dashboard>;

#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    category: Option<String>,
    year: Option<String>,
}

pub fn router(dashboard: SharedDashboard) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/figures", get(figures))
        .route("/healthz", get(healthz))
        .with_state(dashboard)
}

async fn index(State(dashboard): State<SharedDashboard>) -> Html<String> {
    Html(page::dashboard_page(&dashboard))
}

/// Both figures come back in one response so the page swaps them together.
async fn figures(
    State(dashboard): State<SharedDashboard>,
    Query(q): Query<SelectionQuery>,
) -> impl IntoResponse {
    let view = dashboard.on_selection_changed(q.category.as_deref(), q.year.as_deref());
    log::debug!(
        "Figures for {:?} / {:?}: '{}' ({} points), '{}' ({} points)",
        q.category,
        q.year,
        view.map.title(),
        view.map.point_count(),
        view.bar.title(),
        view.bar.point_count()
    );
    Json(view.to_json())
}

async fn healthz(State(dashboard): State<SharedDashboard>) -> impl IntoResponse {
    Json(json!({ "ok": true, "observations": dashboard.table().len() }))
}
