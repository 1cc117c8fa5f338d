//! Dashboard page

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;

use super::FleetAppState;
use crate::application::DashboardUseCase;
use crate::domain::repository::FleetRepository;
use crate::error::FleetResult;
use crate::presentation::view_model::PageView;

/// GET /
pub async fn dashboard<R>(
    State(state): State<FleetAppState<R>>,
    headers: HeaderMap,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let output = DashboardUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.recent_rentals_limit,
    )
    .execute()
    .await?;

    state.render_with_flash(
        &headers,
        "dashboard.html",
        PageView::new("Dashboard", "dashboard", output),
    )
}
