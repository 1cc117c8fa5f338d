//! Dashboard Use Case

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entity::rental::RentalSummary;
use crate::domain::repository::{DashboardRepository, FleetCounts, RentalRepository};
use crate::error::FleetResult;

/// Dashboard output
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOutput {
    pub counts: FleetCounts,
    /// Newest first
    pub recent_rentals: Vec<RentalSummary>,
}

pub struct DashboardUseCase<D, R>
where
    D: DashboardRepository,
    R: RentalRepository,
{
    dashboard_repo: Arc<D>,
    rental_repo: Arc<R>,
    recent_limit: i64,
}

impl<D, R> DashboardUseCase<D, R>
where
    D: DashboardRepository,
    R: RentalRepository,
{
    pub fn new(dashboard_repo: Arc<D>, rental_repo: Arc<R>, recent_limit: i64) -> Self {
        Self {
            dashboard_repo,
            rental_repo,
            recent_limit,
        }
    }

    pub async fn execute(&self) -> FleetResult<DashboardOutput> {
        let counts = self.dashboard_repo.counts().await?;
        let recent_rentals = self.rental_repo.recent(self.recent_limit).await?;

        Ok(DashboardOutput {
            counts,
            recent_rentals,
        })
    }
}
