//! Service Record Use Cases

use std::sync::Arc;

use kernel::id::{CarId, ServiceRecordId};

use crate::domain::entity::car::Car;
use crate::domain::entity::service_record::{
    ServiceRecord, ServiceRecordDraft, ServiceRecordSummary,
};
use crate::domain::repository::{CarRepository, ServiceRecordRepository};
use crate::domain::validation::{
    ValidationErrors, optional_date, optional_text, required_id, required_money, required_text,
};
use crate::domain::value_object::car_status::CarStatus;
use crate::domain::value_object::money::Money;
use crate::error::{FleetError, FleetResult};

/// Raw service record form fields
#[derive(Debug, Clone, Default)]
pub struct ServiceRecordInput {
    pub car_id: String,
    pub service_date: String,
    pub service_type: String,
    /// Blank means no charge
    pub cost: String,
    pub remarks: String,
}

pub struct ServiceRecordUseCase<C, S>
where
    C: CarRepository,
    S: ServiceRecordRepository,
{
    car_repo: Arc<C>,
    service_repo: Arc<S>,
}

impl<C, S> ServiceRecordUseCase<C, S>
where
    C: CarRepository,
    S: ServiceRecordRepository,
{
    pub fn new(car_repo: Arc<C>, service_repo: Arc<S>) -> Self {
        Self {
            car_repo,
            service_repo,
        }
    }

    pub async fn list(&self) -> FleetResult<Vec<ServiceRecordSummary>> {
        self.service_repo.list().await
    }

    pub async fn get(&self, id: ServiceRecordId) -> FleetResult<ServiceRecord> {
        self.service_repo
            .find_by_id(id)
            .await?
            .ok_or(FleetError::ServiceRecordNotFound(id))
    }

    /// Every car can be serviced
    pub async fn car_options(&self) -> FleetResult<Vec<Car>> {
        self.car_repo.list().await
    }

    /// The serviced car is put into maintenance
    pub async fn create(&self, input: ServiceRecordInput) -> FleetResult<ServiceRecord> {
        let draft = self.validate(&input).await?;
        let record = self.service_repo.create(&draft).await?;

        self.car_repo
            .set_status(record.car_id, CarStatus::Maintenance)
            .await?;

        tracing::info!(
            service_record_id = %record.id,
            car_id = %record.car_id,
            cost = %record.cost,
            "Service record added"
        );

        Ok(record)
    }

    pub async fn update(
        &self,
        id: ServiceRecordId,
        input: ServiceRecordInput,
    ) -> FleetResult<ServiceRecord> {
        self.get(id).await?;

        let draft = self.validate(&input).await?;
        let record = self
            .service_repo
            .update(id, &draft)
            .await?
            .ok_or(FleetError::ServiceRecordNotFound(id))?;

        tracing::info!(service_record_id = %record.id, "Service record updated");
        Ok(record)
    }

    pub async fn delete(&self, id: ServiceRecordId) -> FleetResult<()> {
        if !self.service_repo.delete(id).await? {
            return Err(FleetError::ServiceRecordNotFound(id));
        }

        tracing::info!(service_record_id = %id, "Service record deleted");
        Ok(())
    }

    async fn validate(&self, input: &ServiceRecordInput) -> FleetResult<ServiceRecordDraft> {
        let mut errors = ValidationErrors::new();

        let car_id: Option<CarId> = required_id(&mut errors, "car_id", "Car", &input.car_id);
        let service_date =
            optional_date(&mut errors, "service_date", "Service date", &input.service_date);
        let service_type = required_text(
            &mut errors,
            "service_type",
            "Service type",
            &input.service_type,
            120,
        );
        let cost = if input.cost.trim().is_empty() {
            Some(Money::ZERO)
        } else {
            required_money(&mut errors, "cost", "Cost", &input.cost)
        };
        let remarks = optional_text(&mut errors, "remarks", "Remarks", &input.remarks, 2000);

        if let Some(id) = car_id
            && self.car_repo.find_by_id(id).await?.is_none()
        {
            errors.add("car_id", "Selected car does not exist");
        }

        let (Some(car_id), Some(service_type), Some(cost)) = (car_id, service_type, cost) else {
            return Err(FleetError::Validation(errors));
        };

        errors
            .finish(ServiceRecordDraft {
                car_id,
                service_date,
                service_type,
                cost,
                remarks,
            })
            .map_err(FleetError::Validation)
    }
}
