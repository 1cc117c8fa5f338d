//! Car Use Cases

use std::sync::Arc;

use kernel::id::CarId;

use crate::domain::entity::car::{Car, CarDraft};
use crate::domain::repository::CarRepository;
use crate::domain::validation::{
    ValidationErrors, optional_text, optional_year, required_money, required_text,
};
use crate::domain::value_object::car_status::CarStatus;
use crate::error::{FleetError, FleetResult};

/// Raw car form fields
#[derive(Debug, Clone, Default)]
pub struct CarInput {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub registration: String,
    pub daily_rate: String,
    pub status: String,
    pub description: String,
}

/// Validate raw car fields into a draft
pub fn validate_car(input: &CarInput) -> Result<CarDraft, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = required_text(&mut errors, "name", "Name", &input.name, 120);
    let brand = optional_text(&mut errors, "brand", "Brand", &input.brand, 120);
    let model = optional_text(&mut errors, "model", "Model", &input.model, 120);
    let year = optional_year(&mut errors, "year", &input.year);
    let registration = required_text(
        &mut errors,
        "registration",
        "Registration",
        &input.registration,
        32,
    )
    .map(|r| r.to_uppercase());
    let daily_rate = required_money(&mut errors, "daily_rate", "Daily rate", &input.daily_rate);
    let status = match input.status.trim() {
        "" => Some(CarStatus::default()),
        code => {
            let status = CarStatus::from_code(code);
            if status.is_none() {
                errors.add("status", "Status is not a valid choice");
            }
            status
        }
    };
    let description =
        optional_text(&mut errors, "description", "Description", &input.description, 2000);

    let (Some(name), Some(registration), Some(daily_rate), Some(status)) =
        (name, registration, daily_rate, status)
    else {
        return Err(errors);
    };

    errors.finish(CarDraft {
        name,
        brand,
        model,
        year,
        registration,
        daily_rate,
        status,
        description,
    })
}

/// Car CRUD use case
pub struct CarUseCase<C>
where
    C: CarRepository,
{
    car_repo: Arc<C>,
}

impl<C> CarUseCase<C>
where
    C: CarRepository,
{
    pub fn new(car_repo: Arc<C>) -> Self {
        Self { car_repo }
    }

    pub async fn list(&self) -> FleetResult<Vec<Car>> {
        self.car_repo.list().await
    }

    pub async fn get(&self, id: CarId) -> FleetResult<Car> {
        self.car_repo
            .find_by_id(id)
            .await?
            .ok_or(FleetError::CarNotFound(id))
    }

    pub async fn create(&self, input: CarInput) -> FleetResult<Car> {
        let draft = validate_car(&input).map_err(FleetError::Validation)?;
        let car = self.car_repo.create(&draft).await?;

        tracing::info!(
            car_id = %car.id,
            registration = %car.registration,
            daily_rate = %car.daily_rate,
            "Car added"
        );

        Ok(car)
    }

    /// Existing rentals keep their stored totals when the rate changes
    pub async fn update(&self, id: CarId, input: CarInput) -> FleetResult<Car> {
        self.get(id).await?;

        let draft = validate_car(&input).map_err(FleetError::Validation)?;
        let car = self
            .car_repo
            .update(id, &draft)
            .await?
            .ok_or(FleetError::CarNotFound(id))?;

        tracing::info!(car_id = %car.id, daily_rate = %car.daily_rate, "Car updated");

        Ok(car)
    }

    /// Rentals and service records of the car are removed with it
    pub async fn delete(&self, id: CarId) -> FleetResult<()> {
        if !self.car_repo.delete(id).await? {
            return Err(FleetError::CarNotFound(id));
        }

        tracing::info!(car_id = %id, "Car deleted");
        Ok(())
    }
}
