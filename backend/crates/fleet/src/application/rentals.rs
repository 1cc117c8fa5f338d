//! Rental Use Cases
//!
//! Rentals are the only records whose saving touches another table: the
//! total cost is derived from the car's current daily rate, and the car's
//! status follows the rental's lifecycle.
//!
//! - create: car becomes `rented`
//! - update, completed/cancelled: car becomes `available`
//! - update, active: car becomes `rented`; a swapped-out car becomes `available`
//! - delete: car becomes `available`

use std::sync::Arc;

use kernel::id::{CarId, CustomerId, RentalId};

use crate::domain::entity::car::Car;
use crate::domain::entity::customer::Customer;
use crate::domain::entity::rental::{Rental, RentalDraft, RentalSummary};
use crate::domain::repository::{CarRepository, CustomerRepository, RentalRepository};
use crate::domain::services::rental_cost;
use crate::domain::validation::{ValidationErrors, required_date, required_id};
use crate::domain::value_object::car_status::CarStatus;
use crate::domain::value_object::rental_period::RentalPeriod;
use crate::domain::value_object::rental_status::RentalStatus;
use crate::error::{FleetError, FleetResult};

/// Raw rental form fields
#[derive(Debug, Clone, Default)]
pub struct RentalInput {
    pub car_id: String,
    pub customer_id: String,
    pub start_date: String,
    pub end_date: String,
    /// Ignored on create
    pub status: String,
}

/// Choices for the car and customer selects
#[derive(Debug, Clone)]
pub struct RentalFormOptions {
    pub cars: Vec<Car>,
    pub customers: Vec<Customer>,
}

/// Rental use case
pub struct RentalUseCase<C, U, R>
where
    C: CarRepository,
    U: CustomerRepository,
    R: RentalRepository,
{
    car_repo: Arc<C>,
    customer_repo: Arc<U>,
    rental_repo: Arc<R>,
}

impl<C, U, R> RentalUseCase<C, U, R>
where
    C: CarRepository,
    U: CustomerRepository,
    R: RentalRepository,
{
    pub fn new(car_repo: Arc<C>, customer_repo: Arc<U>, rental_repo: Arc<R>) -> Self {
        Self {
            car_repo,
            customer_repo,
            rental_repo,
        }
    }

    pub async fn list(&self) -> FleetResult<Vec<RentalSummary>> {
        self.rental_repo.list().await
    }

    pub async fn get(&self, id: RentalId) -> FleetResult<Rental> {
        self.rental_repo
            .find_by_id(id)
            .await?
            .ok_or(FleetError::RentalNotFound(id))
    }

    /// Select options for the add form (`only_rentable`) or the edit form
    pub async fn form_options(&self, only_rentable: bool) -> FleetResult<RentalFormOptions> {
        let mut cars = self.car_repo.list().await?;
        if only_rentable {
            cars.retain(|car| car.status.is_offered_for_rental());
        }
        let customers = self.customer_repo.list().await?;

        Ok(RentalFormOptions { cars, customers })
    }

    pub async fn create(&self, input: RentalInput) -> FleetResult<Rental> {
        let draft = self.validate(&input, false).await?;
        let rental = self.rental_repo.create(&draft).await?;

        self.car_repo
            .set_status(rental.car_id, CarStatus::Rented)
            .await?;

        tracing::info!(
            rental_id = %rental.id,
            car_id = %rental.car_id,
            customer_id = %rental.customer_id,
            days = rental.period.days(),
            total_cost = %rental.total_cost,
            "Rental created"
        );

        Ok(rental)
    }

    /// Recomputes the total with the car's current rate
    pub async fn update(&self, id: RentalId, input: RentalInput) -> FleetResult<Rental> {
        let previous = self.get(id).await?;

        let draft = self.validate(&input, true).await?;

        let rental = self
            .rental_repo
            .update(id, &draft)
            .await?
            .ok_or(FleetError::RentalNotFound(id))?;

        let car_status = if rental.status.releases_car() {
            CarStatus::Available
        } else {
            CarStatus::Rented
        };
        self.car_repo.set_status(rental.car_id, car_status).await?;
        if previous.car_id != rental.car_id {
            self.car_repo
                .set_status(previous.car_id, CarStatus::Available)
                .await?;
        }

        tracing::info!(
            rental_id = %rental.id,
            status = %rental.status,
            total_cost = %rental.total_cost,
            "Rental updated"
        );

        Ok(rental)
    }

    pub async fn delete(&self, id: RentalId) -> FleetResult<()> {
        let rental = self.get(id).await?;

        if !self.rental_repo.delete(id).await? {
            return Err(FleetError::RentalNotFound(id));
        }
        self.car_repo
            .set_status(rental.car_id, CarStatus::Available)
            .await?;

        tracing::info!(rental_id = %id, car_id = %rental.car_id, "Rental deleted");
        Ok(())
    }

    /// Field checks, reference lookups and cost calculation.
    /// New rentals are always `active`.
    async fn validate(&self, input: &RentalInput, with_status: bool) -> FleetResult<RentalDraft> {
        let mut errors = ValidationErrors::new();

        let status = match input.status.trim() {
            code if with_status && !code.is_empty() => {
                let status = RentalStatus::from_code(code);
                if status.is_none() {
                    errors.add("status", "Status is not a valid choice");
                }
                status
            }
            _ => Some(RentalStatus::Active),
        };

        let car_id: Option<CarId> = required_id(&mut errors, "car_id", "Car", &input.car_id);
        let customer_id: Option<CustomerId> =
            required_id(&mut errors, "customer_id", "Customer", &input.customer_id);
        let start = required_date(&mut errors, "start_date", "Start date", &input.start_date);
        let end = required_date(&mut errors, "end_date", "End date", &input.end_date);

        let period = match (start, end) {
            (Some(start), Some(end)) => match RentalPeriod::new(start, end) {
                Ok(period) => Some(period),
                Err(e) => {
                    errors.add("end_date", e.to_string());
                    None
                }
            },
            _ => None,
        };

        let car = match car_id {
            Some(id) => {
                let car = self.car_repo.find_by_id(id).await?;
                if car.is_none() {
                    errors.add("car_id", "Selected car does not exist");
                }
                car
            }
            None => None,
        };
        if let Some(id) = customer_id
            && self.customer_repo.find_by_id(id).await?.is_none()
        {
            errors.add("customer_id", "Selected customer does not exist");
        }

        let (Some(car), Some(customer_id), Some(period), Some(status)) =
            (car, customer_id, period, status)
        else {
            return Err(FleetError::Validation(errors));
        };
        if !errors.is_empty() {
            return Err(FleetError::Validation(errors));
        }

        let total_cost = match rental_cost(&period, car.daily_rate) {
            Ok(cost) => cost,
            Err(e) => {
                errors.add("end_date", e.to_string());
                return Err(FleetError::Validation(errors));
            }
        };

        Ok(RentalDraft {
            car_id: car.id,
            customer_id,
            period,
            total_cost,
            status,
        })
    }
}
