//! Repository Traits
//!
//! Interfaces for data persistence. The PostgreSQL implementation is in the
//! infra layer. Every method is a single statement; callers do not rely on
//! transactions spanning calls.

use kernel::id::{CarId, CustomerId, RentalId, ServiceRecordId};
use serde::Serialize;

use crate::domain::entity::{
    car::{Car, CarDraft},
    customer::{Customer, CustomerDraft},
    rental::{Rental, RentalDraft, RentalSummary},
    service_record::{ServiceRecord, ServiceRecordDraft, ServiceRecordSummary},
};
use crate::domain::value_object::car_status::CarStatus;
use crate::error::FleetResult;

/// Car repository trait
#[trait_variant::make(CarRepository: Send)]
pub trait LocalCarRepository {
    /// All cars in insertion order
    async fn list(&self) -> FleetResult<Vec<Car>>;

    async fn find_by_id(&self, id: CarId) -> FleetResult<Option<Car>>;

    async fn create(&self, draft: &CarDraft) -> FleetResult<Car>;

    /// Returns `None` when no row has this id
    async fn update(&self, id: CarId, draft: &CarDraft) -> FleetResult<Option<Car>>;

    async fn set_status(&self, id: CarId, status: CarStatus) -> FleetResult<()>;

    /// Returns `false` when no row has this id
    async fn delete(&self, id: CarId) -> FleetResult<bool>;
}

/// Customer repository trait
#[trait_variant::make(CustomerRepository: Send)]
pub trait LocalCustomerRepository {
    async fn list(&self) -> FleetResult<Vec<Customer>>;

    async fn find_by_id(&self, id: CustomerId) -> FleetResult<Option<Customer>>;

    async fn create(&self, draft: &CustomerDraft) -> FleetResult<Customer>;

    async fn update(&self, id: CustomerId, draft: &CustomerDraft) -> FleetResult<Option<Customer>>;

    async fn delete(&self, id: CustomerId) -> FleetResult<bool>;
}

/// Rental repository trait
#[trait_variant::make(RentalRepository: Send)]
pub trait LocalRentalRepository {
    /// All rentals joined with car and customer names, in insertion order
    async fn list(&self) -> FleetResult<Vec<RentalSummary>>;

    /// Newest rentals first
    async fn recent(&self, limit: i64) -> FleetResult<Vec<RentalSummary>>;

    async fn find_by_id(&self, id: RentalId) -> FleetResult<Option<Rental>>;

    async fn create(&self, draft: &RentalDraft) -> FleetResult<Rental>;

    async fn update(&self, id: RentalId, draft: &RentalDraft) -> FleetResult<Option<Rental>>;

    async fn delete(&self, id: RentalId) -> FleetResult<bool>;
}

/// Service record repository trait
#[trait_variant::make(ServiceRecordRepository: Send)]
pub trait LocalServiceRecordRepository {
    /// All records joined with car names, in insertion order
    async fn list(&self) -> FleetResult<Vec<ServiceRecordSummary>>;

    async fn find_by_id(&self, id: ServiceRecordId) -> FleetResult<Option<ServiceRecord>>;

    async fn create(&self, draft: &ServiceRecordDraft) -> FleetResult<ServiceRecord>;

    async fn update(
        &self,
        id: ServiceRecordId,
        draft: &ServiceRecordDraft,
    ) -> FleetResult<Option<ServiceRecord>>;

    async fn delete(&self, id: ServiceRecordId) -> FleetResult<bool>;
}

/// Row counts shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetCounts {
    pub cars: i64,
    pub customers: i64,
    pub rentals: i64,
    pub service_records: i64,
}

/// Dashboard repository trait
#[trait_variant::make(DashboardRepository: Send)]
pub trait LocalDashboardRepository {
    async fn counts(&self) -> FleetResult<FleetCounts>;
}

/// Everything the HTTP layer needs from one storage handle
pub trait FleetRepository:
    CarRepository
    + CustomerRepository
    + RentalRepository
    + ServiceRecordRepository
    + DashboardRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> FleetRepository for T where
    T: CarRepository
        + CustomerRepository
        + RentalRepository
        + ServiceRecordRepository
        + DashboardRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
