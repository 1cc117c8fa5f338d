//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and repositories.

pub mod cars;
pub mod config;
pub mod customers;
pub mod dashboard;
pub mod rentals;
pub mod service_records;

// Re-exports
pub use cars::{CarInput, CarUseCase};
pub use config::FleetConfig;
pub use customers::{CustomerInput, CustomerUseCase};
pub use dashboard::{DashboardOutput, DashboardUseCase};
pub use rentals::{RentalFormOptions, RentalInput, RentalUseCase};
pub use service_records::{ServiceRecordInput, ServiceRecordUseCase};
