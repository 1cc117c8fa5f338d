//! Fleet Backend Module
//!
//! Record keeping for a small car-rental business: cars, customers,
//! rentals and service records, served as HTML pages.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, rental cost, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, form DTOs, views
//!
//! ## Rental cost
//! A rental's total is `days x daily rate`, computed when the rental is
//! saved. Later changes to the car's rate leave stored totals untouched.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::FleetConfig;
pub use error::{FleetError, FleetResult};
pub use infra::postgres::PgFleetRepository;
pub use presentation::router::{fleet_router, fleet_router_generic};
pub use presentation::views::Views;

#[cfg(test)]
mod tests;
