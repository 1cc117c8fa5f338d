//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Entities (Car, Customer, Rental, ServiceRecord) and their drafts
//! - Value objects (Money, CarStatus, RentalStatus, RentalPeriod, Email)
//! - Domain services (rental cost)
//! - Field validation shared by the use cases
//! - Repository traits (interfaces)

pub mod entity;
pub mod repository;
pub mod services;
pub mod validation;
pub mod value_object;
