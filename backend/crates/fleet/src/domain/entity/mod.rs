//! Entity Module

pub mod car;
pub mod customer;
pub mod rental;
pub mod service_record;
