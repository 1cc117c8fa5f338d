//! Value Object Module

pub mod car_status;
pub mod email;
pub mod money;
pub mod rental_period;
pub mod rental_status;
