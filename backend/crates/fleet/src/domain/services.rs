//! Domain Services
//!
//! Rental pricing.

use crate::domain::value_object::{money::Money, rental_period::RentalPeriod};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RentalCostError {
    #[error("Total cost is too large")]
    Overflow,
}

/// Total cost of a rental: billed days times the daily rate
///
/// `RentalPeriod` guarantees at least one day, so a zero or negative
/// total can only come from a zero rate.
pub fn rental_cost(period: &RentalPeriod, daily_rate: Money) -> Result<Money, RentalCostError> {
    daily_rate
        .checked_mul(period.days())
        .ok_or(RentalCostError::Overflow)
}
