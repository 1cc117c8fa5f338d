//! Rental Entity
//!
//! Associates one car with one customer over a period. The total cost is
//! fixed when the rental is saved and is not recomputed on read.

use chrono::{DateTime, Utc};
use kernel::id::{CarId, CustomerId, RentalId};
use serde::Serialize;

use crate::domain::value_object::{
    money::Money, rental_period::RentalPeriod, rental_status::RentalStatus,
};

#[derive(Debug, Clone, Serialize)]
pub struct Rental {
    pub id: RentalId,
    pub car_id: CarId,
    pub customer_id: CustomerId,
    pub period: RentalPeriod,
    pub total_cost: Money,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalDraft {
    pub car_id: CarId,
    pub customer_id: CustomerId,
    pub period: RentalPeriod,
    pub total_cost: Money,
    pub status: RentalStatus,
}

impl RentalDraft {
    pub fn into_rental(self, id: RentalId, created_at: DateTime<Utc>) -> Rental {
        Rental {
            id,
            car_id: self.car_id,
            customer_id: self.customer_id,
            period: self.period,
            total_cost: self.total_cost,
            status: self.status,
            created_at,
        }
    }
}

/// A rental joined with the names of its car and customer
#[derive(Debug, Clone, Serialize)]
pub struct RentalSummary {
    #[serde(flatten)]
    pub rental: Rental,
    pub car_name: String,
    pub customer_name: String,
}
