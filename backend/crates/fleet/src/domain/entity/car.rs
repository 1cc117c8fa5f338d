//! Car Entity

use chrono::{DateTime, Utc};
use kernel::id::CarId;
use serde::Serialize;

use crate::domain::value_object::{car_status::CarStatus, money::Money};

/// A car in the fleet
#[derive(Debug, Clone, Serialize)]
pub struct Car {
    pub id: CarId,
    /// Display name, e.g. "Blue Civic"
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    /// Licence plate or other registration identifier
    pub registration: String,
    pub daily_rate: Money,
    pub status: CarStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Car {
    /// Name shown in select boxes and joined listings
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.registration)
    }
}

/// Validated field values for inserting or updating a car
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarDraft {
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub registration: String,
    pub daily_rate: Money,
    pub status: CarStatus,
    pub description: Option<String>,
}

impl CarDraft {
    /// Materialize a draft as a stored row
    pub fn into_car(self, id: CarId, created_at: DateTime<Utc>) -> Car {
        Car {
            id,
            name: self.name,
            brand: self.brand,
            model: self.model,
            year: self.year,
            registration: self.registration,
            daily_rate: self.daily_rate,
            status: self.status,
            description: self.description,
            created_at,
        }
    }
}
