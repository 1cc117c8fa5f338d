//! Service Record Entity
//!
//! A maintenance entry against a car.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CarId, ServiceRecordId};
use serde::Serialize;

use crate::domain::value_object::money::Money;

#[derive(Debug, Clone, Serialize)]
pub struct ServiceRecord {
    pub id: ServiceRecordId,
    pub car_id: CarId,
    pub service_date: Option<NaiveDate>,
    /// What was done, e.g. "Oil change"
    pub service_type: String,
    pub cost: Money,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecordDraft {
    pub car_id: CarId,
    pub service_date: Option<NaiveDate>,
    pub service_type: String,
    pub cost: Money,
    pub remarks: Option<String>,
}

impl ServiceRecordDraft {
    pub fn into_record(self, id: ServiceRecordId, created_at: DateTime<Utc>) -> ServiceRecord {
        ServiceRecord {
            id,
            car_id: self.car_id,
            service_date: self.service_date,
            service_type: self.service_type,
            cost: self.cost,
            remarks: self.remarks,
            created_at,
        }
    }
}

/// A service record joined with its car's name
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRecordSummary {
    #[serde(flatten)]
    pub record: ServiceRecord,
    pub car_name: String,
}
