//! Customer Entity

use chrono::{DateTime, Utc};
use kernel::id::CustomerId;
use serde::Serialize;

use crate::domain::value_object::email::Email;

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Option<Email>,
    pub phone: Option<String>,
    /// Driving licence number
    pub license_no: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub name: String,
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub license_no: Option<String>,
    pub address: Option<String>,
}

impl CustomerDraft {
    pub fn into_customer(self, id: CustomerId, created_at: DateTime<Utc>) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            license_no: self.license_no,
            address: self.address,
            created_at,
        }
    }
}
