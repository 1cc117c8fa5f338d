//! Form DTOs (Data Transfer Objects)
//!
//! Every field is kept as the submitted text so a rejected form can be
//! shown again exactly as it was typed.

use serde::{Deserialize, Serialize};

use crate::application::{CarInput, CustomerInput, RentalInput, ServiceRecordInput};
use crate::domain::entity::{
    car::Car, customer::Customer, rental::Rental, service_record::ServiceRecord,
};

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Body of POST /cars/add and /cars/edit/{id}
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CarForm {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub registration: String,
    pub daily_rate: String,
    pub status: String,
    pub description: String,
}

impl From<CarForm> for CarInput {
    fn from(form: CarForm) -> Self {
        CarInput {
            name: form.name,
            brand: form.brand,
            model: form.model,
            year: form.year,
            registration: form.registration,
            daily_rate: form.daily_rate,
            status: form.status,
            description: form.description,
        }
    }
}

impl From<&Car> for CarForm {
    fn from(car: &Car) -> Self {
        CarForm {
            name: car.name.clone(),
            brand: text(&car.brand),
            model: text(&car.model),
            year: car.year.map(|y| y.to_string()).unwrap_or_default(),
            registration: car.registration.clone(),
            daily_rate: car.daily_rate.to_string(),
            status: car.status.code().to_string(),
            description: text(&car.description),
        }
    }
}

/// Body of POST /customers/add and /customers/edit/{id}
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_no: String,
    pub address: String,
}

impl From<CustomerForm> for CustomerInput {
    fn from(form: CustomerForm) -> Self {
        CustomerInput {
            name: form.name,
            email: form.email,
            phone: form.phone,
            license_no: form.license_no,
            address: form.address,
        }
    }
}

impl From<&Customer> for CustomerForm {
    fn from(customer: &Customer) -> Self {
        CustomerForm {
            name: customer.name.clone(),
            email: customer
                .email
                .as_ref()
                .map(|e| e.as_str().to_string())
                .unwrap_or_default(),
            phone: text(&customer.phone),
            license_no: text(&customer.license_no),
            address: text(&customer.address),
        }
    }
}

/// Body of POST /rentals/add and /rentals/edit/{id}
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RentalForm {
    pub car_id: String,
    pub customer_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl From<RentalForm> for RentalInput {
    fn from(form: RentalForm) -> Self {
        RentalInput {
            car_id: form.car_id,
            customer_id: form.customer_id,
            start_date: form.start_date,
            end_date: form.end_date,
            status: form.status,
        }
    }
}

impl From<&Rental> for RentalForm {
    fn from(rental: &Rental) -> Self {
        RentalForm {
            car_id: rental.car_id.to_string(),
            customer_id: rental.customer_id.to_string(),
            start_date: rental.period.start().to_string(),
            end_date: rental.period.end().to_string(),
            status: rental.status.code().to_string(),
        }
    }
}

/// Body of POST /services/add and /services/edit/{id}
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceRecordForm {
    pub car_id: String,
    pub service_date: String,
    pub service_type: String,
    pub cost: String,
    pub remarks: String,
}

impl From<ServiceRecordForm> for ServiceRecordInput {
    fn from(form: ServiceRecordForm) -> Self {
        ServiceRecordInput {
            car_id: form.car_id,
            service_date: form.service_date,
            service_type: form.service_type,
            cost: form.cost,
            remarks: form.remarks,
        }
    }
}

impl From<&ServiceRecord> for ServiceRecordForm {
    fn from(record: &ServiceRecord) -> Self {
        ServiceRecordForm {
            car_id: record.car_id.to_string(),
            service_date: record
                .service_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            service_type: record.service_type.clone(),
            cost: record.cost.to_string(),
            remarks: text(&record.remarks),
        }
    }
}
