//! Customer Use Cases

use std::sync::Arc;

use kernel::id::CustomerId;

use crate::domain::entity::customer::{Customer, CustomerDraft};
use crate::domain::repository::CustomerRepository;
use crate::domain::validation::{ValidationErrors, optional_email, optional_text, required_text};
use crate::error::{FleetError, FleetResult};

/// Raw customer form fields
#[derive(Debug, Clone, Default)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_no: String,
    pub address: String,
}

pub fn validate_customer(input: &CustomerInput) -> Result<CustomerDraft, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = required_text(&mut errors, "name", "Name", &input.name, 120);
    let email = optional_email(&mut errors, "email", &input.email);
    let phone = optional_text(&mut errors, "phone", "Phone", &input.phone, 40);
    let license_no = optional_text(
        &mut errors,
        "license_no",
        "Licence number",
        &input.license_no,
        64,
    );
    let address = optional_text(&mut errors, "address", "Address", &input.address, 500);

    let Some(name) = name else {
        return Err(errors);
    };

    errors.finish(CustomerDraft {
        name,
        email,
        phone,
        license_no,
        address,
    })
}

/// Customer CRUD use case
pub struct CustomerUseCase<U>
where
    U: CustomerRepository,
{
    customer_repo: Arc<U>,
}

impl<U> CustomerUseCase<U>
where
    U: CustomerRepository,
{
    pub fn new(customer_repo: Arc<U>) -> Self {
        Self { customer_repo }
    }

    pub async fn list(&self) -> FleetResult<Vec<Customer>> {
        self.customer_repo.list().await
    }

    pub async fn get(&self, id: CustomerId) -> FleetResult<Customer> {
        self.customer_repo
            .find_by_id(id)
            .await?
            .ok_or(FleetError::CustomerNotFound(id))
    }

    pub async fn create(&self, input: CustomerInput) -> FleetResult<Customer> {
        let draft = validate_customer(&input).map_err(FleetError::Validation)?;
        let customer = self.customer_repo.create(&draft).await?;

        tracing::info!(customer_id = %customer.id, "Customer added");
        Ok(customer)
    }

    pub async fn update(&self, id: CustomerId, input: CustomerInput) -> FleetResult<Customer> {
        self.get(id).await?;

        let draft = validate_customer(&input).map_err(FleetError::Validation)?;
        let customer = self
            .customer_repo
            .update(id, &draft)
            .await?
            .ok_or(FleetError::CustomerNotFound(id))?;

        tracing::info!(customer_id = %customer.id, "Customer updated");
        Ok(customer)
    }

    pub async fn delete(&self, id: CustomerId) -> FleetResult<()> {
        if !self.customer_repo.delete(id).await? {
            return Err(FleetError::CustomerNotFound(id));
        }

        tracing::info!(customer_id = %id, "Customer deleted");
        Ok(())
    }
}
