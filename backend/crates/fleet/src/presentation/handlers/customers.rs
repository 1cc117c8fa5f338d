//! Customer pages

use axum::Form;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use kernel::id::CustomerId;
use platform::flash::Flash;
use serde::Serialize;

use super::{FleetAppState, parse_id};
use crate::application::CustomerUseCase;
use crate::domain::entity::customer::Customer;
use crate::domain::repository::FleetRepository;
use crate::domain::validation::ValidationErrors;
use crate::error::{FleetError, FleetResult, VALIDATION_STATUS};
use crate::presentation::dto::CustomerForm;
use crate::presentation::view_model::{FormView, PageView};

const NAV: &str = "customers";
const FORM: &str = "customers/form.html";

#[derive(Serialize)]
struct CustomerListView {
    customers: Vec<Customer>,
}

fn form_page(
    title: &str,
    action: String,
    submit_label: &'static str,
    form: CustomerForm,
    errors: &ValidationErrors,
) -> PageView<FormView<CustomerForm>> {
    PageView::new(
        title,
        NAV,
        FormView::new(action, submit_label, form).with_errors(errors),
    )
}

/// GET /customers
pub async fn list_customers<R>(
    State(state): State<FleetAppState<R>>,
    headers: HeaderMap,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let customers = CustomerUseCase::new(state.repo.clone()).list().await?;
    state.render_with_flash(
        &headers,
        "customers/list.html",
        PageView::new("Customers", NAV, CustomerListView { customers }),
    )
}

/// GET /customers/add
pub async fn add_customer_form<R>(State(state): State<FleetAppState<R>>) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let page = form_page(
        "Add customer",
        "/customers/add".into(),
        "Add customer",
        CustomerForm::default(),
        &ValidationErrors::new(),
    );
    state.render(StatusCode::OK, FORM, &page)
}

/// POST /customers/add
pub async fn add_customer<R>(
    State(state): State<FleetAppState<R>>,
    Form(form): Form<CustomerForm>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    match CustomerUseCase::new(state.repo.clone())
        .create(form.clone().into())
        .await
    {
        Ok(customer) => Ok(state.redirect(
            "/customers",
            Flash::success(format!("Customer {} added.", customer.name)),
        )),
        Err(FleetError::Validation(errors)) => {
            let page = form_page(
                "Add customer",
                "/customers/add".into(),
                "Add customer",
                form,
                &errors,
            );
            state.render(VALIDATION_STATUS, FORM, &page)
        }
        Err(e) => Err(e),
    }
}

/// GET /customers/edit/{id}
pub async fn edit_customer_form<R>(
    State(state): State<FleetAppState<R>>,
    Path(id): Path<String>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let id: CustomerId = parse_id(&id)?;
    let customer = CustomerUseCase::new(state.repo.clone()).get(id).await?;
    let page = form_page(
        "Edit customer",
        format!("/customers/edit/{id}"),
        "Save changes",
        CustomerForm::from(&customer),
        &ValidationErrors::new(),
    );
    state.render(StatusCode::OK, FORM, &page)
}

/// POST /customers/edit/{id}
pub async fn edit_customer<R>(
    State(state): State<FleetAppState<R>>,
    Path(id): Path<String>,
    Form(form): Form<CustomerForm>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let id: CustomerId = parse_id(&id)?;
    match CustomerUseCase::new(state.repo.clone())
        .update(id, form.clone().into())
        .await
    {
        Ok(customer) => Ok(state.redirect(
            "/customers",
            Flash::success(format!("Customer {} updated.", customer.name)),
        )),
        Err(FleetError::Validation(errors)) => {
            let page = form_page(
                "Edit customer",
                format!("/customers/edit/{id}"),
                "Save changes",
                form,
                &errors,
            );
            state.render(VALIDATION_STATUS, FORM, &page)
        }
        Err(e) => Err(e),
    }
}

/// POST /customers/delete/{id}
pub async fn delete_customer<R>(
    State(state): State<FleetAppState<R>>,
    Path(id): Path<String>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    CustomerUseCase::new(state.repo.clone())
        .delete(parse_id(&id)?)
        .await?;
    Ok(state.redirect("/customers", Flash::info("Customer deleted.")))
}
