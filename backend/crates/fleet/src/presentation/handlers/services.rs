//! Service record pages

use axum::Form;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use kernel::id::ServiceRecordId;
use platform::flash::Flash;
use serde::Serialize;

use super::{FleetAppState, parse_id};
use crate::application::ServiceRecordUseCase;
use crate::domain::entity::service_record::ServiceRecordSummary;
use crate::domain::repository::FleetRepository;
use crate::domain::validation::ValidationErrors;
use crate::error::{FleetError, FleetResult, VALIDATION_STATUS};
use crate::presentation::dto::ServiceRecordForm;
use crate::presentation::view_model::{FormOptions, FormView, OptionView, PageView};

const NAV: &str = "services";
const FORM: &str = "services/form.html";

fn use_case<R: FleetRepository>(state: &FleetAppState<R>) -> ServiceRecordUseCase<R, R> {
    ServiceRecordUseCase::new(state.repo.clone(), state.repo.clone())
}

#[derive(Serialize)]
struct ServiceListView {
    services: Vec<ServiceRecordSummary>,
}

async fn form_page<R: FleetRepository>(
    state: &FleetAppState<R>,
    title: &str,
    action: String,
    submit_label: &'static str,
    form: ServiceRecordForm,
    errors: &ValidationErrors,
) -> FleetResult<PageView<FormView<ServiceRecordForm>>> {
    let cars = use_case(state).car_options().await?;
    let options = FormOptions {
        cars: OptionView::cars(&cars, &form.car_id),
        ..Default::default()
    };
    let view = FormView::new(action, submit_label, form)
        .with_errors(errors)
        .with_options(options);

    Ok(PageView::new(title, NAV, view))
}

/// GET /services
pub async fn list_services<R>(
    State(state): State<FleetAppState<R>>,
    headers: HeaderMap,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let services = use_case(&state).list().await?;
    state.render_with_flash(
        &headers,
        "services/list.html",
        PageView::new("Service records", NAV, ServiceListView { services }),
    )
}

/// GET /services/add
pub async fn add_service_form<R>(State(state): State<FleetAppState<R>>) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let page = form_page(
        &state,
        "Add service record",
        "/services/add".into(),
        "Add record",
        ServiceRecordForm::default(),
        &ValidationErrors::new(),
    )
    .await?;
    state.render(StatusCode::OK, FORM, &page)
}

/// POST /services/add
pub async fn add_service<R>(
    State(state): State<FleetAppState<R>>,
    Form(form): Form<ServiceRecordForm>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    match use_case(&state).create(form.clone().into()).await {
        Ok(_) => Ok(state.redirect("/services", Flash::success("Service record added."))),
        Err(FleetError::Validation(errors)) => {
            let page = form_page(
                &state,
                "Add service record",
                "/services/add".into(),
                "Add record",
                form,
                &errors,
            )
            .await?;
            state.render(VALIDATION_STATUS, FORM, &page)
        }
        Err(e) => Err(e),
    }
}

/// GET /services/edit/{id}
pub async fn edit_service_form<R>(
    State(state): State<FleetAppState<R>>,
    Path(id): Path<String>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let id: ServiceRecordId = parse_id(&id)?;
    let record = use_case(&state).get(id).await?;
    let page = form_page(
        &state,
        "Edit service record",
        format!("/services/edit/{id}"),
        "Save changes",
        ServiceRecordForm::from(&record),
        &ValidationErrors::new(),
    )
    .await?;
    state.render(StatusCode::OK, FORM, &page)
}

/// POST /services/edit/{id}
pub async fn edit_service<R>(
    State(state): State<FleetAppState<R>>,
    Path(id): Path<String>,
    Form(form): Form<ServiceRecordForm>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let id: ServiceRecordId = parse_id(&id)?;
    match use_case(&state).update(id, form.clone().into()).await {
        Ok(_) => Ok(state.redirect("/services", Flash::success("Service record updated."))),
        Err(FleetError::Validation(errors)) => {
            let page = form_page(
                &state,
                "Edit service record",
                format!("/services/edit/{id}"),
                "Save changes",
                form,
                &errors,
            )
            .await?;
            state.render(VALIDATION_STATUS, FORM, &page)
        }
        Err(e) => Err(e),
    }
}

/// POST /services/delete/{id}
pub async fn delete_service<R>(
    State(state): State<FleetAppState<R>>,
    Path(id): Path<String>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    use_case(&state).delete(parse_id(&id)?).await?;
    Ok(state.redirect("/services", Flash::info("Service record deleted.")))
}
