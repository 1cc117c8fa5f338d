//! Rental pages

use axum::Form;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use kernel::id::RentalId;
use platform::flash::Flash;
use serde::Serialize;

use super::{FleetAppState, parse_id};
use crate::application::{RentalFormOptions, RentalUseCase};
use crate::domain::entity::rental::RentalSummary;
use crate::domain::repository::FleetRepository;
use crate::domain::validation::ValidationErrors;
use crate::error::{FleetError, FleetResult, VALIDATION_STATUS};
use crate::presentation::dto::RentalForm;
use crate::presentation::view_model::{FormOptions, FormView, OptionView, PageView};

const NAV: &str = "rentals";
const FORM: &str = "rentals/form.html";

type UseCase<R> = RentalUseCase<R, R, R>;

fn use_case<R: FleetRepository>(state: &FleetAppState<R>) -> UseCase<R> {
    RentalUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone())
}

#[derive(Serialize)]
struct RentalListView {
    rentals: Vec<RentalSummary>,
}

/// Add and edit share one template; only the edit form has a status select
enum Mode {
    Add,
    Edit(RentalId),
}

impl Mode {
    fn title(&self) -> &'static str {
        match self {
            Mode::Add => "New rental",
            Mode::Edit(_) => "Edit rental",
        }
    }

    fn action(&self) -> String {
        match self {
            Mode::Add => "/rentals/add".to_string(),
            Mode::Edit(id) => format!("/rentals/edit/{id}"),
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            Mode::Add => "Create rental",
            Mode::Edit(_) => "Save changes",
        }
    }
}

async fn form_page<R: FleetRepository>(
    state: &FleetAppState<R>,
    mode: Mode,
    form: RentalForm,
    errors: &ValidationErrors,
) -> FleetResult<PageView<FormView<RentalForm>>> {
    let RentalFormOptions { cars, customers } = use_case(state)
        .form_options(matches!(mode, Mode::Add))
        .await?;

    let options = FormOptions {
        cars: OptionView::cars(&cars, &form.car_id),
        customers: OptionView::customers(&customers, &form.customer_id),
        statuses: match mode {
            Mode::Add => Vec::new(),
            Mode::Edit(_) => OptionView::rental_statuses(&form.status),
        },
    };
    let view = FormView::new(mode.action(), mode.submit_label(), form)
        .with_errors(errors)
        .with_options(options);

    Ok(PageView::new(mode.title(), NAV, view))
}

/// GET /rentals
pub async fn list_rentals<R>(
    State(state): State<FleetAppState<R>>,
    headers: HeaderMap,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let rentals = use_case(&state).list().await?;
    state.render_with_flash(
        &headers,
        "rentals/list.html",
        PageView::new("Rentals", NAV, RentalListView { rentals }),
    )
}

/// GET /rentals/add
pub async fn add_rental_form<R>(State(state): State<FleetAppState<R>>) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let page = form_page(
        &state,
        Mode::Add,
        RentalForm::default(),
        &ValidationErrors::new(),
    )
    .await?;
    state.render(StatusCode::OK, FORM, &page)
}

/// POST /rentals/add
pub async fn add_rental<R>(
    State(state): State<FleetAppState<R>>,
    Form(form): Form<RentalForm>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    match use_case(&state).create(form.clone().into()).await {
        Ok(rental) => Ok(state.redirect(
            "/rentals",
            Flash::success(format!(
                "Rental created. Total cost: {}.",
                rental.total_cost
            )),
        )),
        Err(FleetError::Validation(errors)) => {
            let page = form_page(&state, Mode::Add, form, &errors).await?;
            state.render(VALIDATION_STATUS, FORM, &page)
        }
        Err(e) => Err(e),
    }
}

/// GET /rentals/edit/{id}
pub async fn edit_rental_form<R>(
    State(state): State<FleetAppState<R>>,
    Path(id): Path<String>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let id: RentalId = parse_id(&id)?;
    let rental = use_case(&state).get(id).await?;
    let page = form_page(
        &state,
        Mode::Edit(id),
        RentalForm::from(&rental),
        &ValidationErrors::new(),
    )
    .await?;
    state.render(StatusCode::OK, FORM, &page)
}

/// POST /rentals/edit/{id}
pub async fn edit_rental<R>(
    State(state): State<FleetAppState<R>>,
    Path(id): Path<String>,
    Form(form): Form<RentalForm>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let id: RentalId = parse_id(&id)?;
    match use_case(&state).update(id, form.clone().into()).await {
        Ok(rental) => Ok(state.redirect(
            "/rentals",
            Flash::success(format!(
                "Rental updated. Total cost: {}.",
                rental.total_cost
            )),
        )),
        Err(FleetError::Validation(errors)) => {
            let page = form_page(&state, Mode::Edit(id), form, &errors).await?;
            state.render(VALIDATION_STATUS, FORM, &page)
        }
        Err(e) => Err(e),
    }
}

/// POST /rentals/delete/{id}
pub async fn delete_rental<R>(
    State(state): State<FleetAppState<R>>,
    Path(id): Path<String>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    use_case(&state).delete(parse_id(&id)?).await?;
    Ok(state.redirect("/rentals", Flash::info("Rental deleted.")))
}
