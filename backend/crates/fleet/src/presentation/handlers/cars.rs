//! Car pages

use axum::Form;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use kernel::id::CarId;
use platform::flash::Flash;
use serde::Serialize;

use super::{FleetAppState, parse_id};
use crate::application::CarUseCase;
use crate::domain::entity::car::Car;
use crate::domain::repository::FleetRepository;
use crate::domain::validation::ValidationErrors;
use crate::error::{FleetError, FleetResult, VALIDATION_STATUS};
use crate::presentation::dto::CarForm;
use crate::presentation::view_model::{FormOptions, FormView, OptionView, PageView};

const NAV: &str = "cars";
const FORM: &str = "cars/form.html";

#[derive(Serialize)]
struct CarListView {
    cars: Vec<Car>,
}

fn form_page(
    title: &str,
    action: String,
    submit_label: &'static str,
    form: CarForm,
    errors: &ValidationErrors,
) -> PageView<FormView<CarForm>> {
    let options = FormOptions {
        statuses: OptionView::car_statuses(&form.status),
        ..Default::default()
    };
    let view = FormView::new(action, submit_label, form)
        .with_errors(errors)
        .with_options(options);
    PageView::new(title, NAV, view)
}

/// GET /cars
pub async fn list_cars<R>(
    State(state): State<FleetAppState<R>>,
    headers: HeaderMap,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let cars = CarUseCase::new(state.repo.clone()).list().await?;
    state.render_with_flash(
        &headers,
        "cars/list.html",
        PageView::new("Cars", NAV, CarListView { cars }),
    )
}

/// GET /cars/add
pub async fn add_car_form<R>(State(state): State<FleetAppState<R>>) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let page = form_page(
        "Add car",
        "/cars/add".into(),
        "Add car",
        CarForm::default(),
        &ValidationErrors::new(),
    );
    state.render(StatusCode::OK, FORM, &page)
}

/// POST /cars/add
pub async fn add_car<R>(
    State(state): State<FleetAppState<R>>,
    Form(form): Form<CarForm>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    match CarUseCase::new(state.repo.clone())
        .create(form.clone().into())
        .await
    {
        Ok(car) => Ok(state.redirect("/cars", Flash::success(format!("Car {} added.", car.name)))),
        Err(FleetError::Validation(errors)) => {
            let page = form_page("Add car", "/cars/add".into(), "Add car", form, &errors);
            state.render(VALIDATION_STATUS, FORM, &page)
        }
        Err(e) => Err(e),
    }
}

/// GET /cars/edit/{id}
pub async fn edit_car_form<R>(
    State(state): State<FleetAppState<R>>,
    Path(id): Path<String>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let id: CarId = parse_id(&id)?;
    let car = CarUseCase::new(state.repo.clone()).get(id).await?;
    let page = form_page(
        "Edit car",
        format!("/cars/edit/{id}"),
        "Save changes",
        CarForm::from(&car),
        &ValidationErrors::new(),
    );
    state.render(StatusCode::OK, FORM, &page)
}

/// POST /cars/edit/{id}
pub async fn edit_car<R>(
    State(state): State<FleetAppState<R>>,
    Path(id): Path<String>,
    Form(form): Form<CarForm>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    let id: CarId = parse_id(&id)?;
    match CarUseCase::new(state.repo.clone())
        .update(id, form.clone().into())
        .await
    {
        Ok(car) => Ok(state.redirect("/cars", Flash::success(format!("Car {} updated.", car.name)))),
        Err(FleetError::Validation(errors)) => {
            let page = form_page(
                "Edit car",
                format!("/cars/edit/{id}"),
                "Save changes",
                form,
                &errors,
            );
            state.render(VALIDATION_STATUS, FORM, &page)
        }
        Err(e) => Err(e),
    }
}

/// POST /cars/delete/{id}
pub async fn delete_car<R>(
    State(state): State<FleetAppState<R>>,
    Path(id): Path<String>,
) -> FleetResult<Response>
where
    R: FleetRepository,
{
    CarUseCase::new(state.repo.clone())
        .delete(parse_id(&id)?)
        .await?;
    Ok(state.redirect("/cars", Flash::info("Car deleted.")))
}
