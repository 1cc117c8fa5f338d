//! Fleet Router

use crate::application::config::FleetConfig;
use crate::domain::repository::FleetRepository;
use crate::infra::postgres::PgFleetRepository;
use crate::presentation::handlers::{
    FleetAppState, cars, customers, dashboard, rentals, services,
};
use crate::presentation::views::Views;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Create the fleet router with PostgreSQL repository
pub fn fleet_router(repo: PgFleetRepository, views: Views, config: FleetConfig) -> Router {
    fleet_router_generic(repo, views, config)
}

/// Create a generic fleet router for any repository implementation
pub fn fleet_router_generic<R>(repo: R, views: Views, config: FleetConfig) -> Router
where
    R: FleetRepository,
{
    let state = FleetAppState {
        repo: Arc::new(repo),
        views: Arc::new(views),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(dashboard::dashboard::<R>))
        // Cars
        .route("/cars", get(cars::list_cars::<R>))
        .route(
            "/cars/add",
            get(cars::add_car_form::<R>).post(cars::add_car::<R>),
        )
        .route(
            "/cars/edit/{id}",
            get(cars::edit_car_form::<R>).post(cars::edit_car::<R>),
        )
        .route("/cars/delete/{id}", post(cars::delete_car::<R>))
        // Customers
        .route("/customers", get(customers::list_customers::<R>))
        .route(
            "/customers/add",
            get(customers::add_customer_form::<R>).post(customers::add_customer::<R>),
        )
        .route(
            "/customers/edit/{id}",
            get(customers::edit_customer_form::<R>).post(customers::edit_customer::<R>),
        )
        .route(
            "/customers/delete/{id}",
            post(customers::delete_customer::<R>),
        )
        // Rentals
        .route("/rentals", get(rentals::list_rentals::<R>))
        .route(
            "/rentals/add",
            get(rentals::add_rental_form::<R>).post(rentals::add_rental::<R>),
        )
        .route(
            "/rentals/edit/{id}",
            get(rentals::edit_rental_form::<R>).post(rentals::edit_rental::<R>),
        )
        .route("/rentals/delete/{id}", post(rentals::delete_rental::<R>))
        // Service records
        .route("/services", get(services::list_services::<R>))
        .route(
            "/services/add",
            get(services::add_service_form::<R>).post(services::add_service::<R>),
        )
        .route(
            "/services/edit/{id}",
            get(services::edit_service_form::<R>).post(services::edit_service::<R>),
        )
        .route("/services/delete/{id}", post(services::delete_service::<R>))
        .with_state(state)
}
