//! Crate-level tests for the fleet module
//! Use cases and HTTP routes run against an in-memory repository.

#[cfg(test)]
mod support {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use kernel::id::{CarId, CustomerId, Id, RentalId, ServiceRecordId};

    use crate::domain::entity::{
        car::{Car, CarDraft},
        customer::{Customer, CustomerDraft},
        rental::{Rental, RentalDraft, RentalSummary},
        service_record::{ServiceRecord, ServiceRecordDraft, ServiceRecordSummary},
    };
    use crate::domain::repository::{
        CarRepository, CustomerRepository, DashboardRepository, FleetCounts, RentalRepository,
        ServiceRecordRepository,
    };
    use crate::domain::value_object::car_status::CarStatus;
    use crate::error::FleetResult;

    #[derive(Default)]
    struct Store {
        last_car: i64,
        last_customer: i64,
        last_rental: i64,
        last_service: i64,
        cars: BTreeMap<i64, Car>,
        customers: BTreeMap<i64, Customer>,
        rentals: BTreeMap<i64, Rental>,
        services: BTreeMap<i64, ServiceRecord>,
    }

    impl Store {
        fn car_name(&self, id: CarId) -> String {
            self.cars
                .get(&id.get())
                .map(|c| c.name.clone())
                .unwrap_or_default()
        }

        fn summarize(&self, rental: &Rental) -> RentalSummary {
            RentalSummary {
                rental: rental.clone(),
                car_name: self.car_name(rental.car_id),
                customer_name: self
                    .customers
                    .get(&rental.customer_id.get())
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
            }
        }
    }

    /// Tables kept in ordered maps; cascades like the SQL schema
    #[derive(Clone, Default)]
    pub struct MemoryRepository {
        store: Arc<Mutex<Store>>,
    }

    impl MemoryRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn car(&self, id: CarId) -> Car {
            self.store.lock().unwrap().cars[&id.get()].clone()
        }

        pub fn customer(&self, id: CustomerId) -> Customer {
            self.store.lock().unwrap().customers[&id.get()].clone()
        }

        pub fn rental(&self, id: RentalId) -> Rental {
            self.store.lock().unwrap().rentals[&id.get()].clone()
        }

        pub fn car_count(&self) -> usize {
            self.store.lock().unwrap().cars.len()
        }

        pub fn rental_count(&self) -> usize {
            self.store.lock().unwrap().rentals.len()
        }
    }

    impl CarRepository for MemoryRepository {
        async fn list(&self) -> FleetResult<Vec<Car>> {
            Ok(self.store.lock().unwrap().cars.values().cloned().collect())
        }

        async fn find_by_id(&self, id: CarId) -> FleetResult<Option<Car>> {
            Ok(self.store.lock().unwrap().cars.get(&id.get()).cloned())
        }

        async fn create(&self, draft: &CarDraft) -> FleetResult<Car> {
            let mut store = self.store.lock().unwrap();
            store.last_car += 1;
            let car = draft.clone().into_car(Id::new(store.last_car), Utc::now());
            store.cars.insert(car.id.get(), car.clone());
            Ok(car)
        }

        async fn update(&self, id: CarId, draft: &CarDraft) -> FleetResult<Option<Car>> {
            let mut store = self.store.lock().unwrap();
            let Some(existing) = store.cars.get_mut(&id.get()) else {
                return Ok(None);
            };
            *existing = draft.clone().into_car(id, existing.created_at);
            Ok(Some(existing.clone()))
        }

        async fn set_status(&self, id: CarId, status: CarStatus) -> FleetResult<()> {
            if let Some(car) = self.store.lock().unwrap().cars.get_mut(&id.get()) {
                car.status = status;
            }
            Ok(())
        }

        async fn delete(&self, id: CarId) -> FleetResult<bool> {
            let mut store = self.store.lock().unwrap();
            let removed = store.cars.remove(&id.get()).is_some();
            store.rentals.retain(|_, r| r.car_id != id);
            store.services.retain(|_, s| s.car_id != id);
            Ok(removed)
        }
    }

    impl CustomerRepository for MemoryRepository {
        async fn list(&self) -> FleetResult<Vec<Customer>> {
            Ok(self
                .store
                .lock()
                .unwrap()
                .customers
                .values()
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, id: CustomerId) -> FleetResult<Option<Customer>> {
            Ok(self.store.lock().unwrap().customers.get(&id.get()).cloned())
        }

        async fn create(&self, draft: &CustomerDraft) -> FleetResult<Customer> {
            let mut store = self.store.lock().unwrap();
            store.last_customer += 1;
            let customer = draft
                .clone()
                .into_customer(Id::new(store.last_customer), Utc::now());
            store.customers.insert(customer.id.get(), customer.clone());
            Ok(customer)
        }

        async fn update(
            &self,
            id: CustomerId,
            draft: &CustomerDraft,
        ) -> FleetResult<Option<Customer>> {
            let mut store = self.store.lock().unwrap();
            let Some(existing) = store.customers.get_mut(&id.get()) else {
                return Ok(None);
            };
            *existing = draft.clone().into_customer(id, existing.created_at);
            Ok(Some(existing.clone()))
        }

        async fn delete(&self, id: CustomerId) -> FleetResult<bool> {
            let mut store = self.store.lock().unwrap();
            let removed = store.customers.remove(&id.get()).is_some();
            store.rentals.retain(|_, r| r.customer_id != id);
            Ok(removed)
        }
    }

    impl RentalRepository for MemoryRepository {
        async fn list(&self) -> FleetResult<Vec<RentalSummary>> {
            let store = self.store.lock().unwrap();
            Ok(store.rentals.values().map(|r| store.summarize(r)).collect())
        }

        async fn recent(&self, limit: i64) -> FleetResult<Vec<RentalSummary>> {
            let store = self.store.lock().unwrap();
            Ok(store
                .rentals
                .values()
                .rev()
                .take(limit as usize)
                .map(|r| store.summarize(r))
                .collect())
        }

        async fn find_by_id(&self, id: RentalId) -> FleetResult<Option<Rental>> {
            Ok(self.store.lock().unwrap().rentals.get(&id.get()).cloned())
        }

        async fn create(&self, draft: &RentalDraft) -> FleetResult<Rental> {
            let mut store = self.store.lock().unwrap();
            store.last_rental += 1;
            let rental = draft
                .clone()
                .into_rental(Id::new(store.last_rental), Utc::now());
            store.rentals.insert(rental.id.get(), rental.clone());
            Ok(rental)
        }

        async fn update(&self, id: RentalId, draft: &RentalDraft) -> FleetResult<Option<Rental>> {
            let mut store = self.store.lock().unwrap();
            let Some(existing) = store.rentals.get_mut(&id.get()) else {
                return Ok(None);
            };
            *existing = draft.clone().into_rental(id, existing.created_at);
            Ok(Some(existing.clone()))
        }

        async fn delete(&self, id: RentalId) -> FleetResult<bool> {
            Ok(self
                .store
                .lock()
                .unwrap()
                .rentals
                .remove(&id.get())
                .is_some())
        }
    }

    impl ServiceRecordRepository for MemoryRepository {
        async fn list(&self) -> FleetResult<Vec<ServiceRecordSummary>> {
            let store = self.store.lock().unwrap();
            Ok(store
                .services
                .values()
                .map(|s| ServiceRecordSummary {
                    record: s.clone(),
                    car_name: store.car_name(s.car_id),
                })
                .collect())
        }

        async fn find_by_id(&self, id: ServiceRecordId) -> FleetResult<Option<ServiceRecord>> {
            Ok(self.store.lock().unwrap().services.get(&id.get()).cloned())
        }

        async fn create(&self, draft: &ServiceRecordDraft) -> FleetResult<ServiceRecord> {
            let mut store = self.store.lock().unwrap();
            store.last_service += 1;
            let record = draft
                .clone()
                .into_record(Id::new(store.last_service), Utc::now());
            store.services.insert(record.id.get(), record.clone());
            Ok(record)
        }

        async fn update(
            &self,
            id: ServiceRecordId,
            draft: &ServiceRecordDraft,
        ) -> FleetResult<Option<ServiceRecord>> {
            let mut store = self.store.lock().unwrap();
            let Some(existing) = store.services.get_mut(&id.get()) else {
                return Ok(None);
            };
            *existing = draft.clone().into_record(id, existing.created_at);
            Ok(Some(existing.clone()))
        }

        async fn delete(&self, id: ServiceRecordId) -> FleetResult<bool> {
            Ok(self
                .store
                .lock()
                .unwrap()
                .services
                .remove(&id.get())
                .is_some())
        }
    }

    impl DashboardRepository for MemoryRepository {
        async fn counts(&self) -> FleetResult<FleetCounts> {
            let store = self.store.lock().unwrap();
            Ok(FleetCounts {
                cars: store.cars.len() as i64,
                customers: store.customers.len() as i64,
                rentals: store.rentals.len() as i64,
                service_records: store.services.len() as i64,
            })
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use kernel::id::{CarId, CustomerId, RentalId};

    use super::support::MemoryRepository;
    use crate::application::{
        CarInput, CarUseCase, CustomerInput, CustomerUseCase, DashboardUseCase, RentalInput,
        RentalUseCase, ServiceRecordInput, ServiceRecordUseCase,
    };
    use crate::domain::value_object::car_status::CarStatus;
    use crate::domain::value_object::rental_status::RentalStatus;
    use crate::error::FleetError;

    fn car_input(name: &str, rate: &str) -> CarInput {
        CarInput {
            name: name.into(),
            registration: format!("REG-{name}"),
            daily_rate: rate.into(),
            ..Default::default()
        }
    }

    fn rental_input(car: CarId, customer: CustomerId, start: &str, end: &str) -> RentalInput {
        RentalInput {
            car_id: car.to_string(),
            customer_id: customer.to_string(),
            start_date: start.into(),
            end_date: end.into(),
            status: String::new(),
        }
    }

    struct Fixture {
        repo: Arc<MemoryRepository>,
        car: CarId,
        customer: CustomerId,
    }

    impl Fixture {
        async fn new(rate: &str) -> Self {
            let repo = Arc::new(MemoryRepository::new());
            let car = CarUseCase::new(repo.clone())
                .create(car_input("Civic", rate))
                .await
                .unwrap();
            let customer = CustomerUseCase::new(repo.clone())
                .create(CustomerInput {
                    name: "Ada Lovelace".into(),
                    ..Default::default()
                })
                .await
                .unwrap();
            Self {
                repo,
                car: car.id,
                customer: customer.id,
            }
        }

        fn cars(&self) -> CarUseCase<MemoryRepository> {
            CarUseCase::new(self.repo.clone())
        }

        fn rentals(&self) -> RentalUseCase<MemoryRepository, MemoryRepository, MemoryRepository> {
            RentalUseCase::new(self.repo.clone(), self.repo.clone(), self.repo.clone())
        }
    }

    #[tokio::test]
    async fn test_rental_cost_uses_car_rate() {
        let fx = Fixture::new("45.50").await;

        let rental = fx
            .rentals()
            .create(rental_input(fx.car, fx.customer, "2024-03-01", "2024-03-04"))
            .await
            .unwrap();

        assert_eq!(rental.period.days(), 3);
        assert_eq!(rental.total_cost.cents(), 13_650);
        assert_eq!(rental.total_cost.to_string(), "136.50");
        assert_eq!(rental.status, RentalStatus::Active);
        assert_eq!(fx.repo.car(fx.car).status, CarStatus::Rented);
    }

    #[tokio::test]
    async fn test_car_rate_change_keeps_existing_totals() {
        let fx = Fixture::new("40").await;
        let rental = fx
            .rentals()
            .create(rental_input(fx.car, fx.customer, "2024-03-01", "2024-03-03"))
            .await
            .unwrap();
        assert_eq!(rental.total_cost.cents(), 8_000);

        fx.cars()
            .update(fx.car, car_input("Civic", "99.99"))
            .await
            .unwrap();

        assert_eq!(fx.repo.rental(rental.id).total_cost.cents(), 8_000);
        let listed = fx.rentals().list().await.unwrap();
        assert_eq!(listed[0].rental.total_cost.cents(), 8_000);
    }

    #[tokio::test]
    async fn test_rental_edit_recomputes_with_current_rate() {
        let fx = Fixture::new("40").await;
        let rental = fx
            .rentals()
            .create(rental_input(fx.car, fx.customer, "2024-03-01", "2024-03-03"))
            .await
            .unwrap();
        fx.cars()
            .update(fx.car, car_input("Civic", "50"))
            .await
            .unwrap();

        let updated = fx
            .rentals()
            .update(
                rental.id,
                rental_input(fx.car, fx.customer, "2024-03-01", "2024-03-05"),
            )
            .await
            .unwrap();

        assert_eq!(updated.total_cost.cents(), 20_000);
    }

    #[tokio::test]
    async fn test_rental_end_before_start_is_rejected() {
        let fx = Fixture::new("40").await;

        for end in ["2024-02-28", "2024-03-01"] {
            let err = fx
                .rentals()
                .create(rental_input(fx.car, fx.customer, "2024-03-01", end))
                .await
                .unwrap_err();
            let FleetError::Validation(errors) = err else {
                panic!("expected validation error, got {err:?}");
            };
            assert!(errors.has("end_date"));
            assert!(errors.to_string().contains("End date must be after the start date"));
        }

        assert_eq!(fx.repo.rental_count(), 0);
        assert_eq!(fx.repo.car(fx.car).status, CarStatus::Available);
    }

    #[tokio::test]
    async fn test_rental_requires_existing_car_and_customer() {
        let fx = Fixture::new("40").await;

        let err = fx
            .rentals()
            .create(rental_input(
                CarId::new(404),
                CustomerId::new(405),
                "2024-03-01",
                "2024-03-02",
            ))
            .await
            .unwrap_err();

        let FleetError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(errors.has("car_id"));
        assert!(errors.has("customer_id"));
        assert_eq!(fx.repo.rental_count(), 0);
    }

    #[tokio::test]
    async fn test_rental_missing_fields_reported_together() {
        let fx = Fixture::new("40").await;

        let err = fx
            .rentals()
            .create(RentalInput::default())
            .await
            .unwrap_err();

        let FleetError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        for field in ["car_id", "customer_id", "start_date", "end_date"] {
            assert!(errors.has(field), "missing error for {field}");
        }
    }

    #[tokio::test]
    async fn test_completing_rental_frees_car() {
        let fx = Fixture::new("40").await;
        let rental = fx
            .rentals()
            .create(rental_input(fx.car, fx.customer, "2024-03-01", "2024-03-02"))
            .await
            .unwrap();

        let mut input = rental_input(fx.car, fx.customer, "2024-03-01", "2024-03-02");
        input.status = "completed".into();
        let updated = fx.rentals().update(rental.id, input).await.unwrap();

        assert_eq!(updated.status, RentalStatus::Completed);
        assert_eq!(fx.repo.car(fx.car).status, CarStatus::Available);
    }

    #[tokio::test]
    async fn test_swapping_car_frees_previous_car() {
        let fx = Fixture::new("40").await;
        let other = fx
            .cars()
            .create(car_input("Golf", "30"))
            .await
            .unwrap();
        let rental = fx
            .rentals()
            .create(rental_input(fx.car, fx.customer, "2024-03-01", "2024-03-02"))
            .await
            .unwrap();

        fx.rentals()
            .update(
                rental.id,
                rental_input(other.id, fx.customer, "2024-03-01", "2024-03-02"),
            )
            .await
            .unwrap();

        assert_eq!(fx.repo.car(fx.car).status, CarStatus::Available);
        assert_eq!(fx.repo.car(other.id).status, CarStatus::Rented);
        assert_eq!(fx.repo.rental(rental.id).total_cost.cents(), 3_000);
    }

    #[tokio::test]
    async fn test_rental_update_rejects_unknown_status() {
        let fx = Fixture::new("40").await;
        let rental = fx
            .rentals()
            .create(rental_input(fx.car, fx.customer, "2024-03-01", "2024-03-02"))
            .await
            .unwrap();

        let mut input = rental_input(fx.car, fx.customer, "2024-03-01", "2024-03-02");
        input.status = "lost".into();
        let err = fx.rentals().update(rental.id, input).await.unwrap_err();

        assert!(matches!(err, FleetError::Validation(ref e) if e.has("status")));
    }

    #[tokio::test]
    async fn test_deleting_rental_frees_car() {
        let fx = Fixture::new("40").await;
        let rental = fx
            .rentals()
            .create(rental_input(fx.car, fx.customer, "2024-03-01", "2024-03-02"))
            .await
            .unwrap();

        fx.rentals().delete(rental.id).await.unwrap();

        assert_eq!(fx.repo.rental_count(), 0);
        assert_eq!(fx.repo.car(fx.car).status, CarStatus::Available);
        assert!(matches!(
            fx.rentals().delete(rental.id).await,
            Err(FleetError::RentalNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_add_form_offers_only_rentable_cars() {
        let fx = Fixture::new("40").await;
        let rented = fx.cars().create(car_input("Golf", "30")).await.unwrap();
        fx.rentals()
            .create(rental_input(rented.id, fx.customer, "2024-03-01", "2024-03-02"))
            .await
            .unwrap();
        let mut in_shop = car_input("Polo", "25");
        in_shop.status = "maintenance".into();
        let in_shop = fx.cars().create(in_shop).await.unwrap();

        let add = fx.rentals().form_options(true).await.unwrap();
        let ids: Vec<_> = add.cars.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![fx.car, in_shop.id]);

        let edit = fx.rentals().form_options(false).await.unwrap();
        assert_eq!(edit.cars.len(), 3);
        assert_eq!(edit.customers.len(), 1);
    }

    #[tokio::test]
    async fn test_service_record_puts_car_in_maintenance() {
        let fx = Fixture::new("40").await;
        let services = ServiceRecordUseCase::new(fx.repo.clone(), fx.repo.clone());

        let record = services
            .create(ServiceRecordInput {
                car_id: fx.car.to_string(),
                service_date: "2024-04-01".into(),
                service_type: "Oil change".into(),
                cost: "".into(),
                remarks: "".into(),
            })
            .await
            .unwrap();

        assert_eq!(record.cost.cents(), 0);
        assert_eq!(fx.repo.car(fx.car).status, CarStatus::Maintenance);

        let listed = services.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].car_name, "Civic");
    }

    #[tokio::test]
    async fn test_service_record_requires_type_and_car() {
        let fx = Fixture::new("40").await;
        let services = ServiceRecordUseCase::new(fx.repo.clone(), fx.repo.clone());

        let err = services
            .create(ServiceRecordInput {
                car_id: "999".into(),
                cost: "-5".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        let FleetError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert!(errors.has("car_id"));
        assert!(errors.has("service_type"));
        assert!(errors.has("cost"));
        assert_eq!(fx.repo.car(fx.car).status, CarStatus::Available);
    }

    #[tokio::test]
    async fn test_customer_edit_changes_only_submitted_field() {
        let repo = Arc::new(MemoryRepository::new());
        let customers = CustomerUseCase::new(repo.clone());
        let input = CustomerInput {
            name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            phone: "555-0100".into(),
            license_no: "L-42".into(),
            address: "1 Navy Way".into(),
        };
        let created = customers.create(input.clone()).await.unwrap();

        customers
            .update(
                created.id,
                CustomerInput {
                    phone: "555-0199".into(),
                    ..input
                },
            )
            .await
            .unwrap();

        let stored = repo.customer(created.id);
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.name, "Grace Hopper");
        assert_eq!(stored.phone.as_deref(), Some("555-0199"));
        assert_eq!(stored.email, created.email);
        assert_eq!(stored.license_no.as_deref(), Some("L-42"));
        assert_eq!(stored.address.as_deref(), Some("1 Navy Way"));
        assert_eq!(stored.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_cars_listed_in_insertion_order() {
        let repo = Arc::new(MemoryRepository::new());
        let cars = CarUseCase::new(repo.clone());

        for name in ["Zoe", "Astra", "Mini"] {
            cars.create(car_input(name, "20")).await.unwrap();
        }

        let names: Vec<_> = cars
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Zoe", "Astra", "Mini"]);
    }

    #[tokio::test]
    async fn test_update_missing_car_is_not_found_before_validation() {
        let repo = Arc::new(MemoryRepository::new());
        let cars = CarUseCase::new(repo.clone());

        let err = cars
            .update(CarId::new(7), CarInput::default())
            .await
            .unwrap_err();

        assert!(matches!(err, FleetError::CarNotFound(id) if id == CarId::new(7)));
        assert_eq!(repo.car_count(), 0);
    }

    #[tokio::test]
    async fn test_deleting_customer_removes_their_rentals() {
        let fx = Fixture::new("25").await;
        fx.rentals()
            .create(rental_input(fx.car, fx.customer, "2024-04-01", "2024-04-03"))
            .await
            .unwrap();
        let customers = CustomerUseCase::new(fx.repo.clone());

        customers.delete(fx.customer).await.unwrap();

        assert!(customers.list().await.unwrap().is_empty());
        assert_eq!(fx.repo.rental_count(), 0);
        assert_eq!(fx.repo.car_count(), 1);

        let err = customers.delete(fx.customer).await.unwrap_err();
        assert!(matches!(err, FleetError::CustomerNotFound(id) if id == fx.customer));
    }

    #[tokio::test]
    async fn test_deleting_car_removes_its_rentals_and_service_records() {
        let fx = Fixture::new("25").await;
        fx.rentals()
            .create(rental_input(fx.car, fx.customer, "2024-04-01", "2024-04-03"))
            .await
            .unwrap();
        let services = ServiceRecordUseCase::new(fx.repo.clone(), fx.repo.clone());
        services
            .create(ServiceRecordInput {
                car_id: fx.car.to_string(),
                service_date: "2024-04-10".into(),
                service_type: "Oil change".into(),
                cost: "35".into(),
                remarks: String::new(),
            })
            .await
            .unwrap();

        fx.cars().delete(fx.car).await.unwrap();

        assert_eq!(fx.repo.car_count(), 0);
        assert_eq!(fx.repo.rental_count(), 0);
        assert!(services.list().await.unwrap().is_empty());
        assert_eq!(fx.repo.customer(fx.customer).name, "Ada Lovelace");

        let err = fx.cars().delete(fx.car).await.unwrap_err();
        assert!(matches!(err, FleetError::CarNotFound(id) if id == fx.car));
    }

    #[tokio::test]
    async fn test_dashboard_counts_and_recent_rentals() {
        let fx = Fixture::new("10").await;
        let mut ids: Vec<RentalId> = Vec::new();
        for day in 1..=4 {
            let rental = fx
                .rentals()
                .create(rental_input(
                    fx.car,
                    fx.customer,
                    &format!("2024-05-0{day}"),
                    &format!("2024-05-0{}", day + 1),
                ))
                .await
                .unwrap();
            ids.push(rental.id);
        }

        let output = DashboardUseCase::new(fx.repo.clone(), fx.repo.clone(), 3)
            .execute()
            .await
            .unwrap();

        assert_eq!(output.counts.cars, 1);
        assert_eq!(output.counts.customers, 1);
        assert_eq!(output.counts.rentals, 4);
        assert_eq!(output.counts.service_records, 0);
        let recent: Vec<_> = output.recent_rentals.iter().map(|r| r.rental.id).collect();
        assert_eq!(recent, vec![ids[3], ids[2], ids[1]]);
        assert_eq!(output.recent_rentals[0].customer_name, "Ada Lovelace");
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use kernel::id::{CarId, CustomerId};
    use platform::flash::Flash;
    use tower::ServiceExt;

    use super::support::MemoryRepository;
    use crate::application::{CarInput, CarUseCase, CustomerInput, CustomerUseCase, FleetConfig};
    use crate::presentation::router::fleet_router_generic;
    use crate::presentation::views::Views;

    fn app(repo: &MemoryRepository) -> Router {
        fleet_router_generic(
            repo.clone(),
            Views::new().unwrap(),
            FleetConfig::development(),
        )
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn set_cookie(response: &Response) -> Option<String> {
        response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string())
    }

    async fn seed(repo: &MemoryRepository) -> (CarId, CustomerId) {
        let repo = Arc::new(repo.clone());
        let car = CarUseCase::new(repo.clone())
            .create(CarInput {
                name: "Civic".into(),
                registration: "AB-123".into(),
                daily_rate: "40".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let customer = CustomerUseCase::new(repo)
            .create(CustomerInput {
                name: "Ada".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        (car.id, customer.id)
    }

    #[tokio::test]
    async fn test_dashboard_renders() {
        let repo = MemoryRepository::new();
        seed(&repo).await;

        let response = get(&app(&repo), "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("<h1>Dashboard</h1>"));
        assert!(body.contains(r#"<td id="count-cars">1</td>"#));
        assert!(body.contains("No rentals yet."));
    }

    #[tokio::test]
    async fn test_add_car_redirects_with_flash() {
        let repo = MemoryRepository::new();
        let app = app(&repo);

        let response = post_form(
            &app,
            "/cars/add",
            "name=Blue+Civic&registration=ab-1&daily_rate=45.50&status=available",
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/cars");
        let cookie = set_cookie(&response).unwrap();
        assert!(cookie.starts_with("flash="));
        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));

        let value = cookie
            .trim_start_matches("flash=")
            .split(';')
            .next()
            .unwrap();
        assert_eq!(
            Flash::decode(value).unwrap(),
            Flash::success("Car Blue Civic added.")
        );

        let car = repo.car(CarId::new(1));
        assert_eq!(car.registration, "AB-1");
        assert_eq!(car.daily_rate.cents(), 4_550);
    }

    #[tokio::test]
    async fn test_list_page_shows_and_clears_flash() {
        let repo = MemoryRepository::new();
        let flash = Flash::success("Car Civic added.");

        let response = app(&repo)
            .oneshot(
                Request::builder()
                    .uri("/cars")
                    .header(header::COOKIE, format!("flash={}", flash.encode()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cleared = set_cookie(&response).unwrap();
        assert!(cleared.starts_with("flash=;"));
        assert!(cleared.contains("Max-Age=0"));
        let body = body_text(response).await;
        assert!(body.contains(r#"class="alert alert-success""#));
        assert!(body.contains("Car Civic added."));
    }

    #[tokio::test]
    async fn test_list_page_without_flash_sets_no_cookie() {
        let repo = MemoryRepository::new();

        let response = get(&app(&repo), "/cars").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).is_none());
        assert!(body_text(response).await.contains("No cars yet."));
    }

    #[tokio::test]
    async fn test_add_car_missing_name_rerenders_form() {
        let repo = MemoryRepository::new();

        let response = post_form(
            &app(&repo),
            "/cars/add",
            "name=&registration=XY-9&daily_rate=12",
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_text(response).await;
        assert!(body.contains("Name is required"));
        assert!(body.contains(r#"value="XY-9""#));
        assert_eq!(repo.car_count(), 0);
    }

    #[tokio::test]
    async fn test_cars_listed_in_insertion_order() {
        let repo = MemoryRepository::new();
        let app = app(&repo);
        for name in ["Zoe", "Astra", "Mini"] {
            let response = post_form(
                &app,
                "/cars/add",
                &format!("name={name}&registration={name}&daily_rate=20"),
            )
            .await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
        }

        let body = body_text(get(&app, "/cars").await).await;

        assert_eq!(body.matches(r#"<tr class="car-row">"#).count(), 3);
        let zoe = body.find("<td>Zoe</td>").unwrap();
        let astra = body.find("<td>Astra</td>").unwrap();
        let mini = body.find("<td>Mini</td>").unwrap();
        assert!(zoe < astra && astra < mini);
    }

    #[tokio::test]
    async fn test_car_name_is_escaped() {
        let repo = MemoryRepository::new();
        let app = app(&repo);
        post_form(
            &app,
            "/cars/add",
            "name=%3Cscript%3Ealert(1)%3C%2Fscript%3E&registration=X&daily_rate=1",
        )
        .await;

        let body = body_text(get(&app, "/cars").await).await;

        assert!(!body.contains("<script>alert(1)</script>"));
        assert!(body.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn test_edit_missing_car_is_not_found() {
        let repo = MemoryRepository::new();
        let app = app(&repo);

        let response = get(&app, "/cars/edit/999").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Car 999 not found"));

        let response = post_form(&app, "/cars/edit/999", "name=X&registration=X&daily_rate=1").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = post_form(&app, "/rentals/delete/999", "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_car_removes_its_rentals() {
        let repo = MemoryRepository::new();
        let (car, customer) = seed(&repo).await;
        let app = app(&repo);
        let response = post_form(
            &app,
            "/rentals/add",
            &format!("car_id={car}&customer_id={customer}&start_date=2024-03-01&end_date=2024-03-04"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(repo.rental_count(), 1);

        let response = post_form(&app, &format!("/cars/delete/{car}"), "").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/cars");
        let cookie = set_cookie(&response).unwrap();
        let value = cookie
            .trim_start_matches("flash=")
            .split(';')
            .next()
            .unwrap();
        assert_eq!(Flash::decode(value).unwrap(), Flash::info("Car deleted."));
        assert_eq!(repo.car_count(), 0);
        assert_eq!(repo.rental_count(), 0);

        let body = body_text(get(&app, "/").await).await;
        assert!(body.contains(r#"<td id="count-cars">0</td>"#));
        assert!(body.contains(r#"<td id="count-rentals">0</td>"#));
    }

    #[tokio::test]
    async fn test_delete_missing_customer_is_not_found() {
        let repo = MemoryRepository::new();

        let response = post_form(&app(&repo), "/customers/delete/999", "").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(set_cookie(&response).is_none());
        assert!(body_text(response).await.contains("Customer 999 not found"));
    }

    #[tokio::test]
    async fn test_non_numeric_id_renders_not_found_page() {
        let repo = MemoryRepository::new();
        seed(&repo).await;
        let app = app(&repo);

        for uri in ["/cars/edit/abc", "/customers/edit/1x", "/services/edit/-1"] {
            let response = get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            assert!(
                response.headers()[header::CONTENT_TYPE]
                    .to_str()
                    .unwrap()
                    .starts_with("text/html")
            );
            assert!(body_text(response).await.contains("404 Not Found"));
        }

        let response = post_form(&app, "/rentals/delete/0", "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(repo.car_count(), 1);
    }

    #[tokio::test]
    async fn test_edit_form_is_prefilled() {
        let repo = MemoryRepository::new();
        let (car, _) = seed(&repo).await;

        let response = get(&app(&repo), &format!("/cars/edit/{car}")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(r#"value="Civic""#));
        assert!(body.contains(r#"value="40.00""#));
        assert!(body.contains(r#"<option value="available" selected>"#));
    }

    #[tokio::test]
    async fn test_customer_edit_changes_phone_only() {
        let repo = MemoryRepository::new();
        let (_, customer) = seed(&repo).await;

        let response = post_form(
            &app(&repo),
            &format!("/customers/edit/{customer}"),
            "name=Ada&phone=555-0100",
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/customers");
        let stored = repo.customer(customer);
        assert_eq!(stored.name, "Ada");
        assert_eq!(stored.phone.as_deref(), Some("555-0100"));
        assert_eq!(stored.email, None);
    }

    #[tokio::test]
    async fn test_rental_end_before_start_rerenders_form() {
        let repo = MemoryRepository::new();
        let (car, customer) = seed(&repo).await;

        let response = post_form(
            &app(&repo),
            "/rentals/add",
            &format!("car_id={car}&customer_id={customer}&start_date=2024-03-05&end_date=2024-03-01"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_text(response).await;
        assert!(body.contains("End date must be after the start date"));
        assert!(body.contains(r#"value="2024-03-05""#));
        assert_eq!(repo.rental_count(), 0);
    }

    #[tokio::test]
    async fn test_rental_created_and_listed_with_names() {
        let repo = MemoryRepository::new();
        let (car, customer) = seed(&repo).await;
        let app = app(&repo);

        let response = post_form(
            &app,
            "/rentals/add",
            &format!("car_id={car}&customer_id={customer}&start_date=2024-03-01&end_date=2024-03-04"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/rentals");

        let body = body_text(get(&app, "/rentals").await).await;
        assert!(body.contains("<td>Civic</td>"));
        assert!(body.contains("<td>Ada</td>"));
        assert!(body.contains("<td>120.00</td>"));
        assert!(body.contains("<td>active</td>"));
    }

    #[tokio::test]
    async fn test_add_rental_form_has_no_status_select() {
        let repo = MemoryRepository::new();
        seed(&repo).await;

        let response = get(&app(&repo), "/rentals/add").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        // Tera's html escaping also encodes `/`
        assert!(body.contains("Civic (AB-123) (Available) - 40.00&#x2F;day"));
        assert!(!body.contains(r#"name="status""#));
    }

    #[tokio::test]
    async fn test_service_pages_round_trip() {
        let repo = MemoryRepository::new();
        let (car, _) = seed(&repo).await;
        let app = app(&repo);

        let response = post_form(
            &app,
            "/services/add",
            &format!("car_id={car}&service_date=2024-06-01&service_type=Brakes&cost=120.5"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let body = body_text(get(&app, "/services").await).await;
        assert!(body.contains("<td>Brakes</td>"));
        assert!(body.contains("<td>120.50</td>"));
        assert!(body.contains("<td>Civic</td>"));

        let response = post_form(&app, "/services/delete/1", "").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(body_text(get(&app, "/services").await).await.contains("No service records yet."));
    }
}
