//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CarId, CustomerId, Id, RentalId, ServiceRecordId};
use sqlx::PgPool;

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
use crate::domain::value_object::{
    car_status::CarStatus, email::Email, money::Money, rental_period::RentalPeriod,
    rental_status::RentalStatus,
};
use crate::error::{FleetError, FleetResult};

/// PostgreSQL-backed fleet repository
#[derive(Clone)]
pub struct PgFleetRepository {
    pool: PgPool,
}

impl PgFleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Car Repository Implementation
// ============================================================================

impl CarRepository for PgFleetRepository {
    async fn list(&self) -> FleetResult<Vec<Car>> {
        let rows = sqlx::query_as::<_, CarRow>(
            r#"
            SELECT
                car_id,
                name,
                brand,
                model,
                year,
                registration,
                daily_rate_cents,
                car_status,
                description,
                created_at
            FROM cars
            ORDER BY car_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CarRow::into_car).collect()
    }

    async fn find_by_id(&self, id: CarId) -> FleetResult<Option<Car>> {
        let row = sqlx::query_as::<_, CarRow>(
            r#"
            SELECT
                car_id,
                name,
                brand,
                model,
                year,
                registration,
                daily_rate_cents,
                car_status,
                description,
                created_at
            FROM cars
            WHERE car_id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CarRow::into_car).transpose()
    }

    async fn create(&self, draft: &CarDraft) -> FleetResult<Car> {
        let (car_id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r#"
            INSERT INTO cars (
                name,
                brand,
                model,
                year,
                registration,
                daily_rate_cents,
                car_status,
                description
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING car_id, created_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.brand)
        .bind(&draft.model)
        .bind(draft.year)
        .bind(&draft.registration)
        .bind(draft.daily_rate.cents())
        .bind(draft.status.id())
        .bind(&draft.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(draft.clone().into_car(Id::new(car_id), created_at))
    }

    async fn update(&self, id: CarId, draft: &CarDraft) -> FleetResult<Option<Car>> {
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            UPDATE cars SET
                name = $2,
                brand = $3,
                model = $4,
                year = $5,
                registration = $6,
                daily_rate_cents = $7,
                car_status = $8,
                description = $9
            WHERE car_id = $1
            RETURNING created_at
            "#,
        )
        .bind(id.get())
        .bind(&draft.name)
        .bind(&draft.brand)
        .bind(&draft.model)
        .bind(draft.year)
        .bind(&draft.registration)
        .bind(draft.daily_rate.cents())
        .bind(draft.status.id())
        .bind(&draft.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(created_at.map(|created_at| draft.clone().into_car(id, created_at)))
    }

    async fn set_status(&self, id: CarId, status: CarStatus) -> FleetResult<()> {
        sqlx::query("UPDATE cars SET car_status = $2 WHERE car_id = $1")
            .bind(id.get())
            .bind(status.id())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: CarId) -> FleetResult<bool> {
        let result = sqlx::query("DELETE FROM cars WHERE car_id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Customer Repository Implementation
// ============================================================================

impl CustomerRepository for PgFleetRepository {
    async fn list(&self) -> FleetResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT customer_id, name, email, phone, license_no, address, created_at
            FROM customers
            ORDER BY customer_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CustomerRow::into_customer).collect())
    }

    async fn find_by_id(&self, id: CustomerId) -> FleetResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT customer_id, name, email, phone, license_no, address, created_at
            FROM customers
            WHERE customer_id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CustomerRow::into_customer))
    }

    async fn create(&self, draft: &CustomerDraft) -> FleetResult<Customer> {
        let (customer_id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r#"
            INSERT INTO customers (name, email, phone, license_no, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING customer_id, created_at
            "#,
        )
        .bind(&draft.name)
        .bind(draft.email.as_ref().map(Email::as_str))
        .bind(&draft.phone)
        .bind(&draft.license_no)
        .bind(&draft.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(draft.clone().into_customer(Id::new(customer_id), created_at))
    }

    async fn update(&self, id: CustomerId, draft: &CustomerDraft) -> FleetResult<Option<Customer>> {
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            UPDATE customers SET
                name = $2,
                email = $3,
                phone = $4,
                license_no = $5,
                address = $6
            WHERE customer_id = $1
            RETURNING created_at
            "#,
        )
        .bind(id.get())
        .bind(&draft.name)
        .bind(draft.email.as_ref().map(Email::as_str))
        .bind(&draft.phone)
        .bind(&draft.license_no)
        .bind(&draft.address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(created_at.map(|created_at| draft.clone().into_customer(id, created_at)))
    }

    async fn delete(&self, id: CustomerId) -> FleetResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Rental Repository Implementation
// ============================================================================

const RENTAL_SUMMARY_SELECT: &str = r#"
    SELECT
        r.rental_id,
        r.car_id,
        r.customer_id,
        r.start_date,
        r.end_date,
        r.total_cost_cents,
        r.rental_status,
        r.created_at,
        c.name AS car_name,
        u.name AS customer_name
    FROM rentals r
    JOIN cars c ON c.car_id = r.car_id
    JOIN customers u ON u.customer_id = r.customer_id
"#;

impl RentalRepository for PgFleetRepository {
    async fn list(&self) -> FleetResult<Vec<RentalSummary>> {
        let rows = sqlx::query_as::<_, RentalSummaryRow>(&format!(
            "{RENTAL_SUMMARY_SELECT} ORDER BY r.rental_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RentalSummaryRow::into_summary).collect()
    }

    async fn recent(&self, limit: i64) -> FleetResult<Vec<RentalSummary>> {
        let rows = sqlx::query_as::<_, RentalSummaryRow>(&format!(
            "{RENTAL_SUMMARY_SELECT} ORDER BY r.created_at DESC, r.rental_id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RentalSummaryRow::into_summary).collect()
    }

    async fn find_by_id(&self, id: RentalId) -> FleetResult<Option<Rental>> {
        let row = sqlx::query_as::<_, RentalRow>(
            r#"
            SELECT
                rental_id,
                car_id,
                customer_id,
                start_date,
                end_date,
                total_cost_cents,
                rental_status,
                created_at
            FROM rentals
            WHERE rental_id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RentalRow::into_rental).transpose()
    }

    async fn create(&self, draft: &RentalDraft) -> FleetResult<Rental> {
        let (rental_id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r#"
            INSERT INTO rentals (
                car_id,
                customer_id,
                start_date,
                end_date,
                total_cost_cents,
                rental_status
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING rental_id, created_at
            "#,
        )
        .bind(draft.car_id.get())
        .bind(draft.customer_id.get())
        .bind(draft.period.start())
        .bind(draft.period.end())
        .bind(draft.total_cost.cents())
        .bind(draft.status.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(draft.clone().into_rental(Id::new(rental_id), created_at))
    }

    async fn update(&self, id: RentalId, draft: &RentalDraft) -> FleetResult<Option<Rental>> {
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            UPDATE rentals SET
                car_id = $2,
                customer_id = $3,
                start_date = $4,
                end_date = $5,
                total_cost_cents = $6,
                rental_status = $7
            WHERE rental_id = $1
            RETURNING created_at
            "#,
        )
        .bind(id.get())
        .bind(draft.car_id.get())
        .bind(draft.customer_id.get())
        .bind(draft.period.start())
        .bind(draft.period.end())
        .bind(draft.total_cost.cents())
        .bind(draft.status.id())
        .fetch_optional(&self.pool)
        .await?;

        Ok(created_at.map(|created_at| draft.clone().into_rental(id, created_at)))
    }

    async fn delete(&self, id: RentalId) -> FleetResult<bool> {
        let result = sqlx::query("DELETE FROM rentals WHERE rental_id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Service Record Repository Implementation
// ============================================================================

impl ServiceRecordRepository for PgFleetRepository {
    async fn list(&self) -> FleetResult<Vec<ServiceRecordSummary>> {
        let rows = sqlx::query_as::<_, ServiceRecordSummaryRow>(
            r#"
            SELECT
                s.service_record_id,
                s.car_id,
                s.service_date,
                s.service_type,
                s.cost_cents,
                s.remarks,
                s.created_at,
                c.name AS car_name
            FROM service_records s
            JOIN cars c ON c.car_id = s.car_id
            ORDER BY s.service_record_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(ServiceRecordSummaryRow::into_summary)
            .collect())
    }

    async fn find_by_id(&self, id: ServiceRecordId) -> FleetResult<Option<ServiceRecord>> {
        let row = sqlx::query_as::<_, ServiceRecordRow>(
            r#"
            SELECT
                service_record_id,
                car_id,
                service_date,
                service_type,
                cost_cents,
                remarks,
                created_at
            FROM service_records
            WHERE service_record_id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ServiceRecordRow::into_record))
    }

    async fn create(&self, draft: &ServiceRecordDraft) -> FleetResult<ServiceRecord> {
        let (record_id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r#"
            INSERT INTO service_records (car_id, service_date, service_type, cost_cents, remarks)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING service_record_id, created_at
            "#,
        )
        .bind(draft.car_id.get())
        .bind(draft.service_date)
        .bind(&draft.service_type)
        .bind(draft.cost.cents())
        .bind(&draft.remarks)
        .fetch_one(&self.pool)
        .await?;

        Ok(draft.clone().into_record(Id::new(record_id), created_at))
    }

    async fn update(
        &self,
        id: ServiceRecordId,
        draft: &ServiceRecordDraft,
    ) -> FleetResult<Option<ServiceRecord>> {
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            UPDATE service_records SET
                car_id = $2,
                service_date = $3,
                service_type = $4,
                cost_cents = $5,
                remarks = $6
            WHERE service_record_id = $1
            RETURNING created_at
            "#,
        )
        .bind(id.get())
        .bind(draft.car_id.get())
        .bind(draft.service_date)
        .bind(&draft.service_type)
        .bind(draft.cost.cents())
        .bind(&draft.remarks)
        .fetch_optional(&self.pool)
        .await?;

        Ok(created_at.map(|created_at| draft.clone().into_record(id, created_at)))
    }

    async fn delete(&self, id: ServiceRecordId) -> FleetResult<bool> {
        let result = sqlx::query("DELETE FROM service_records WHERE service_record_id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Dashboard Repository Implementation
// ============================================================================

impl DashboardRepository for PgFleetRepository {
    async fn counts(&self) -> FleetResult<FleetCounts> {
        let (cars, customers, rentals, service_records) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM cars),
                    (SELECT COUNT(*) FROM customers),
                    (SELECT COUNT(*) FROM rentals),
                    (SELECT COUNT(*) FROM service_records)
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(FleetCounts {
            cars,
            customers,
            rentals,
            service_records,
        })
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CarRow {
    car_id: i64,
    name: String,
    brand: Option<String>,
    model: Option<String>,
    year: Option<i32>,
    registration: String,
    daily_rate_cents: i64,
    car_status: i16,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl CarRow {
    fn into_car(self) -> FleetResult<Car> {
        let status = CarStatus::from_id(self.car_status).ok_or_else(|| {
            FleetError::Internal(format!("Invalid car_status: {}", self.car_status))
        })?;

        Ok(Car {
            id: Id::new(self.car_id),
            name: self.name,
            brand: self.brand,
            model: self.model,
            year: self.year,
            registration: self.registration,
            daily_rate: Money::from_db(self.daily_rate_cents),
            status,
            description: self.description,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    customer_id: i64,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    license_no: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_customer(self) -> Customer {
        Customer {
            id: Id::new(self.customer_id),
            name: self.name,
            email: self.email.map(Email::from_db),
            phone: self.phone,
            license_no: self.license_no,
            address: self.address,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    rental_id: i64,
    car_id: i64,
    customer_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_cost_cents: i64,
    rental_status: i16,
    created_at: DateTime<Utc>,
}

impl RentalRow {
    fn into_rental(self) -> FleetResult<Rental> {
        let status = RentalStatus::from_id(self.rental_status).ok_or_else(|| {
            FleetError::Internal(format!("Invalid rental_status: {}", self.rental_status))
        })?;

        Ok(Rental {
            id: Id::new(self.rental_id),
            car_id: Id::new(self.car_id),
            customer_id: Id::new(self.customer_id),
            period: RentalPeriod::from_db(self.start_date, self.end_date),
            total_cost: Money::from_db(self.total_cost_cents),
            status,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RentalSummaryRow {
    #[sqlx(flatten)]
    rental: RentalRow,
    car_name: String,
    customer_name: String,
}

impl RentalSummaryRow {
    fn into_summary(self) -> FleetResult<RentalSummary> {
        Ok(RentalSummary {
            rental: self.rental.into_rental()?,
            car_name: self.car_name,
            customer_name: self.customer_name,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ServiceRecordRow {
    service_record_id: i64,
    car_id: i64,
    service_date: Option<NaiveDate>,
    service_type: String,
    cost_cents: i64,
    remarks: Option<String>,
    created_at: DateTime<Utc>,
}

impl ServiceRecordRow {
    fn into_record(self) -> ServiceRecord {
        ServiceRecord {
            id: Id::new(self.service_record_id),
            car_id: Id::new(self.car_id),
            service_date: self.service_date,
            service_type: self.service_type,
            cost: Money::from_db(self.cost_cents),
            remarks: self.remarks,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ServiceRecordSummaryRow {
    #[sqlx(flatten)]
    record: ServiceRecordRow,
    car_name: String,
}

impl ServiceRecordSummaryRow {
    fn into_summary(self) -> ServiceRecordSummary {
        ServiceRecordSummary {
            record: self.record.into_record(),
            car_name: self.car_name,
        }
    }
}
