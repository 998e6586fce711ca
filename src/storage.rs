use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Credit, Customer, CustomerRequest, CustomerUpdateRequest, NewCredit};

/// Row-level access to `customers`.
pub struct CustomerStorage {
    pool: PgPool,
}

impl CustomerStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new customer row. A duplicate cpf or email surfaces as a
    /// conflict carrying the violated constraint name.
    pub async fn insert(&self, request: &CustomerRequest) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (first_name, last_name, cpf, email, password, income, zip_code, street)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.cpf)
        .bind(&request.email)
        .bind(&request.password)
        .bind(&request.income)
        .bind(&request.zip_code)
        .bind(&request.street)
        .fetch_one(&self.pool)
        .await
        .map_err(into_write_error)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Customer>, AppError> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE cpf = $1")
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    /// Partial update: name, income, and address only.
    pub async fn update(
        &self,
        id: i64,
        update: &CustomerUpdateRequest,
    ) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET first_name = $2, last_name = $3, income = $4, zip_code = $5, street = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.income)
        .bind(&update.zip_code)
        .bind(&update.street)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Removes the customer and every credit it owns in one transaction.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM credits WHERE customer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Row-level access to `credits`.
pub struct CreditStorage {
    pool: PgPool,
}

impl CreditStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: &NewCredit) -> Result<Credit, AppError> {
        sqlx::query_as::<_, Credit>(
            r#"
            INSERT INTO credits (credit_code, credit_value, day_first_installment, number_of_installments, status, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new.credit_code)
        .bind(&new.credit_value)
        .bind(new.day_first_installment)
        .bind(new.number_of_installments)
        .bind(new.status)
        .bind(new.customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(into_write_error)
    }

    pub async fn find_by_code(&self, credit_code: Uuid) -> Result<Option<Credit>, AppError> {
        sqlx::query_as::<_, Credit>("SELECT * FROM credits WHERE credit_code = $1")
            .bind(credit_code)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn find_all_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        sqlx::query_as::<_, Credit>(
            "SELECT * FROM credits WHERE customer_id = $1 ORDER BY created_at ASC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}

/// Unique-constraint hits become conflicts; anything else stays a database
/// error.
fn into_write_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(db.constraint().unwrap_or("unique constraint").to_string())
        }
        _ => AppError::Database(err),
    }
}
