use chrono::{Months, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    Credit, CreditRequest, CreditStatus, Customer, CustomerRequest, CustomerUpdateRequest,
    NewCredit,
};
use crate::storage::{CreditStorage, CustomerStorage};

/// Issuance window: the first installment must fall strictly before this
/// many months from today.
const MAX_MONTHS_TO_FIRST_INSTALLMENT: u32 = 3;

/// Whether a first-installment date is inside the issuance window.
pub fn first_installment_within_limit(day_first_installment: NaiveDate) -> bool {
    let limit = Utc::now().date_naive() + Months::new(MAX_MONTHS_TO_FIRST_INSTALLMENT);
    day_first_installment < limit
}

/// CRUD over customers. Lookups fail with a business error naming the
/// missing id.
pub struct CustomerService {
    storage: CustomerStorage,
}

impl CustomerService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            storage: CustomerStorage::new(pool),
        }
    }

    /// Persists a customer; a cpf/email uniqueness failure from the store is
    /// propagated unchanged.
    pub async fn save(&self, request: &CustomerRequest) -> Result<Customer, AppError> {
        let customer = self.storage.insert(request).await?;
        tracing::info!("Customer {} registered with id {}", customer.email, customer.id);
        Ok(customer)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Customer, AppError> {
        self.storage
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Business(format!("Id {} not found", id)))
    }

    /// Partial update of name, income, and address. Fails with the same
    /// not-found error as `find_by_id` when the id is unknown.
    pub async fn update(
        &self,
        id: i64,
        update: &CustomerUpdateRequest,
    ) -> Result<Customer, AppError> {
        self.find_by_id(id).await?;
        self.storage.update(id, update).await
    }

    /// Looks up the customer (same not-found failure mode) and removes it
    /// together with its credits.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let customer = self.find_by_id(id).await?;
        self.storage.delete(customer.id).await?;
        tracing::info!("Customer {} deleted", customer.id);
        Ok(())
    }
}

/// Credit issuance and customer-scoped lookups.
pub struct CreditService {
    storage: CreditStorage,
    customers: CustomerService,
}

impl CreditService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            storage: CreditStorage::new(pool.clone()),
            customers: CustomerService::new(pool),
        }
    }

    /// Issues a credit for the requested customer.
    ///
    /// The first-installment date must fall strictly before three months
    /// from today, and the customer must exist; either failure aborts before
    /// anything is persisted. On success the stored credit is returned
    /// together with its resolved owner.
    pub async fn save(&self, request: &CreditRequest) -> Result<(Credit, Customer), AppError> {
        if !first_installment_within_limit(request.day_first_installment) {
            return Err(AppError::Business("Invalid Date".to_string()));
        }

        let customer = self.customers.find_by_id(request.customer_id).await?;

        let new_credit = NewCredit {
            credit_code: Uuid::new_v4(),
            credit_value: request.credit_value.clone(),
            day_first_installment: request.day_first_installment,
            number_of_installments: request.number_of_installments,
            status: CreditStatus::InProgress,
            customer_id: customer.id,
        };
        let credit = self.storage.insert(&new_credit).await?;
        tracing::info!(
            "Credit {} issued for customer {}",
            credit.credit_code,
            customer.id
        );
        Ok((credit, customer))
    }

    /// All credits owned by the given customer id, oldest first. Empty when
    /// the customer has none (or does not exist).
    pub async fn find_all_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        self.storage.find_all_by_customer(customer_id).await
    }

    /// Looks up a credit by code on behalf of a customer.
    ///
    /// An unknown code fails with a business error. A known code owned by a
    /// different customer fails with the same opaque "Contact admin" denial
    /// regardless of why, so callers cannot probe other customers' codes.
    pub async fn find_by_credit_code(
        &self,
        customer_id: i64,
        credit_code: Uuid,
    ) -> Result<(Credit, Customer), AppError> {
        let credit = self
            .storage
            .find_by_code(credit_code)
            .await?
            .ok_or_else(|| AppError::Business(format!("Creditcode {} not found", credit_code)))?;

        if credit.customer_id != customer_id {
            tracing::warn!(
                "Credit {} requested by non-owner customer {}",
                credit_code,
                customer_id
            );
            return Err(AppError::InvalidArgument("Contact admin".to_string()));
        }

        let customer = self.customers.find_by_id(credit.customer_id).await?;
        Ok((credit, customer))
    }
}
