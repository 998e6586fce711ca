use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::errors::AppError;
use crate::validation::{is_valid_cpf, is_valid_email};

// ============ Database Models ============

/// Lifecycle state of a credit. New credits always start in `InProgress`;
/// no transition operations are exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "credit_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    InProgress,
    Approved,
    Rejected,
}

/// A registered customer.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Customer {
    /// Generated numeric id.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Brazilian tax id. Unique across customers.
    pub cpf: String,
    /// Unique across customers.
    pub email: String,
    pub password: String,
    /// Monthly income.
    pub income: BigDecimal,
    pub zip_code: String,
    pub street: String,
    pub created_at: DateTime<Utc>,
}

/// A credit owned by exactly one customer. Immutable once issued.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Credit {
    /// Generated numeric id.
    pub id: i64,
    /// Globally unique lookup code assigned at issuance.
    pub credit_code: Uuid,
    pub credit_value: BigDecimal,
    /// Date the first installment falls due.
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    /// Owning customer.
    pub customer_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `credits`, built by the credit service once the owner
/// has been resolved.
#[derive(Debug, Clone)]
pub struct NewCredit {
    pub credit_code: Uuid,
    pub credit_value: BigDecimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    pub customer_id: i64,
}

// ============ API Request Models ============

/// Registration payload for `POST /api/customers`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    #[schema(value_type = f64)]
    pub income: BigDecimal,
    pub email: String,
    pub password: String,
    pub zip_code: String,
    pub street: String,
}

impl CustomerRequest {
    /// Field-level validation. Collects every failing field before rejecting
    /// so one response reports them all.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = BTreeMap::new();
        require_non_empty(&mut errors, "firstName", &self.first_name);
        require_non_empty(&mut errors, "lastName", &self.last_name);
        if self.cpf.trim().is_empty() {
            errors.insert("cpf".to_string(), "Invalid input".to_string());
        } else if !is_valid_cpf(&self.cpf) {
            errors.insert("cpf".to_string(), "Invalid CPF".to_string());
        }
        if self.email.trim().is_empty() {
            errors.insert("email".to_string(), "Invalid input".to_string());
        } else if !is_valid_email(&self.email) {
            errors.insert("email".to_string(), "Invalid email".to_string());
        }
        require_non_empty(&mut errors, "password", &self.password);
        require_non_empty(&mut errors, "zipCode", &self.zip_code);
        require_non_empty(&mut errors, "street", &self.street);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Partial-update payload for `PATCH /api/customers`. Identity fields (cpf,
/// email, password) are not updatable.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    #[schema(value_type = f64)]
    pub income: BigDecimal,
    pub zip_code: String,
    pub street: String,
}

impl CustomerUpdateRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = BTreeMap::new();
        require_non_empty(&mut errors, "firstName", &self.first_name);
        require_non_empty(&mut errors, "lastName", &self.last_name);
        require_non_empty(&mut errors, "zipCode", &self.zip_code);
        require_non_empty(&mut errors, "street", &self.street);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Issuance payload for `POST /api/credits`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditRequest {
    #[schema(value_type = f64)]
    pub credit_value: BigDecimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub customer_id: i64,
}

impl CreditRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = BTreeMap::new();
        if !(1..=48).contains(&self.number_of_installments) {
            errors.insert(
                "numberOfInstallments".to_string(),
                "must be between 1 and 48".to_string(),
            );
        }
        if self.day_first_installment <= Utc::now().date_naive() {
            errors.insert(
                "dayFirstInstallment".to_string(),
                "must be a future date".to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// `customerId` query parameter shared by the credit lookup endpoints and
/// the customer partial update.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CustomerIdQuery {
    pub customer_id: i64,
}

fn require_non_empty(errors: &mut BTreeMap<String, String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), "Invalid input".to_string());
    }
}

// ============ API Response Models ============

/// Customer detail view.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    #[schema(value_type = f64)]
    pub income: BigDecimal,
    pub email: String,
    pub zip_code: String,
    pub street: String,
    pub id: i64,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.cpf,
            income: customer.income,
            email: customer.email,
            zip_code: customer.zip_code,
            street: customer.street,
            id: customer.id,
        }
    }
}

/// Credit detail view, joined with the owner's email and income.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditView {
    pub credit_code: Uuid,
    #[schema(value_type = f64)]
    pub credit_value: BigDecimal,
    pub number_of_installments: i32,
    pub status: CreditStatus,
    pub email_customer: String,
    #[schema(value_type = f64)]
    pub income_customer: BigDecimal,
}

impl CreditView {
    pub fn new(credit: Credit, customer: &Customer) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
            status: credit.status,
            email_customer: customer.email.clone(),
            income_customer: customer.income.clone(),
        }
    }
}

/// Compact credit view for per-customer listings.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummary {
    pub credit_code: Uuid,
    #[schema(value_type = f64)]
    pub credit_value: BigDecimal,
    pub number_of_installments: i32,
}

impl From<Credit> for CreditSummary {
    fn from(credit: Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
        }
    }
}
