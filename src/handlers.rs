use crate::config::Config;
use crate::errors::{AppError, ExceptionDetails};
use crate::models::{
    CreditRequest, CreditSummary, CreditView, CustomerIdQuery, CustomerRequest,
    CustomerUpdateRequest, CustomerView,
};
use crate::services::{CreditService, CustomerService};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
}

/// Health check endpoint.
///
/// Returns the service status and version.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy"))
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-credit-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/customers
///
/// Registers a new customer.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `request` - The registration payload.
///
/// # Returns
///
/// * `Result<(StatusCode, String), AppError>` - 201 with a confirmation
///   message, 400 on field validation failure, or 409 on a duplicate cpf or
///   email.
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "customers",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer registered", body = String),
        (status = 400, description = "Field validation failed", body = ExceptionDetails),
        (status = 409, description = "Duplicate cpf or email", body = ExceptionDetails)
    )
)]
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CustomerRequest>,
) -> Result<(StatusCode, String), AppError> {
    tracing::info!("POST /api/customers - email: {}", request.email);

    request.validate()?;
    let customer = CustomerService::new(state.db.clone()).save(&request).await?;

    Ok((
        StatusCode::CREATED,
        format!("Customer {} saved!", customer.email),
    ))
}

/// GET /api/customers/:id
///
/// Fetches a customer by id.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `id` - The numeric id of the customer.
///
/// # Returns
///
/// * `Result<Json<CustomerView>, AppError>` - The customer view, or 400 when
///   the id is unknown.
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found", body = CustomerView),
        (status = 400, description = "Customer not found", body = ExceptionDetails)
    )
)]
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerView>, AppError> {
    tracing::info!("GET /api/customers/{}", id);

    let customer = CustomerService::new(state.db.clone()).find_by_id(id).await?;
    Ok(Json(CustomerView::from(customer)))
}

/// PATCH /api/customers?customerId={id}
///
/// Partial update of a customer: name, income, and address. Identity fields
/// are not touched.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `params` - Query parameter carrying the customer id.
/// * `request` - The update payload.
///
/// # Returns
///
/// * `Result<Json<CustomerView>, AppError>` - The updated view, or 400 when
///   the id is unknown or a field fails validation.
#[utoipa::path(
    patch,
    path = "/api/customers",
    tag = "customers",
    params(CustomerIdQuery),
    request_body = CustomerUpdateRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerView),
        (status = 400, description = "Customer not found or validation failed", body = ExceptionDetails)
    )
)]
pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CustomerIdQuery>,
    Json(request): Json<CustomerUpdateRequest>,
) -> Result<Json<CustomerView>, AppError> {
    tracing::info!("PATCH /api/customers - customerId: {}", params.customer_id);

    request.validate()?;
    let customer = CustomerService::new(state.db.clone())
        .update(params.customer_id, &request)
        .await?;
    Ok(Json(CustomerView::from(customer)))
}

/// DELETE /api/customers/:id
///
/// Deletes a customer and every credit it owns.
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 400, description = "Customer not found", body = ExceptionDetails)
    )
)]
pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    tracing::info!("DELETE /api/customers/{}", id);

    CustomerService::new(state.db.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/credits
///
/// Issues a credit for a registered customer.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `request` - The issuance payload.
///
/// # Returns
///
/// * `Result<(StatusCode, String), AppError>` - 201 with a confirmation
///   message naming the credit code and owner, or 400 on validation or
///   business-rule failure.
#[utoipa::path(
    post,
    path = "/api/credits",
    tag = "credits",
    request_body = CreditRequest,
    responses(
        (status = 201, description = "Credit issued", body = String),
        (status = 400, description = "Validation or business-rule failure", body = ExceptionDetails)
    )
)]
pub async fn create_credit(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreditRequest>,
) -> Result<(StatusCode, String), AppError> {
    tracing::info!("POST /api/credits - customerId: {}", request.customer_id);

    request.validate()?;
    let (credit, customer) = CreditService::new(state.db.clone()).save(&request).await?;

    Ok((
        StatusCode::CREATED,
        format!(
            "Credit {} - Customer {} saved!",
            credit.credit_code, customer.email
        ),
    ))
}

/// GET /api/credits?customerId={id}
///
/// Lists every credit owned by the given customer, as compact summaries.
#[utoipa::path(
    get,
    path = "/api/credits",
    tag = "credits",
    params(CustomerIdQuery),
    responses(
        (status = 200, description = "Credits owned by the customer", body = [CreditSummary])
    )
)]
pub async fn list_credits(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CustomerIdQuery>,
) -> Result<Json<Vec<CreditSummary>>, AppError> {
    tracing::info!("GET /api/credits - customerId: {}", params.customer_id);

    let credits = CreditService::new(state.db.clone())
        .find_all_by_customer(params.customer_id)
        .await?;
    Ok(Json(credits.into_iter().map(CreditSummary::from).collect()))
}

/// GET /api/credits/:creditCode?customerId={id}
///
/// Fetches one credit by its code, on behalf of the owning customer.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `credit_code` - The credit's unique lookup code.
/// * `params` - Query parameter carrying the requesting customer id.
///
/// # Returns
///
/// * `Result<Json<CreditView>, AppError>` - The detail view, or 400 when the
///   code is unknown or the credit is owned by another customer.
#[utoipa::path(
    get,
    path = "/api/credits/{credit_code}",
    tag = "credits",
    params(
        ("credit_code" = Uuid, Path, description = "Credit lookup code"),
        CustomerIdQuery
    ),
    responses(
        (status = 200, description = "Credit found", body = CreditView),
        (status = 400, description = "Unknown code or not owned by this customer", body = ExceptionDetails)
    )
)]
pub async fn get_credit(
    State(state): State<Arc<AppState>>,
    Path(credit_code): Path<Uuid>,
    Query(params): Query<CustomerIdQuery>,
) -> Result<Json<CreditView>, AppError> {
    tracing::info!(
        "GET /api/credits/{} - customerId: {}",
        credit_code,
        params.customer_id
    );

    let (credit, customer) = CreditService::new(state.db.clone())
        .find_by_credit_code(params.customer_id, credit_code)
        .await?;
    Ok(Json(CreditView::new(credit, &customer)))
}
