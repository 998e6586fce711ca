use utoipa::OpenApi;

use crate::errors::ExceptionDetails;
use crate::models::{
    CreditRequest, CreditStatus, CreditSummary, CreditView, CustomerRequest,
    CustomerUpdateRequest, CustomerView,
};

/// OpenAPI description of the HTTP surface, served through Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health,
        crate::handlers::create_customer,
        crate::handlers::get_customer,
        crate::handlers::update_customer,
        crate::handlers::delete_customer,
        crate::handlers::create_credit,
        crate::handlers::list_credits,
        crate::handlers::get_credit,
    ),
    components(schemas(
        CustomerRequest,
        CustomerUpdateRequest,
        CreditRequest,
        CustomerView,
        CreditView,
        CreditSummary,
        CreditStatus,
        ExceptionDetails,
    )),
    tags(
        (name = "customers", description = "Customer registration and maintenance"),
        (name = "credits", description = "Credit issuance and lookup")
    )
)]
pub struct ApiDoc;
