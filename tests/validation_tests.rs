/// Unit tests for request validation
/// Covers CPF checksum, email format, and per-field payload validation
use bigdecimal::BigDecimal;
use chrono::{Months, Utc};
use rust_credit_api::errors::AppError;
use rust_credit_api::models::{CreditRequest, CustomerRequest, CustomerUpdateRequest};
use rust_credit_api::validation::{is_valid_cpf, is_valid_email};
use std::collections::BTreeMap;

fn base_customer_request() -> CustomerRequest {
    CustomerRequest {
        first_name: "Ana".to_string(),
        last_name: "Souza".to_string(),
        cpf: "52998224725".to_string(),
        income: BigDecimal::from(4500),
        email: "ana.souza@example.com".to_string(),
        password: "s3cret".to_string(),
        zip_code: "04571-010".to_string(),
        street: "Avenida Berrini".to_string(),
    }
}

fn base_credit_request() -> CreditRequest {
    CreditRequest {
        credit_value: BigDecimal::from(10_000),
        day_first_installment: Utc::now().date_naive() + Months::new(2),
        number_of_installments: 15,
        customer_id: 1,
    }
}

fn validation_details(err: AppError) -> BTreeMap<String, String> {
    match err {
        AppError::Validation(details) => details,
        other => panic!("expected a validation error, got {}", other),
    }
}

#[cfg(test)]
mod cpf_validation_tests {
    use super::*;

    #[test]
    fn test_valid_cpfs() {
        assert!(is_valid_cpf("52998224725"));
        assert!(is_valid_cpf("11144477735"));
        assert!(is_valid_cpf("529.982.247-25"));
    }

    #[test]
    fn test_wrong_verifier_digits() {
        assert!(!is_valid_cpf("52998224726"));
        assert!(!is_valid_cpf("52998224735"));
        assert!(!is_valid_cpf("12345678901"));
    }

    #[test]
    fn test_same_digit_sequences() {
        // These pass the mod-11 checksum but are not assignable
        assert!(!is_valid_cpf("00000000000"));
        assert!(!is_valid_cpf("11111111111"));
        assert!(!is_valid_cpf("999.999.999-99"));
    }

    #[test]
    fn test_wrong_length() {
        assert!(!is_valid_cpf(""));
        assert!(!is_valid_cpf("5299822472"));
        assert!(!is_valid_cpf("529982247255"));
    }

    #[test]
    fn test_non_digit_characters() {
        assert!(!is_valid_cpf("52998224725a"));
        assert!(!is_valid_cpf("cpf: 52998224725"));
    }
}

#[cfg(test)]
mod email_validation_tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user@example.com"));
        assert!(is_valid_email("user+tag@example.co.uk"));
        assert!(is_valid_email("user_name@example-domain.com"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@examplecom"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user @example.com"));
        assert!(!is_valid_email(""));
    }
}

#[cfg(test)]
mod customer_request_tests {
    use super::*;

    #[test]
    fn valid_request_passes() {
        assert!(base_customer_request().validate().is_ok());
    }

    #[test]
    fn empty_first_name_reports_the_field() {
        let mut request = base_customer_request();
        request.first_name = "".to_string();

        let details = validation_details(request.validate().unwrap_err());
        assert_eq!(details.get("firstName").map(String::as_str), Some("Invalid input"));
    }

    #[test]
    fn every_failing_field_is_collected() {
        let mut request = base_customer_request();
        request.first_name = "".to_string();
        request.password = "   ".to_string();
        request.street = "".to_string();

        let details = validation_details(request.validate().unwrap_err());
        assert_eq!(details.len(), 3);
        assert!(details.contains_key("firstName"));
        assert!(details.contains_key("password"));
        assert!(details.contains_key("street"));
    }

    #[test]
    fn malformed_cpf_reports_invalid_cpf() {
        let mut request = base_customer_request();
        request.cpf = "12345678901".to_string();

        let details = validation_details(request.validate().unwrap_err());
        assert_eq!(details.get("cpf").map(String::as_str), Some("Invalid CPF"));
    }

    #[test]
    fn empty_cpf_reports_invalid_input() {
        let mut request = base_customer_request();
        request.cpf = "".to_string();

        let details = validation_details(request.validate().unwrap_err());
        assert_eq!(details.get("cpf").map(String::as_str), Some("Invalid input"));
    }

    #[test]
    fn malformed_email_reports_invalid_email() {
        let mut request = base_customer_request();
        request.email = "not-an-email".to_string();

        let details = validation_details(request.validate().unwrap_err());
        assert_eq!(details.get("email").map(String::as_str), Some("Invalid email"));
    }
}

#[cfg(test)]
mod credit_request_tests {
    use super::*;
    use chrono::Days;

    #[test]
    fn valid_request_passes() {
        assert!(base_credit_request().validate().is_ok());
    }

    #[test]
    fn fifty_installments_rejected() {
        let mut request = base_credit_request();
        request.number_of_installments = 50;

        let details = validation_details(request.validate().unwrap_err());
        assert!(details.contains_key("numberOfInstallments"));
    }

    #[test]
    fn zero_installments_rejected() {
        let mut request = base_credit_request();
        request.number_of_installments = 0;

        let details = validation_details(request.validate().unwrap_err());
        assert!(details.contains_key("numberOfInstallments"));
    }

    #[test]
    fn range_bounds_accepted() {
        let mut request = base_credit_request();
        request.number_of_installments = 1;
        assert!(request.validate().is_ok());
        request.number_of_installments = 48;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn past_date_rejected() {
        let mut request = base_credit_request();
        request.day_first_installment = Utc::now().date_naive() - Days::new(1);

        let details = validation_details(request.validate().unwrap_err());
        assert_eq!(
            details.get("dayFirstInstallment").map(String::as_str),
            Some("must be a future date")
        );
    }

    #[test]
    fn today_rejected() {
        // The first installment must be strictly in the future
        let mut request = base_credit_request();
        request.day_first_installment = Utc::now().date_naive();
        assert!(request.validate().is_err());
    }
}

#[cfg(test)]
mod customer_update_tests {
    use super::*;

    fn base_update() -> CustomerUpdateRequest {
        CustomerUpdateRequest {
            first_name: "Ana Clara".to_string(),
            last_name: "Souza".to_string(),
            income: BigDecimal::from(6000),
            zip_code: "01310-100".to_string(),
            street: "Avenida Paulista".to_string(),
        }
    }

    #[test]
    fn valid_update_passes() {
        assert!(base_update().validate().is_ok());
    }

    #[test]
    fn empty_street_reports_the_field() {
        let mut update = base_update();
        update.street = "".to_string();

        let details = validation_details(update.validate().unwrap_err());
        assert_eq!(details.get("street").map(String::as_str), Some("Invalid input"));
    }
}
