//! Translation of domain errors into HTTP responses.
//!
//! Every error body has the shape `{ "error": <message>, "code": <CODE> }`.

use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::backend::domain::models::ClaimEditError;
use crate::backend::domain::{AdminSecretError, ClaimServiceError};

pub type ApiError = (StatusCode, Json<Value>);

pub fn error_response(status: StatusCode, message: impl Into<String>, code: &str) -> ApiError {
    let body = json!({
        "error": message.into(),
        "code": code
    });
    (status, Json(body))
}

pub fn claim_error(e: ClaimServiceError) -> ApiError {
    let message = e.to_string();
    match e {
        ClaimServiceError::DateRequired => {
            error_response(StatusCode::BAD_REQUEST, message, "DATE_REQUIRED")
        }
        ClaimServiceError::InvalidDate(_) => {
            error_response(StatusCode::BAD_REQUEST, message, "INVALID_DATE")
        }
        ClaimServiceError::StaffNameRequired => {
            error_response(StatusCode::BAD_REQUEST, message, "INVALID_INPUT")
        }
        ClaimServiceError::AdminRequired(_) => {
            error_response(StatusCode::FORBIDDEN, message, "ADMIN_REQUIRED")
        }
        ClaimServiceError::Edit(ClaimEditError::EntryNotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, message, "ENTRY_NOT_FOUND")
        }
        ClaimServiceError::Edit(ClaimEditError::InvalidAmount(_)) => {
            error_response(StatusCode::BAD_REQUEST, message, "INVALID_AMOUNT")
        }
        ClaimServiceError::Edit(_) => {
            error_response(StatusCode::BAD_REQUEST, message, "INVALID_INPUT")
        }
        ClaimServiceError::Storage(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message, "STORAGE_UNAVAILABLE")
        }
    }
}

pub fn admin_error(e: AdminSecretError) -> ApiError {
    let message = e.to_string();
    match e {
        AdminSecretError::NewSecretRequired => {
            error_response(StatusCode::BAD_REQUEST, message, "PASSWORD_REQUIRED")
        }
        AdminSecretError::CurrentSecretIncorrect | AdminSecretError::InvalidSecret => {
            error_response(StatusCode::FORBIDDEN, message, "INVALID_PASSWORD")
        }
        AdminSecretError::Hashing(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
        }
        AdminSecretError::Storage(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message, "STORAGE_UNAVAILABLE")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::AmountInputError;

    #[test]
    fn test_claim_error_statuses() {
        let cases = vec![
            (ClaimServiceError::DateRequired, StatusCode::BAD_REQUEST, "DATE_REQUIRED"),
            (ClaimServiceError::AdminRequired("targetAmount"), StatusCode::FORBIDDEN, "ADMIN_REQUIRED"),
            (
                ClaimServiceError::Edit(ClaimEditError::EntryNotFound("x".to_string())),
                StatusCode::NOT_FOUND,
                "ENTRY_NOT_FOUND",
            ),
            (
                ClaimServiceError::Edit(ClaimEditError::InvalidAmount(AmountInputError::Empty)),
                StatusCode::BAD_REQUEST,
                "INVALID_AMOUNT",
            ),
            (
                ClaimServiceError::Storage("disk full".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_UNAVAILABLE",
            ),
        ];

        for (error, status, code) in cases {
            let (actual_status, Json(body)) = claim_error(error);
            assert_eq!(actual_status, status);
            assert_eq!(body["code"], code);
        }
    }

    #[test]
    fn test_date_required_message() {
        let (_, Json(body)) = claim_error(ClaimServiceError::DateRequired);
        assert_eq!(body["error"], "Date required");
    }

    #[test]
    fn test_admin_error_messages() {
        let (status, Json(body)) = admin_error(AdminSecretError::CurrentSecretIncorrect);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Current password incorrect");

        let (status, Json(body)) = admin_error(AdminSecretError::NewSecretRequired);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "New password required");
    }
}
