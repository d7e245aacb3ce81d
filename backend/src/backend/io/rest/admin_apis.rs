use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tracing::info;

use super::errors::{admin_error, error_response, ApiError};
use crate::backend::domain::commands::admin::ChangeAdminSecretCommand;
use crate::backend::AppState;
use shared::{
    AdminPasswordRequest, AdminPasswordStatusResponse, ChangeAdminPasswordResponse,
    VerifyAdminPasswordResponse,
};

/// Router for `/api/admin-password`
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_admin_password_status).post(post_admin_password))
}

pub async fn get_admin_password_status(
    State(state): State<AppState>,
) -> Result<Json<AdminPasswordStatusResponse>, ApiError> {
    info!("GET /api/admin-password");

    let has_password = state
        .admin_secret_service
        .has_secret()
        .await
        .map_err(admin_error)?;

    Ok(Json(AdminPasswordStatusResponse { has_password }))
}

/// `mode: "verify"` checks a password, `mode: "change"` sets or replaces it
pub async fn post_admin_password(
    State(state): State<AppState>,
    Json(request): Json<AdminPasswordRequest>,
) -> Result<Response, ApiError> {
    // Passwords stay out of the log.
    info!("POST /api/admin-password - mode: {:?}", request.mode);

    match request.mode.as_deref() {
        Some("verify") => {
            let password = request.password.unwrap_or_default();
            if password.is_empty() {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    "Password required",
                    "PASSWORD_REQUIRED",
                ));
            }

            let valid = state
                .admin_secret_service
                .verify(&password)
                .await
                .map_err(admin_error)?;
            Ok(Json(VerifyAdminPasswordResponse { valid }).into_response())
        }
        Some("change") => {
            let command = ChangeAdminSecretCommand {
                current: request.current_password,
                next: request.new_password.unwrap_or_default(),
            };
            state
                .admin_secret_service
                .change(command)
                .await
                .map_err(admin_error)?;
            Ok(Json(ChangeAdminPasswordResponse { success: true }).into_response())
        }
        _ => Err(error_response(
            StatusCode::BAD_REQUEST,
            "Invalid mode",
            "INVALID_MODE",
        )),
    }
}
