use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::info;

use super::errors::{admin_error, claim_error, ApiError};
use super::mappers::ClaimMapper;
use crate::backend::domain::commands::claims::{
    AddStaffMemberCommand, RecordAmountCommand, RemoveAmountCommand, RemoveStaffMemberCommand,
};
use crate::backend::domain::models::AccessMode;
use crate::backend::AppState;
use shared::{
    AddStaffMemberRequest, CarryForwardResponse, ClaimMutationResponse, DailyViewResponse,
    LoadClaimResponse, RecordAmountRequest, RemoveAmountRequest, RemoveStaffMemberRequest,
    SaveClaimRequest, SaveClaimResponse, UpdateFiguresRequest,
};

/// Header carrying the admin password on admin-only edits
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    fn date(&self) -> &str {
        self.date.as_deref().unwrap_or_default()
    }
}

/// Router for everything under `/api/claims`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(load_claim).post(save_claim))
        .route("/view", get(get_daily_view))
        .route("/carry-forward", get(get_carry_forward))
        .route("/staff", post(add_staff_member))
        .route("/staff/remove", post(remove_staff_member))
        .route("/amounts", post(record_amount))
        .route("/amounts/remove", post(remove_amount))
        .route("/figures", post(update_figures))
}

async fn access_mode(state: &AppState, headers: &HeaderMap) -> Result<AccessMode, ApiError> {
    let candidate = headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok());

    state
        .admin_secret_service
        .access_mode(candidate)
        .await
        .map_err(admin_error)
}

fn mutation_response(
    result: crate::backend::domain::commands::claims::ClaimMutationResult,
) -> Json<ClaimMutationResponse> {
    Json(ClaimMutationResponse {
        claim: ClaimMapper::claim_to_dto(&result.claim),
        success_message: result.success_message,
    })
}

/// Load the claim saved for a date; `claim` is null when nothing was saved
pub async fn load_claim(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<LoadClaimResponse>, ApiError> {
    info!("GET /api/claims - query: {:?}", query);

    let result = state
        .claim_service
        .load_claim(query.date())
        .await
        .map_err(claim_error)?;

    let claim = result
        .exists
        .then(|| ClaimMapper::claim_to_dto(&result.claim));
    Ok(Json(LoadClaimResponse { claim }))
}

/// Overwrite the claim for a date
pub async fn save_claim(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SaveClaimRequest>,
) -> Result<Json<SaveClaimResponse>, ApiError> {
    info!(
        "POST /api/claims - date: {:?}, {} staff entries",
        request.date,
        request.staff_entries.len()
    );

    let access = access_mode(&state, &headers).await?;
    let command = ClaimMapper::save_request_to_command(request);
    let claim = state
        .claim_service
        .save_claim(command, access)
        .await
        .map_err(claim_error)?;

    Ok(Json(SaveClaimResponse {
        success: true,
        claim: ClaimMapper::claim_to_dto(&claim),
    }))
}

pub async fn get_daily_view(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DailyViewResponse>, ApiError> {
    info!("GET /api/claims/view - query: {:?}", query);

    let view = state
        .claim_service
        .daily_view(query.date())
        .await
        .map_err(claim_error)?;

    Ok(Json(ClaimMapper::daily_view_to_dto(view)))
}

pub async fn get_carry_forward(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Json<CarryForwardResponse> {
    info!("GET /api/claims/carry-forward - query: {:?}", query);

    let carry_forward = state.claim_service.carry_forward(query.date()).await;
    Json(ClaimMapper::carry_forward_to_dto(carry_forward))
}

pub async fn add_staff_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AddStaffMemberRequest>,
) -> Result<Json<ClaimMutationResponse>, ApiError> {
    info!("POST /api/claims/staff - request: {:?}", request);

    let access = access_mode(&state, &headers).await?;
    let command = AddStaffMemberCommand {
        date: request.date,
        staff_name: request.staff_name,
    };
    let result = state
        .claim_service
        .add_staff_member(command, access)
        .await
        .map_err(claim_error)?;

    Ok(mutation_response(result))
}

pub async fn remove_staff_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RemoveStaffMemberRequest>,
) -> Result<Json<ClaimMutationResponse>, ApiError> {
    info!("POST /api/claims/staff/remove - request: {:?}", request);

    let access = access_mode(&state, &headers).await?;
    let command = RemoveStaffMemberCommand {
        date: request.date,
        entry_id: request.entry_id,
    };
    let result = state
        .claim_service
        .remove_staff_member(command, access)
        .await
        .map_err(claim_error)?;

    Ok(mutation_response(result))
}

pub async fn record_amount(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RecordAmountRequest>,
) -> Result<Json<ClaimMutationResponse>, ApiError> {
    info!("POST /api/claims/amounts - request: {:?}", request);

    let access = access_mode(&state, &headers).await?;
    let command = RecordAmountCommand {
        date: request.date,
        entry_id: request.entry_id,
        list: ClaimMapper::list_to_domain(request.list),
        amount: request.amount,
    };
    let result = state
        .claim_service
        .record_amount(command, access)
        .await
        .map_err(claim_error)?;

    Ok(mutation_response(result))
}

pub async fn remove_amount(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RemoveAmountRequest>,
) -> Result<Json<ClaimMutationResponse>, ApiError> {
    info!("POST /api/claims/amounts/remove - request: {:?}", request);

    let access = access_mode(&state, &headers).await?;
    let command = RemoveAmountCommand {
        date: request.date,
        entry_id: request.entry_id,
        list: ClaimMapper::list_to_domain(request.list),
        index: request.index,
    };
    let result = state
        .claim_service
        .remove_amount(command, access)
        .await
        .map_err(claim_error)?;

    Ok(mutation_response(result))
}

pub async fn update_figures(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateFiguresRequest>,
) -> Result<Json<ClaimMutationResponse>, ApiError> {
    info!("POST /api/claims/figures - request: {:?}", request);

    let access = access_mode(&state, &headers).await?;
    let command = ClaimMapper::figures_request_to_command(request);
    let result = state
        .claim_service
        .update_figures(command, access)
        .await
        .map_err(claim_error)?;

    Ok(mutation_response(result))
}
