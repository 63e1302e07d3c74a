//! Bill API handlers
//!
//! All routes here sit behind the auth middleware; the owner ID comes from
//! the verified token, never from the request body.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{
    BillDto, BillStatsDto, GenerateBillRequest, ListBillsQuery, PaymentResultRequest,
};
use crate::application::services::{BillingService, GenerateBill};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Bill handler state
#[derive(Clone)]
pub struct BillAppState {
    pub billing: Arc<BillingService>,
}

type ApiError = (StatusCode, Json<ApiResponse<()>>);

#[utoipa::path(
    post,
    path = "/api/v1/bills",
    tag = "Bills",
    security(("bearer_auth" = [])),
    request_body = GenerateBillRequest,
    responses(
        (status = 201, description = "Bill generated", body = ApiResponse<BillDto>),
        (status = 422, description = "Validation error"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn generate_bill(
    State(state): State<BillAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<GenerateBillRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BillDto>>), ApiError> {
    let input = GenerateBill {
        consumer_name: request.consumer_name,
        meter_number: request.meter_number,
        connection_type: request.connection_type,
        units_consumed: request.units_consumed,
    };

    let bill = state
        .billing
        .generate_bill(&user.user_id, input)
        .await
        .map_err(domain_error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BillDto::from(bill))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/bills",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(ListBillsQuery),
    responses(
        (status = 200, description = "Bills for the current user, newest first", body = ApiResponse<Vec<BillDto>>),
        (status = 422, description = "Unknown filter value"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn list_bills(
    State(state): State<BillAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ListBillsQuery>,
) -> Result<Json<ApiResponse<Vec<BillDto>>>, ApiError> {
    let filter = query.into_filter().map_err(domain_error_response)?;

    let bills = state
        .billing
        .list_bills(&user.user_id, filter)
        .await
        .map_err(domain_error_response)?;

    let bills: Vec<BillDto> = bills.into_iter().map(BillDto::from).collect();
    Ok(Json(ApiResponse::success(bills)))
}

#[utoipa::path(
    get,
    path = "/api/v1/bills/stats",
    tag = "Bills",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregate bill statistics", body = ApiResponse<BillStatsDto>),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn get_bill_stats(
    State(state): State<BillAppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<BillStatsDto>>, ApiError> {
    let stats = state
        .billing
        .bill_stats(&user.user_id)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(BillStatsDto::from(stats))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bills/by-meter/{meter_number}",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(
        ("meter_number" = String, Path, description = "Exact meter number")
    ),
    responses(
        (status = 200, description = "Bills for the meter, newest first", body = ApiResponse<Vec<BillDto>>),
        (status = 422, description = "Blank meter number"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn find_bills_by_meter(
    State(state): State<BillAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(meter_number): Path<String>,
) -> Result<Json<ApiResponse<Vec<BillDto>>>, ApiError> {
    let bills = state
        .billing
        .find_by_meter(&user.user_id, &meter_number)
        .await
        .map_err(domain_error_response)?;

    let bills: Vec<BillDto> = bills.into_iter().map(BillDto::from).collect();
    Ok(Json(ApiResponse::success(bills)))
}

#[utoipa::path(
    get,
    path = "/api/v1/bills/{bill_id}",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(
        ("bill_id" = String, Path, description = "Bill ID")
    ),
    responses(
        (status = 200, description = "The bill", body = ApiResponse<BillDto>),
        (status = 404, description = "Bill not found"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn get_bill(
    State(state): State<BillAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(bill_id): Path<String>,
) -> Result<Json<ApiResponse<BillDto>>, ApiError> {
    let bill = state
        .billing
        .get_bill(&user.user_id, &bill_id)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(BillDto::from(bill))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bills/{bill_id}/pay",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(
        ("bill_id" = String, Path, description = "Bill ID")
    ),
    responses(
        (status = 200, description = "Bill marked as paid", body = ApiResponse<BillDto>),
        (status = 404, description = "Bill not found"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn mark_bill_paid(
    State(state): State<BillAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(bill_id): Path<String>,
) -> Result<Json<ApiResponse<BillDto>>, ApiError> {
    state
        .billing
        .mark_paid(&user.user_id, &bill_id)
        .await
        .map_err(domain_error_response)?;

    let bill = state
        .billing
        .get_bill(&user.user_id, &bill_id)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(BillDto::from(bill))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bills/{bill_id}/payments",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(
        ("bill_id" = String, Path, description = "Bill ID")
    ),
    request_body = PaymentResultRequest,
    responses(
        (status = 200, description = "Payment recorded, bill marked as paid", body = ApiResponse<BillDto>),
        (status = 402, description = "Payment failed; bill unchanged"),
        (status = 404, description = "Bill not found"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn record_payment_result(
    State(state): State<BillAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(bill_id): Path<String>,
    ValidatedJson(request): ValidatedJson<PaymentResultRequest>,
) -> Result<Json<ApiResponse<BillDto>>, ApiError> {
    state
        .billing
        .confirm_payment(&user.user_id, &bill_id, request.succeeded, request.reason)
        .await
        .map_err(domain_error_response)?;

    let bill = state
        .billing
        .get_bill(&user.user_id, &bill_id)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(BillDto::from(bill))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bills/{bill_id}",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(
        ("bill_id" = String, Path, description = "Bill ID")
    ),
    responses(
        (status = 200, description = "Bill deleted", body = ApiResponse<String>),
        (status = 404, description = "Bill not found"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn delete_bill(
    State(state): State<BillAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(bill_id): Path<String>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    state
        .billing
        .delete_bill(&user.user_id, &bill_id)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(format!(
        "Bill {} deleted",
        bill_id
    ))))
}

// ── Tests ──────────────────────────────────────────────────────
