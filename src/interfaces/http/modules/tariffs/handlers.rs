//! Tariff API handlers
//!
//! Rates are compiled into the tariff tables, so these endpoints are
//! read-only and stateless.

use axum::http::StatusCode;
use axum::Json;

use super::dto::{CostPreviewRequest, CostPreviewResponse, TariffDto};
use crate::domain::{compute_amount, ConnectionType};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::shared::errors::DomainError;

type ApiError = (StatusCode, Json<ApiResponse<()>>);

#[utoipa::path(
    get,
    path = "/api/v1/tariffs",
    tag = "Tariffs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Rate sheets for every connection type", body = ApiResponse<Vec<TariffDto>>)
    )
)]
pub async fn list_tariffs() -> Json<ApiResponse<Vec<TariffDto>>> {
    let tariffs = [
        ConnectionType::Domestic,
        ConnectionType::Commercial,
        ConnectionType::Industrial,
    ]
    .into_iter()
    .map(TariffDto::for_connection_type)
    .collect();

    Json(ApiResponse::success(tariffs))
}

#[utoipa::path(
    post,
    path = "/api/v1/tariffs/preview",
    tag = "Tariffs",
    security(("bearer_auth" = [])),
    request_body = CostPreviewRequest,
    responses(
        (status = 200, description = "Cost for the given consumption", body = ApiResponse<CostPreviewResponse>),
        (status = 400, description = "Unknown connection type"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn preview_cost(
    ValidatedJson(request): ValidatedJson<CostPreviewRequest>,
) -> Result<Json<ApiResponse<CostPreviewResponse>>, ApiError> {
    let connection_type =
        ConnectionType::parse(request.connection_type.trim()).map_err(domain_error_response)?;
    let units = u32::try_from(request.units).map_err(|_| {
        domain_error_response(DomainError::validation("units", "units is out of range"))
    })?;

    let amount = compute_amount(units, connection_type);

    Ok(Json(ApiResponse::success(CostPreviewResponse {
        connection_type: connection_type.to_string(),
        units,
        amount,
    })))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_all_three_rate_sheets() {
        let Json(body) = list_tariffs().await;
        let tariffs = body.data.unwrap();
        assert_eq!(tariffs.len(), 3);
        assert_eq!(tariffs[0].connection_type, "domestic");
        assert_eq!(tariffs[0].slabs.len(), 4);
        assert_eq!(tariffs[2].connection_type, "industrial");
        assert_eq!(tariffs[2].slabs.len(), 1);
    }

    #[tokio::test]
    async fn preview_matches_calculator() {
        let request = CostPreviewRequest {
            connection_type: "commercial".to_string(),
            units: 300,
        };
        let Json(body) = preview_cost(ValidatedJson(request)).await.unwrap();
        let preview = body.data.unwrap();
        assert_eq!(preview.amount.to_string(), "2050.00");
        assert_eq!(preview.units, 300);
    }

    #[tokio::test]
    async fn preview_rejects_unknown_connection_type() {
        let request = CostPreviewRequest {
            connection_type: "agricultural".to_string(),
            units: 10,
        };
        let (status, _) = preview_cost(ValidatedJson(request)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
