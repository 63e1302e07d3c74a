//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::BillingService;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{auth, bills, health, tariffs};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        // Bills
        bills::generate_bill,
        bills::list_bills,
        bills::get_bill_stats,
        bills::find_bills_by_meter,
        bills::get_bill,
        bills::mark_bill_paid,
        bills::record_payment_result,
        bills::delete_bill,
        // Tariffs
        tariffs::list_tariffs,
        tariffs::preview_cost,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Health
            health::HealthResponse,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::UserInfo,
            // Bills
            bills::GenerateBillRequest,
            bills::BillDto,
            bills::BillStatsDto,
            bills::PaymentResultRequest,
            // Tariffs
            tariffs::TariffDto,
            tariffs::SlabDto,
            tariffs::CostPreviewRequest,
            tariffs::CostPreviewResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User authentication: login (JWT), registration"),
        (name = "Bills", description = "Electricity bill generation, listing, payment and deletion"),
        (name = "Tariffs", description = "Published slab rate sheets and cost preview"),
    ),
    info(
        title = "PowerBill API",
        version = "1.0.0",
        description = "REST API for slab-tariff electricity billing",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    billing: Arc<BillingService>,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let auth_state = auth::AuthHandlerState {
        db: db.clone(),
        jwt_config,
    };

    let bill_state = bills::BillAppState { billing };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Bill routes (protected)
    let bill_routes = Router::new()
        .route("/", get(bills::list_bills).post(bills::generate_bill))
        .route("/stats", get(bills::get_bill_stats))
        .route("/by-meter/{meter_number}", get(bills::find_bills_by_meter))
        .route(
            "/{bill_id}",
            get(bills::get_bill).delete(bills::delete_bill),
        )
        .route("/{bill_id}/pay", post(bills::mark_bill_paid))
        .route("/{bill_id}/payments", post(bills::record_payment_result))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(bill_state);

    // Tariff routes (protected, read-only)
    let tariff_routes = Router::new()
        .route("/", get(tariffs::list_tariffs))
        .route("/preview", post(tariffs::preview_cost))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Bills
        .nest("/api/v1/bills", bill_routes)
        // Tariffs
        .nest("/api/v1/tariffs", tariff_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
