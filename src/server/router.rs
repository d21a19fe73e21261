//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI specifications, and Swagger UI
//! is served at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/auth/login`, `GET /api/auth/logout`, `GET /api/auth/user`
/// - `POST /api/users`
/// - `POST /api/clones/assign`, `POST /api/clones/unassign`
/// - `GET|POST /api/account-ownership`
/// - `GET /api/accounts`, `GET|PATCH|DELETE /api/accounts/{account_id}`
/// - `GET /api/accounts/{account_id}/growth`, `POST /api/accounts/{account_id}/metrics`
/// - `GET /api/devices`, `GET|PUT /api/devices/{device_id}`
/// - `PUT /api/devices/{device_id}/clones/{clone_number}`
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(AppState { db });
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Client Portal", description = "Client portal API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
        (name = controller::user::USER_TAG, description = "Portal user management"),
        (name = controller::clone::CLONE_TAG, description = "Account placement in device clones"),
        (name = controller::ownership::OWNERSHIP_TAG, description = "Account ownership"),
        (name = controller::account::ACCOUNT_TAG, description = "Managed accounts"),
        (name = controller::device::DEVICE_TAG, description = "Devices and clone slots"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::user::create_user))
        .routes(routes!(controller::clone::assign_to_clone))
        .routes(routes!(controller::clone::unassign_from_clone))
        .routes(routes!(
            controller::ownership::get_account_ownership,
            controller::ownership::update_account_ownership
        ))
        .routes(routes!(controller::account::get_accounts))
        .routes(routes!(
            controller::account::get_account,
            controller::account::update_account,
            controller::account::delete_account
        ))
        .routes(routes!(controller::account::get_account_growth))
        .routes(routes!(controller::account::record_account_metric))
        .routes(routes!(controller::device::get_devices))
        .routes(routes!(
            controller::device::get_device,
            controller::device::upsert_device
        ))
        .routes(routes!(controller::device::update_clone))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
