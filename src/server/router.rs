//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at
//! `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI
/// documentation.
///
/// Handlers registered on the same path are grouped into a single `routes!`
/// call so they share one route entry. The OpenAPI specification is served at
/// `/api/docs/openapi.json`.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Hearth", description = "Hearth API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Registration and login"),
        (name = controller::apartment::APARTMENT_TAG, description = "Apartments and membership"),
        (name = controller::event::EVENT_TAG, description = "Shared calendar events"),
        (name = controller::shopping::SHOPPING_TAG, description = "Shopping list and product catalog"),
        (name = controller::chore::CHORE_TAG, description = "Chore rotations"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::login))
        .routes(routes!(
            controller::apartment::create_apartment,
            controller::apartment::get_apartments
        ))
        .routes(routes!(
            controller::apartment::get_apartment,
            controller::apartment::update_apartment,
            controller::apartment::delete_apartment
        ))
        .routes(routes!(controller::apartment::join_apartment))
        .routes(routes!(controller::apartment::get_members))
        .routes(routes!(controller::apartment::leave_apartment))
        .routes(routes!(
            controller::event::get_events,
            controller::event::create_event
        ))
        .routes(routes!(
            controller::event::update_event,
            controller::event::delete_event
        ))
        .routes(routes!(controller::shopping::get_products))
        .routes(routes!(
            controller::shopping::get_shopping_list,
            controller::shopping::add_shopping_item
        ))
        .routes(routes!(
            controller::shopping::update_shopping_item,
            controller::shopping::delete_shopping_item
        ))
        .routes(routes!(
            controller::chore::get_chores,
            controller::chore::create_chore
        ))
        .routes(routes!(
            controller::chore::get_chore,
            controller::chore::update_chore,
            controller::chore::delete_chore
        ))
        .routes(routes!(controller::chore::replace_roster))
        .routes(routes!(controller::chore::advance_cycle))
        .routes(routes!(controller::chore::current_assignee))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
