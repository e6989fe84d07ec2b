//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint of the inbound layer together
//! with the request/response schemas and the `TokenAuth` security scheme.
//! Swagger UI serves it in debug builds and `openapi-dump` prints it for
//! external tooling.

use crate::inbound::http::accounts::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::inbound::http::bookings::{BookingPatchRequest, BookingRequest, BookingResponse};
use crate::inbound::http::categories::{CategoryRequest, CategoryResponse};
use crate::inbound::http::menu::{MenuItemPatchRequest, MenuItemRequest, MenuItemResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the token security scheme in the generated document.
pub const TOKEN_AUTH_SCHEME: &str = "TokenAuth";

/// Enrich the generated document with the token header security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            TOKEN_AUTH_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "`Token <auth_token>` as issued by POST /auth/token/login/.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Little Lemon API",
        description = "Menu catalogue, table bookings and token authentication for the Little Lemon restaurant."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TokenAuth" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::list_users,
        crate::inbound::http::accounts::current_user,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::menu::list_menu_items,
        crate::inbound::http::menu::create_menu_item,
        crate::inbound::http::menu::get_menu_item,
        crate::inbound::http::menu::replace_menu_item,
        crate::inbound::http::menu::patch_menu_item,
        crate::inbound::http::menu::delete_menu_item,
        crate::inbound::http::bookings::list_bookings,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::bookings::replace_booking,
        crate::inbound::http::bookings::patch_booking,
        crate::inbound::http::bookings::delete_booking,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        TokenResponse,
        UserResponse,
        CategoryRequest,
        CategoryResponse,
        MenuItemRequest,
        MenuItemPatchRequest,
        MenuItemResponse,
        BookingRequest,
        BookingPatchRequest,
        BookingResponse,
    )),
    tags(
        (name = "auth", description = "Accounts and auth tokens"),
        (name = "menu", description = "Menu categories and items"),
        (name = "bookings", description = "Table bookings of the caller"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn menu_item_schema_uses_snake_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get("MenuItemResponse").expect("MenuItemResponse schema");

        assert_object_schema_has_field(schema, "inventory");
        assert_object_schema_has_field(schema, "price");
    }

    #[rstest]
    #[case("/auth/token/login/")]
    #[case("/restaurant/menu/{id}/")]
    #[case("/restaurant/booking/tables/")]
    #[case("/health/ready")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn registers_the_token_security_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(TOKEN_AUTH_SCHEME));
    }
}
