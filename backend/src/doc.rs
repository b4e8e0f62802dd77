//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` handler and the probes, the shared error
//! envelope, and two security schemes: the `session_token` cookie and the
//! equivalent bearer header. Request and response schemas are derived on the
//! domain and DTO types themselves and collected from the handler
//! annotations.
//!
//! The generated OpenAPI document is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::session::SESSION_COOKIE_NAME;

/// Enrich the generated document with the session security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/auth/session.",
            ))),
        );
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("The same session token, sent as a bearer credential."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Baby Day Book API",
        description = "Record keeping for infant care: profiles, activity logs, sharing, and daily summaries."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = []), ("BearerToken" = [])),
    paths(
        crate::inbound::http::health::banner,
        crate::inbound::http::health::api_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::exchange_session,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::logout,
        crate::inbound::http::babies::create_baby,
        crate::inbound::http::babies::list_babies,
        crate::inbound::http::babies::get_baby,
        crate::inbound::http::babies::update_baby,
        crate::inbound::http::babies::delete_baby,
        crate::inbound::http::activities::create_feeding,
        crate::inbound::http::activities::list_feedings,
        crate::inbound::http::activities::delete_feeding,
        crate::inbound::http::activities::create_sleep,
        crate::inbound::http::activities::list_sleeps,
        crate::inbound::http::activities::update_sleep,
        crate::inbound::http::activities::delete_sleep,
        crate::inbound::http::activities::create_diaper,
        crate::inbound::http::activities::list_diapers,
        crate::inbound::http::activities::delete_diaper,
        crate::inbound::http::activities::create_growth,
        crate::inbound::http::activities::list_growth,
        crate::inbound::http::activities::delete_growth,
        crate::inbound::http::aggregation::timeline,
        crate::inbound::http::aggregation::daily_stats,
        crate::inbound::http::aggregation::sleep_prediction,
        crate::inbound::http::sharing::create_invite,
        crate::inbound::http::sharing::pending_invites,
        crate::inbound::http::sharing::accept_invite,
        crate::inbound::http::sharing::decline_invite,
        crate::inbound::http::sharing::revoke_access,
        crate::inbound::http::reminders::create_reminder,
        crate::inbound::http::reminders::list_reminders,
        crate::inbound::http::reminders::delete_reminder,
    ),
    components(schemas(Error, ErrorCode)),
    tags(
        (name = "auth", description = "Session exchange and logout"),
        (name = "babies", description = "Baby profiles"),
        (name = "feeding", description = "Feeding records"),
        (name = "sleep", description = "Sleep records and nap forecast"),
        (name = "diaper", description = "Diaper changes"),
        (name = "growth", description = "Growth measurements"),
        (name = "aggregation", description = "Timeline and daily statistics"),
        (name = "sharing", description = "Invites and collaborator access"),
        (name = "reminders", description = "Reminders"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
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

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[rstest]
    #[case("/api/auth/session")]
    #[case("/api/baby/{baby_id}")]
    #[case("/api/sleep/{record_id}")]
    #[case("/api/timeline/{baby_id}")]
    #[case("/api/share/{baby_id}/{user_id}")]
    #[case("/api/reminder")]
    #[case("/health/ready")]
    fn routes_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn both_session_schemes_are_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
