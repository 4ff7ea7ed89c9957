//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the member and probe endpoints, the schema wrappers
//! from [`crate::inbound::http::schemas`], and the two accepted credentials:
//! a bearer token or the shared `x-api-key` secret.
//!
//! Served by Swagger UI in debug builds and exported with
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::members::{
    EmailAvailabilityBody, MemberRegistrationBody, RegisterMemberBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, MemberStatusSchema};
use crate::middleware::API_KEY_HEADER;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Security scheme for the shared `x-api-key` secret.
pub const API_KEY_SCHEME: &str = "ApiKey";
/// Security scheme for bearer tokens.
pub const BEARER_SCHEME: &str = "BearerAuth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            API_KEY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                API_KEY_HEADER,
                "Shared secret configured through MEMBERS_API_KEY.",
            ))),
        );
        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Any bearer token; verification happens upstream."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the members API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Members API",
        description = "Idempotent member signup keyed by email address.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("ApiKey" = []), ("BearerAuth" = [])),
    paths(
        crate::inbound::http::members::register_member,
        crate::inbound::http::members::email_availability,
        crate::inbound::http::health::healthz,
        crate::inbound::http::health::root,
    ),
    components(schemas(
        RegisterMemberBody,
        MemberRegistrationBody,
        EmailAvailabilityBody,
        MemberStatusSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "members", description = "Member signup"),
        (name = "health", description = "Unauthenticated probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Structure checks on the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const STATUS_SCHEMA_NAME: &str = "crate.domain.MemberStatus";

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
    fn error_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "error");
        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn registration_body_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let body = schemas.get("RegisterMemberBody").expect("request schema");

        for field in ["firstName", "lastName", "email", "tier", "address"] {
            assert_object_schema_has_field(body, field);
        }
        assert!(schemas.contains_key(STATUS_SCHEMA_NAME));
    }

    #[rstest]
    #[case("/members")]
    #[case("/members/availability")]
    #[case("/healthz")]
    #[case("/")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn both_credentials_are_declared() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(API_KEY_SCHEME));
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
