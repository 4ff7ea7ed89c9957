//! OpenAPI schema wrappers for domain types.
//!
//! Domain types do not derive `ToSchema`; the wrappers here mirror their wire
//! shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Human-readable message.
    #[schema(example = "email is required")]
    error: String,
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "0190b6a4-7a3c-7cc2-9a4e-6f1c2b3d4e5f")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::MemberStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MemberStatus)]
pub enum MemberStatusSchema {
    /// Signed up without a usable mailing address.
    #[schema(rename = "pending-address")]
    PendingAddress,
    /// Mailing address on file.
    #[schema(rename = "active")]
    Active,
}
