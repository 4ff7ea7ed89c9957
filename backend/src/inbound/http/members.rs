//! Member signup HTTP handlers.
//!
//! ```text
//! POST /members
//! GET  /members/availability?email=<raw>
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{EmailAvailability, RegistrationRequest, RegistrationResponse};
use crate::domain::{AddressInput, MemberStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MemberStatusSchema};
use crate::inbound::http::state::HttpState;

/// Signup form body.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterMemberBody {
    /// Given name; defaults to a placeholder.
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    /// Family name; defaults to empty.
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    /// Required email address.
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    /// Membership tier; defaults to `Member`.
    #[schema(example = "Member")]
    pub tier: Option<String>,
    /// Free-text line or address-picker object with `formatted` or
    /// `streetAddress`.
    #[schema(value_type = Option<serde_json::Value>, example = "221B Baker St")]
    pub address: Option<AddressInput>,
}

impl From<RegisterMemberBody> for RegistrationRequest {
    fn from(body: RegisterMemberBody) -> Self {
        Self {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            tier: body.tier,
            address: body.address,
        }
    }
}

/// Member a signup resolved to.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberRegistrationBody {
    /// Stable member identifier.
    #[schema(example = "0190b6a4-7a3c-7cc2-9a4e-6f1c2b3d4e5f")]
    pub member_id: String,
    /// Registration status.
    #[schema(value_type = MemberStatusSchema)]
    pub status: MemberStatus,
}

impl From<RegistrationResponse> for MemberRegistrationBody {
    fn from(value: RegistrationResponse) -> Self {
        Self {
            member_id: value.member_id.to_string(),
            status: value.status,
        }
    }
}

/// Query parameters for the availability check.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityParams {
    /// Email address as typed into the form.
    pub email: Option<String>,
}

/// Availability of an email key.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailAvailabilityBody {
    /// Normalised key that was looked up.
    #[schema(example = "ada@example.com")]
    pub email_key: String,
    /// `true` when no member holds the key.
    pub available: bool,
}

impl From<EmailAvailability> for EmailAvailabilityBody {
    fn from(value: EmailAvailability) -> Self {
        Self {
            email_key: value.email_key.into(),
            available: value.available,
        }
    }
}

/// Register a member idempotently.
///
/// Resubmitting the same email returns the existing member. A later
/// submission carrying an address completes a pending member; an address
/// for an already-active member is ignored.
#[utoipa::path(
    post,
    path = "/members",
    request_body = RegisterMemberBody,
    responses(
        (status = 200, description = "Member created, upgraded or unchanged", body = MemberRegistrationBody),
        (status = 400, description = "Missing email or malformed body", body = ErrorSchema),
        (status = 401, description = "Missing or invalid credentials", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["members"],
    operation_id = "registerMember"
)]
#[post("/members")]
pub async fn register_member(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterMemberBody>,
) -> ApiResult<HttpResponse> {
    let response = state
        .registration
        .register(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(MemberRegistrationBody::from(response)))
}

/// Check whether an email is already registered.
#[utoipa::path(
    get,
    path = "/members/availability",
    params(AvailabilityParams),
    responses(
        (status = 200, description = "Availability of the email key", body = EmailAvailabilityBody),
        (status = 400, description = "Missing or implausible email", body = ErrorSchema),
        (status = 401, description = "Missing or invalid credentials", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["members"],
    operation_id = "checkEmailAvailability"
)]
#[get("/members/availability")]
pub async fn email_availability(
    state: web::Data<HttpState>,
    query: web::Query<AvailabilityParams>,
) -> ApiResult<HttpResponse> {
    let email = query.into_inner().email.unwrap_or_default();
    let availability = state.availability.check(&email).await?;
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "no-store"))
        .json(EmailAvailabilityBody::from(availability)))
}

#[cfg(test)]
mod tests;
