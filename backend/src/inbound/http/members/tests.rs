//! Tests for member signup handlers.

use super::*;
use crate::domain::ports::{
    FixtureEmailAvailabilityQuery, FixtureMemberRegistrationCommand, MockEmailAvailabilityQuery,
    MockMemberRegistrationCommand,
};
use crate::domain::{EmailKey, Error, MemberId};
use crate::inbound::http::configure;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

const FIXTURE_ID: &str = "0190b6a4-7a3c-7cc2-9a4e-6f1c2b3d4e5f";

fn fixture_id() -> MemberId {
    FIXTURE_ID.parse().expect("valid uuid")
}

fn fixture_state() -> HttpState {
    HttpState::new(
        Arc::new(FixtureMemberRegistrationCommand(fixture_id())),
        Arc::new(FixtureEmailAvailabilityQuery),
    )
}

async fn call(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

#[rstest]
#[case(json!({ "email": "ada@example.com" }), "pending-address")]
#[case(json!({ "email": "ada@example.com", "address": "221B Baker St" }), "active")]
#[case(json!({ "email": "ada@example.com", "address": { "streetAddress": "1 Main St" } }), "active")]
#[case(json!({ "email": "ada@example.com", "address": { "city": "London" } }), "pending-address")]
#[actix_web::test]
async fn register_returns_member_id_and_status(#[case] body: Value, #[case] status: &'static str) {
    let (code, value) = call(
        fixture_state(),
        actix_test::TestRequest::post().uri("/members").set_json(body),
    )
    .await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(value, json!({ "memberId": FIXTURE_ID, "status": status }));
}

#[actix_web::test]
async fn register_forwards_the_submitted_form() {
    let mut command = MockMemberRegistrationCommand::new();
    command
        .expect_register()
        .withf(|request| {
            request.email.as_deref() == Some("Ada@Example.com")
                && request.first_name.as_deref() == Some("Ada")
                && request.last_name.is_none()
                && request.tier.as_deref() == Some("Gold")
                && request.address == Some(AddressInput::Freeform("1 Main St".to_owned()))
        })
        .times(1)
        .return_once(|_| {
            Ok(RegistrationResponse {
                member_id: MemberId::from_uuid(Uuid::nil()),
                status: MemberStatus::Active,
            })
        });
    let state = HttpState::new(Arc::new(command), Arc::new(FixtureEmailAvailabilityQuery));

    let (code, value) = call(
        state,
        actix_test::TestRequest::post().uri("/members").set_json(json!({
            "firstName": "Ada",
            "email": "Ada@Example.com",
            "tier": "Gold",
            "address": "1 Main St",
            "ignored": true,
        })),
    )
    .await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(value["status"], json!("active"));
    assert_eq!(value["memberId"], json!(Uuid::nil().to_string()));
}

#[actix_web::test]
async fn validation_errors_become_bad_request() {
    let mut command = MockMemberRegistrationCommand::new();
    command.expect_register().return_once(|_| {
        Err(Error::invalid_request("email is required")
            .with_details(json!({ "field": "email", "code": "missing_email" })))
    });
    let state = HttpState::new(Arc::new(command), Arc::new(FixtureEmailAvailabilityQuery));

    let (code, value) = call(
        state,
        actix_test::TestRequest::post()
            .uri("/members")
            .set_json(json!({ "firstName": "Ada" })),
    )
    .await;

    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], json!("email is required"));
    assert_eq!(value["details"]["code"], json!("missing_email"));
}

#[actix_web::test]
async fn storage_failures_are_redacted() {
    let mut command = MockMemberRegistrationCommand::new();
    command
        .expect_register()
        .return_once(|_| Err(Error::internal("member repository error: relation missing")));
    let state = HttpState::new(Arc::new(command), Arc::new(FixtureEmailAvailabilityQuery));

    let (code, value) = call(
        state,
        actix_test::TestRequest::post()
            .uri("/members")
            .set_json(json!({ "email": "ada@example.com" })),
    )
    .await;

    assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], json!("Internal error"));
    assert_eq!(value["code"], json!("internal_error"));
}

#[rstest]
#[case("{not json")]
#[case("[1, 2, 3]")]
#[case("{\"email\": 42}")]
#[actix_web::test]
async fn malformed_bodies_are_rejected(#[case] body: &'static str) {
    let (code, value) = call(
        fixture_state(),
        actix_test::TestRequest::post()
            .uri("/members")
            .insert_header(("content-type", "application/json"))
            .set_payload(body),
    )
    .await;

    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(value["code"], json!("invalid_request"));
    assert_eq!(value["details"]["code"], json!("invalid_body"));
    assert!(value["error"].is_string());
}

#[actix_web::test]
async fn availability_reports_the_key() {
    let (code, value) = call(
        fixture_state(),
        actix_test::TestRequest::get().uri("/members/availability?email=%20Ada%40Example.com%20"),
    )
    .await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(
        value,
        json!({ "emailKey": "ada@example.com", "available": true })
    );
}

#[actix_web::test]
async fn availability_passes_the_raw_email_through() {
    let mut query = MockEmailAvailabilityQuery::new();
    query
        .expect_check()
        .withf(|email| email == "taken@example.com")
        .return_once(|_| {
            Ok(EmailAvailability {
                email_key: EmailKey::new("taken@example.com").expect("key"),
                available: false,
            })
        });
    let state = HttpState::new(
        Arc::new(FixtureMemberRegistrationCommand(fixture_id())),
        Arc::new(query),
    );

    let (code, value) = call(
        state,
        actix_test::TestRequest::get().uri("/members/availability?email=taken@example.com"),
    )
    .await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(value["available"], json!(false));
}

#[actix_web::test]
async fn availability_without_email_is_a_bad_request() {
    let (code, value) = call(
        fixture_state(),
        actix_test::TestRequest::get().uri("/members/availability"),
    )
    .await;

    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], json!("email is required"));
}
