//! Behavioural tests for idempotent member signup.

#[path = "support/members_app.rs"]
mod members_app;

use std::cell::RefCell;

use actix_web::test as actix_test;
use members_api::domain::EmailKey;
use members_api::domain::ports::MemberRepository;
use members_app::{API_KEY, MembersApp};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

struct Reply {
    status: u16,
    body: Value,
}

/// Scenario state. Actix test services are `!Send`, so requests are driven
/// on a current-thread runtime inside a `LocalSet`.
struct MembershipWorld {
    runtime: Runtime,
    local: LocalSet,
    members: MembersApp,
    first_member_id: RefCell<Option<Value>>,
    last_reply: RefCell<Option<Reply>>,
}

impl MembershipWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        Self {
            runtime,
            local: LocalSet::new(),
            members: MembersApp::new(),
            first_member_id: RefCell::new(None),
            last_reply: RefCell::new(None),
        }
    }

    fn send(&self, request: actix_test::TestRequest) -> Reply {
        let members = self.members.clone();
        self.local.block_on(&self.runtime, async move {
            let app = actix_test::init_service(members.app()).await;
            let response = actix_test::call_service(&app, request.to_request()).await;
            let status = response.status().as_u16();
            let bytes = actix_test::read_body(response).await;
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            Reply { status, body }
        })
    }

    fn register(&self, body: Value) -> Reply {
        self.send(
            actix_test::TestRequest::post()
                .uri("/members")
                .insert_header(("x-api-key", API_KEY))
                .set_json(body),
        )
    }

    /// Keep `reply` and remember the first member id seen.
    fn record(&self, reply: Reply) {
        let mut first = self.first_member_id.borrow_mut();
        if first.is_none() && reply.status == 200 {
            *first = Some(reply.body["memberId"].clone());
        }
        *self.last_reply.borrow_mut() = Some(reply);
    }

    fn with_last_reply<R>(&self, f: impl FnOnce(&Reply) -> R) -> R {
        let reply = self.last_reply.borrow();
        f(reply.as_ref().expect("a request was sent"))
    }
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

#[fixture]
fn world() -> MembershipWorld {
    MembershipWorld::new()
}

#[given("a running members api")]
fn a_running_members_api(world: &MembershipWorld) {
    assert_eq!(world.members.member_count(), 0);
}

#[given("{email} has signed up without an address")]
fn has_signed_up_without_address(world: &MembershipWorld, email: String) {
    let reply = world.register(json!({ "email": unquote(&email) }));
    assert_eq!(reply.status, 200);
    world.record(reply);
}

#[given("{email} has signed up with address {address}")]
fn has_signed_up_with_address(world: &MembershipWorld, email: String, address: String) {
    let reply = world.register(json!({ "email": unquote(&email), "address": unquote(&address) }));
    assert_eq!(reply.status, 200);
    world.record(reply);
}

#[when("{email} signs up without an address")]
fn signs_up_without_address(world: &MembershipWorld, email: String) {
    let reply = world.register(json!({ "email": unquote(&email) }));
    world.record(reply);
}

#[when("{email} signs up with address {address}")]
fn signs_up_with_address(world: &MembershipWorld, email: String, address: String) {
    let reply = world.register(json!({ "email": unquote(&email), "address": unquote(&address) }));
    world.record(reply);
}

#[when("a signup arrives without an email")]
fn signup_without_email(world: &MembershipWorld) {
    let reply = world.register(json!({ "firstName": "Nameless" }));
    world.record(reply);
}

#[when("{email} signs up without credentials")]
fn signs_up_without_credentials(world: &MembershipWorld, email: String) {
    let reply = world.send(
        actix_test::TestRequest::post()
            .uri("/members")
            .set_json(json!({ "email": unquote(&email) })),
    );
    world.record(reply);
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &MembershipWorld, status: u16) {
    world.with_last_reply(|reply| assert_eq!(reply.status, status));
}

#[then("the member status is {status}")]
fn the_member_status_is(world: &MembershipWorld, status: String) {
    world.with_last_reply(|reply| assert_eq!(reply.body["status"], json!(unquote(&status))));
}

#[then("the same member id is returned")]
fn the_same_member_id_is_returned(world: &MembershipWorld) {
    let first = world
        .first_member_id
        .borrow()
        .clone()
        .expect("an earlier signup succeeded");
    world.with_last_reply(|reply| assert_eq!(reply.body["memberId"], first));
}

#[then("the error message is {message}")]
fn the_error_message_is(world: &MembershipWorld, message: String) {
    world.with_last_reply(|reply| assert_eq!(reply.body["error"], json!(unquote(&message))));
}

#[then("{count} member is stored")]
fn members_are_stored(world: &MembershipWorld, count: usize) {
    assert_eq!(world.members.member_count(), count);
}

#[then("the stored address for {email} is {address}")]
fn the_stored_address_is(world: &MembershipWorld, email: String, address: String) {
    let key = EmailKey::new(unquote(&email)).expect("email key");
    let repo = world.members.repo.clone();
    let stored = world
        .local
        .block_on(&world.runtime, async move { repo.find_by_email_key(&key).await })
        .expect("lookup")
        .expect("member stored");
    assert_eq!(stored.address_text.as_deref(), Some(unquote(&address)));
}

#[scenario(path = "tests/features/member_registration.feature")]
fn member_registration(world: MembershipWorld) {
    let _ = world;
}
