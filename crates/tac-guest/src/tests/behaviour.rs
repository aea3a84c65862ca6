//! Behaviour-driven tests for verb dispatch through the guest.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tac_envelope::{ServerRequest, ServerResponse, decode_response};

use crate::dispatch::{DispatchError, Dispatcher, tac_routes};
use crate::host::{HostCall, HostCallError};

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingHost {
    fails: bool,
    messages: RefCell<Vec<String>>,
}

impl HostCall for RecordingHost {
    fn call(
        &self,
        namespace: &str,
        capability: &str,
        operation: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>, HostCallError> {
        self.messages
            .borrow_mut()
            .push(String::from_utf8_lossy(payload).into_owned());
        if self.fails {
            return Err(HostCallError::rejected(
                namespace,
                capability,
                operation,
                "logger unavailable",
            ));
        }
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct World {
    dispatcher: Option<Dispatcher<RecordingHost>>,
    outcome: Option<Result<Vec<u8>, DispatchError>>,
}

#[fixture]
fn world() -> World {
    World::default()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn unquote(text: &str) -> &str {
    text.trim_matches('"')
}

fn install_guest(world: &mut World, fails: bool) {
    let host = RecordingHost {
        fails,
        ..RecordingHost::default()
    };
    let table = tac_routes().expect("fixed routes are distinct");
    world.dispatcher = Some(Dispatcher::new(table, host));
}

fn dispatcher(world: &World) -> &Dispatcher<RecordingHost> {
    world.dispatcher.as_ref().expect("guest should be installed")
}

fn call(world: &mut World, verb: &str, input: &[u8]) {
    let outcome = dispatcher(world).dispatch(unquote(verb), input);
    world.outcome = Some(outcome);
}

fn response(world: &World) -> ServerResponse {
    let bytes = world
        .outcome
        .as_ref()
        .expect("call outcome should be present")
        .as_ref()
        .expect("expected the verb to be dispatched");
    decode_response(bytes).expect("output should be a response envelope")
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("a guest whose host logger accepts calls")]
fn given_accepting_host(world: &mut World) {
    install_guest(world, false);
}

#[given("a guest whose host logger fails")]
fn given_failing_host(world: &mut World) {
    install_guest(world, true);
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the host calls {verb} with payload {payload}")]
fn when_call_with_payload(world: &mut World, verb: String, payload: String) {
    let request = ServerRequest::from_bytes(unquote(&payload).as_bytes());
    let input = serde_json::to_vec(&request).expect("serialise request");
    call(world, &verb, &input);
}

#[when("the host calls {verb} with raw input {input}")]
fn when_call_with_raw_input(world: &mut World, verb: String, input: String) {
    call(world, &verb, unquote(&input).as_bytes());
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the response status is {code}")]
fn then_status(world: &mut World, code: u16) {
    assert_eq!(response(world).status().code(), code);
}

#[then("the response payload is {expected}")]
fn then_payload(world: &mut World, expected: String) {
    let payload = response(world)
        .decode_payload()
        .expect("payload should be base64")
        .expect("payload should be present");
    assert_eq!(payload.as_slice(), unquote(&expected).as_bytes());
}

#[then("the response has no payload")]
fn then_no_payload(world: &mut World) {
    assert_eq!(response(world).payload(), None);
}

#[then("the status text starts with {prefix}")]
fn then_status_prefix(world: &mut World, prefix: String) {
    let envelope = response(world);
    let message = envelope.status().message();
    assert!(
        message.starts_with(unquote(&prefix)),
        "unexpected status text: {message}"
    );
}

#[then("the host logger received {message}")]
fn then_logger_received(world: &mut World, message: String) {
    let messages = dispatcher(world).host().messages.borrow();
    assert_eq!(messages.as_slice(), [unquote(&message).to_owned()]);
}

#[then("the host logger was not called")]
fn then_logger_idle(world: &mut World) {
    assert!(dispatcher(world).host().messages.borrow().is_empty());
}

#[then("the call is rejected as an unknown verb")]
fn then_unknown_verb(world: &mut World) {
    let outcome = world
        .outcome
        .as_ref()
        .expect("call outcome should be present");
    assert!(
        matches!(outcome, Err(DispatchError::UnknownVerb { .. })),
        "expected unknown verb, got {outcome:?}"
    );
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/tac_guest.feature",
    name = "Posting a payload returns it reversed"
)]
fn posting_returns_reversed(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/tac_guest.feature",
    name = "Putting an empty payload returns an empty payload"
)]
fn putting_empty_payload(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/tac_guest.feature",
    name = "Getting is not implemented"
)]
fn getting_is_not_implemented(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/tac_guest.feature",
    name = "Malformed JSON is reported in-band"
)]
fn malformed_json_in_band(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/tac_guest.feature",
    name = "A failing host logger aborts the request"
)]
fn failing_logger_aborts(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/tac_guest.feature",
    name = "Unregistered verbs are left to the host"
)]
fn unregistered_verbs(world: World) {
    let _ = world;
}
