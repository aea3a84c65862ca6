//! Unit tests for the host logger adapter.

use rstest::rstest;

use super::*;
use crate::tests::MockHost;

#[test]
fn trace_targets_tarmac_logger() {
    let mut host = MockHost::new();
    host.expect_call()
        .withf(|namespace, capability, operation, payload| {
            namespace == "tarmac"
                && capability == "logger"
                && operation == "trace"
                && payload == b"Reversing Payload: hi"
        })
        .once()
        .returning(|_, _, _, _| Ok(Vec::new()));

    HostLogger::new(&host)
        .trace("Reversing Payload: hi")
        .expect("trace succeeds");
}

#[test]
fn error_targets_tarmac_logger() {
    let mut host = MockHost::new();
    host.expect_call()
        .withf(|namespace, capability, operation, payload| {
            namespace == "tarmac"
                && capability == "logger"
                && operation == "error"
                && payload == b"handler table unavailable"
        })
        .once()
        .returning(|_, _, _, _| Ok(Vec::new()));

    HostLogger::new(&host)
        .error("handler table unavailable")
        .expect("error log succeeds");
}

#[test]
fn host_failure_is_returned_unchanged() {
    let mut host = MockHost::new();
    host.expect_call().once().returning(|namespace, capability, operation, _| {
        Err(HostCallError::rejected(
            namespace,
            capability,
            operation,
            "logger offline",
        ))
    });

    let error = HostLogger::new(&host)
        .trace("message")
        .expect_err("should fail");
    assert_eq!(
        error,
        HostCallError::rejected("tarmac", "logger", "trace", "logger offline")
    );
}

#[rstest]
#[case::error(LogLevel::Error, "error")]
#[case::warn(LogLevel::Warn, "warn")]
#[case::info(LogLevel::Info, "info")]
#[case::debug(LogLevel::Debug, "debug")]
#[case::trace(LogLevel::Trace, "trace")]
fn log_level_maps_to_operation(#[case] level: LogLevel, #[case] operation: &'static str) {
    assert_eq!(level.operation(), operation);
    assert_eq!(level.to_string(), operation);
    assert_eq!(LogLevel::from_operation(operation), Some(level));

    let mut host = MockHost::new();
    host.expect_call()
        .withf(move |_, _, op, _| op == operation)
        .once()
        .returning(|_, _, _, _| Ok(Vec::new()));
    HostLogger::new(&host)
        .log(level, "x")
        .expect("log succeeds");
}

#[test]
fn unknown_operation_has_no_level() {
    assert_eq!(LogLevel::from_operation("fatal"), None);
}

#[rstest]
#[case::rejected(
    HostCallError::rejected("tarmac", "logger", "trace", "denied"),
    "tarmac:logger:trace failed: denied"
)]
#[case::unsupported(
    HostCallError::unsupported("tarmac", "kvstore", "get"),
    "tarmac:kvstore:get is not provided by this host"
)]
fn host_call_error_messages(#[case] error: HostCallError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}
