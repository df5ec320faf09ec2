//! Custom assertion macros and utilities
//!
//! Provides enhanced assertion macros for better test output and
//! more descriptive error messages.

/// Assert that a result is ok and return the value
///
/// This macro unwraps a Result, providing a better error message
/// if the result is an error.
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a result is an error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        assert!($result.is_err(), "Expected Err, got Ok");
    };
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => panic!("Expected different error variant, got: {:?}", e),
        }
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert on the JSON envelope of a failed request
///
/// Checks the status code, `success: false` and the `kind` field.
#[macro_export]
macro_rules! assert_failure {
    ($response:expr, $status:expr, $kind:expr) => {{
        let (status, body) = $response;
        assert_eq!(status, $status, "unexpected status, body: {}", body);
        assert_eq!(body["success"], false, "expected failure, body: {}", body);
        assert_eq!(body["kind"], $kind, "unexpected kind, body: {}", body);
        body
    }};
}
