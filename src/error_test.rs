use super::*;

// =============================================================================
// ValidationErrors
// =============================================================================

#[test]
fn empty_validation_errors_into_ok() {
    assert!(ValidationErrors::new().into_result().is_ok());
}

#[test]
fn validation_errors_into_err_keeps_fields() {
    let mut errors = ValidationErrors::new();
    errors.push("email", "invalid email");
    errors.push("password", "too short");

    let err = errors.into_result().unwrap_err();
    let ApiError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.fields.len(), 2);
    assert_eq!(errors.message_for("password"), Some("too short"));
    assert_eq!(errors.message_for("first_name"), None);
}

#[test]
fn validation_errors_display_joins_fields() {
    let mut errors = ValidationErrors::new();
    errors.push("email", "invalid email");
    errors.push("password", "too short");
    assert_eq!(errors.to_string(), "email: invalid email, password: too short");
}

// =============================================================================
// ApiError classification
// =============================================================================

#[test]
fn error_codes_are_stable() {
    assert_eq!(ApiError::Transport("x".into()).error_code(), "E_TRANSPORT");
    assert_eq!(ApiError::Unauthorized { message: "x".into() }.error_code(), "E_UNAUTHORIZED");
    assert_eq!(
        ApiError::Status { status: 404, message: "x".into(), code: None }.error_code(),
        "E_STATUS"
    );
    assert_eq!(ApiError::Decode("x".into()).error_code(), "E_DECODE");
    assert_eq!(ApiError::Validation(ValidationErrors::new()).error_code(), "E_VALIDATION");
    assert_eq!(ApiError::Config("x".into()).error_code(), "E_CONFIG");
}

#[test]
fn retryable_covers_transport_and_server_side_statuses() {
    assert!(ApiError::Transport("reset".into()).retryable());
    assert!(ApiError::Status { status: 503, message: String::new(), code: None }.retryable());
    assert!(ApiError::Status { status: 429, message: String::new(), code: None }.retryable());
    assert!(!ApiError::Status { status: 422, message: String::new(), code: None }.retryable());
    assert!(!ApiError::Unauthorized { message: String::new() }.retryable());
}

#[test]
fn status_reports_http_status_when_present() {
    assert_eq!(ApiError::Unauthorized { message: String::new() }.status(), Some(401));
    assert_eq!(
        ApiError::Status { status: 500, message: String::new(), code: None }.status(),
        Some(500)
    );
    assert_eq!(ApiError::Transport("x".into()).status(), None);
}

#[test]
fn status_error_display_includes_status_and_message() {
    let err = ApiError::Status { status: 409, message: "email taken".into(), code: Some("E_TAKEN".into()) };
    assert_eq!(err.to_string(), "request failed with status 409: email taken");
}
