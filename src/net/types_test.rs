use super::*;

#[test]
fn parse_full_json_body() {
    let body = ApiErrorBody::parse(r#"{"message":"Invalid credentials","code":"AUTH_FAILED","status":401}"#);
    assert_eq!(body.message.as_deref(), Some("Invalid credentials"));
    assert_eq!(body.code.as_deref(), Some("AUTH_FAILED"));
    assert_eq!(body.status, Some(401));
}

#[test]
fn parse_partial_json_body() {
    let body = ApiErrorBody::parse(r#"{"message":"nope"}"#);
    assert_eq!(body.message.as_deref(), Some("nope"));
    assert_eq!(body.code, None);
}

#[test]
fn parse_plain_text_becomes_message() {
    let body = ApiErrorBody::parse("Bad Gateway\n");
    assert_eq!(body.message.as_deref(), Some("Bad Gateway"));
}

#[test]
fn parse_empty_is_default() {
    assert_eq!(ApiErrorBody::parse("   "), ApiErrorBody::default());
}

#[test]
fn message_or_uses_fallback_for_blank_message() {
    let body = ApiErrorBody { message: Some(" ".into()), ..ApiErrorBody::default() };
    assert_eq!(body.message_or("Unauthorized"), "Unauthorized");
}
