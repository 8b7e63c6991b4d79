//! Error taxonomy tests

use actix_web::http::StatusCode;

use mylinks::errors::MyLinksError;

#[test]
fn codes_are_stable() {
    assert_eq!(MyLinksError::database_config("x").code(), "E001");
    assert_eq!(MyLinksError::validation("x").code(), "E004");
    assert_eq!(MyLinksError::not_found("x").code(), "E005");
    assert_eq!(MyLinksError::unauthorized("x").code(), "E006");
}

#[test]
fn display_uses_type_and_message() {
    let err = MyLinksError::not_found("Page not found: alice");
    assert_eq!(
        err.to_string(),
        "Resource Not Found: Page not found: alice"
    );
    assert_eq!(err.message(), "Page not found: alice");
}

#[test]
fn http_status_mapping() {
    assert_eq!(
        MyLinksError::not_found("x").http_status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        MyLinksError::validation("x").http_status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        MyLinksError::unauthorized("x").http_status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        MyLinksError::database_operation("x").http_status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn from_impls_tag_the_right_variant() {
    let err: MyLinksError = serde_json::from_str::<i32>("not json").unwrap_err().into();
    assert!(matches!(err, MyLinksError::Serialization(_)));

    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
    let err: MyLinksError = io.into();
    assert!(matches!(err, MyLinksError::DatabaseOperation(_)));
}

#[test]
fn colored_format_contains_code_and_message() {
    let err = MyLinksError::validation("bad icon size");
    let formatted = err.format_colored();
    assert!(formatted.contains("E004"));
    assert!(formatted.contains("bad icon size"));
}
