//! Integration tests for common tagbind workflows.
//!
//! These go through the facade crate the way a handler would.

use serde::Deserialize;
use tagbind::prelude::*;
use tagbind::{
    ERR_CONTENT_TYPE, ERR_DESERIALIZATION, ERR_PAYLOAD_TOO_LARGE, ERR_REQUIRED, HttpStatus,
};

#[derive(Debug, Deserialize, Binding)]
#[binding(validator)]
struct CreateUser {
    #[serde(default)]
    #[binding("Required;AlphaDash;MaxSize(20)")]
    username: String,
    #[serde(default)]
    #[binding("Required;Email")]
    email: String,
    #[serde(default)]
    #[binding("Default(member);In(member,admin)")]
    role: String,
    #[serde(default)]
    #[binding("Range(13,130)")]
    age: u32,
    #[serde(default)]
    profile: Option<Profile>,
}

#[derive(Debug, Deserialize, Binding)]
struct Profile {
    #[serde(rename = "homePage")]
    #[binding("Required;Url")]
    home_page: String,
}

impl Validator for CreateUser {
    fn validate(&self, _req: &HttpRequest) -> Errors {
        let mut errors = Errors::new();
        if self.role == "admin" && !self.email.ends_with("@example.com") {
            errors.add(["role", "email"], "RoleError", "Admins need a company address");
        }
        errors
    }
}

fn json_request(body: &str) -> HttpRequest {
    HttpRequest::new("POST", "/users")
        .with_header("Content-Type", "application/json; charset=utf-8")
        .with_body(body.as_bytes().to_vec())
}

// =============================================================================
// Binding Tests
// =============================================================================

#[test]
fn test_bind_valid_body_applies_defaults() {
    let pipe = BindingPipe::default();
    let user: CreateUser = pipe
        .bind_json(&json_request(r#"{"username": "ada_l", "email": "ada@example.com"}"#))
        .unwrap();

    assert_eq!(user.username, "ada_l");
    assert_eq!(user.role, "member");
    assert_eq!(user.age, 0);
    assert!(user.profile.is_none());
}

#[test]
fn test_bind_reports_rule_failures_in_order() {
    let pipe = BindingPipe::default();
    let errors = pipe
        .bind_json::<CreateUser>(&json_request(
            r#"{"username": "ada lovelace", "email": "", "role": "root", "age": 7}"#,
        ))
        .unwrap_err();

    let kinds: Vec<(&str, &str)> = errors
        .iter()
        .map(|e| (e.fields()[0].as_str(), e.kind()))
        .collect();
    assert_eq!(
        kinds,
        [
            ("username", "AlphaDash"),
            ("email", ERR_REQUIRED),
            ("role", "In"),
            ("age", "Range"),
        ]
    );
}

#[test]
fn test_nested_struct_uses_serde_name() {
    let pipe = BindingPipe::default();
    let errors = pipe
        .bind_json::<CreateUser>(&json_request(
            r#"{"username": "ada", "email": "ada@example.com", "profile": {"homePage": "not a url"}}"#,
        ))
        .unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors.iter().next().unwrap().fields(), ["homepage"]);
}

#[test]
fn test_custom_validator_runs_after_fields() {
    let pipe = BindingPipe::default();
    let errors = pipe
        .bind_json::<CreateUser>(&json_request(
            r#"{"username": "", "email": "ada@analytical.engine", "role": "admin"}"#,
        ))
        .unwrap_err();

    let last = errors.iter().last().unwrap();
    assert_eq!(errors.iter().next().unwrap().kind(), ERR_REQUIRED);
    assert_eq!(last.kind(), "RoleError");
    assert_eq!(last.fields(), ["role", "email"]);
}

// =============================================================================
// Error Response Tests
// =============================================================================

#[test]
fn test_error_response_for_rule_failures() {
    let pipe = BindingPipe::default();
    let errors = pipe
        .bind_json::<CreateUser>(&json_request(r#"{"username": "ada"}"#))
        .unwrap_err();

    let response = pipe.error_response(&errors);
    assert_eq!(response.status, HttpStatus::UnprocessableEntity.code());
    assert_eq!(
        response.headers.get("Content-Type"),
        Some(&"application/json".to_string())
    );

    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!([
            {"fieldNames": ["email"], "classification": "Required", "message": "Required"}
        ])
    );
}

#[test]
fn test_wrong_content_type() {
    let pipe = BindingPipe::default();
    let req = HttpRequest::new("POST", "/users")
        .with_header("Content-Type", "text/plain")
        .with_body(b"username=ada".to_vec());

    let errors = pipe.bind_json::<CreateUser>(&req).unwrap_err();
    assert!(errors.has(ERR_CONTENT_TYPE));
    assert_eq!(pipe.error_response(&errors).status, 415);
}

#[test]
fn test_malformed_json() {
    let pipe = BindingPipe::default();
    let errors = pipe
        .bind_json::<CreateUser>(&json_request("{\"username\": "))
        .unwrap_err();

    assert!(errors.has(ERR_DESERIALIZATION));
    assert_eq!(pipe.status_for(&errors), 400);
    assert!(matches!(
        BindingPipe::into_error(&errors),
        tagbind::Error::Deserialization(_)
    ));
}

#[test]
fn test_custom_config() {
    let config = BindingConfig::default()
        .error_status(400)
        .require_json_content_type(false);
    let pipe = BindingPipe::new(config);

    let req = HttpRequest::new("POST", "/users").with_body(br#"{"username": "ada"}"#.to_vec());
    let errors = pipe.bind_json::<CreateUser>(&req).unwrap_err();
    assert!(errors.has(ERR_REQUIRED));
    assert!(!errors.has(ERR_DESERIALIZATION));
    assert_eq!(pipe.error_response(&errors).status, 400);
}

#[test]
fn test_missing_key_without_serde_default_is_a_decode_error() {
    #[derive(Debug, Deserialize, Binding)]
    struct Strict {
        #[binding("Required")]
        token: String,
    }

    let pipe = BindingPipe::default();
    let errors = pipe.bind_json::<Strict>(&json_request("{}")).unwrap_err();
    assert!(errors.has(ERR_DESERIALIZATION));
    assert_eq!(pipe.status_for(&errors), 400);
}

#[test]
fn test_oversized_body() {
    let pipe = BindingPipe::new(BindingConfig::default().max_body_bytes(4));
    let errors = pipe
        .bind_json::<CreateUser>(&json_request(r#"{"username": "a"}"#))
        .unwrap_err();

    assert!(errors.has(ERR_PAYLOAD_TOO_LARGE));
    assert_eq!(pipe.error_response(&errors).status, 413);
    assert!(matches!(
        BindingPipe::into_error(&errors),
        tagbind::Error::PayloadTooLarge(_)
    ));
}

// =============================================================================
// Direct Validation Tests
// =============================================================================

#[test]
fn test_validate_collection_without_pipe() {
    let mut profiles = vec![
        Profile {
            home_page: "https://example.com".to_string(),
        },
        Profile {
            home_page: String::new(),
        },
    ];

    let errors = validate(&HttpRequest::new("PUT", "/profiles"), &mut profiles);
    assert_eq!(errors.len(), 1);
    assert!(errors.iter().all(ValidationError::is_required));
    assert_eq!(errors.to_string().trim_end(), "homepage: Required");
}
