// Validation errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a missing value.
pub const ERR_REQUIRED: &str = "Required";
pub const ERR_ALPHA_DASH: &str = "AlphaDash";
pub const ERR_ALPHA_DASH_DOT: &str = "AlphaDashDot";
pub const ERR_SIZE: &str = "Size";
pub const ERR_MIN_SIZE: &str = "MinSize";
pub const ERR_MAX_SIZE: &str = "MaxSize";
pub const ERR_RANGE: &str = "Range";
pub const ERR_IN: &str = "In";
pub const ERR_NOT_IN: &str = "NotIn";
pub const ERR_INCLUDE: &str = "Include";
pub const ERR_EXCLUDE: &str = "Exclude";
pub const ERR_EMAIL: &str = "Email";
pub const ERR_URL: &str = "Url";
/// A `Default` value that cannot be stored in the field's type.
pub const ERR_DEFAULT: &str = "Default";

/// Request body was not of the expected media type.
pub const ERR_CONTENT_TYPE: &str = "ContentTypeError";
/// Request body could not be decoded into the target type.
pub const ERR_DESERIALIZATION: &str = "DeserializationError";
/// Request body larger than the configured limit.
pub const ERR_PAYLOAD_TOO_LARGE: &str = "PayloadTooLargeError";

/// One validation failure, reported against one or more fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    field_names: Vec<String>,
    classification: String,
    message: String,
}

impl ValidationError {
    pub fn new<I, S>(
        field_names: I,
        classification: impl Into<String>,
        message: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_names: field_names.into_iter().map(Into::into).collect(),
            classification: classification.into(),
            message: message.into(),
        }
    }

    /// Names of the offending fields, in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.field_names
    }

    /// The classification, e.g. [`ERR_REQUIRED`] or a rule name.
    pub fn kind(&self) -> &str {
        &self.classification
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_required(&self) -> bool {
        self.classification == ERR_REQUIRED
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_names.join(","), self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Ordered collection of validation errors.
///
/// Order is the order in which fields were visited and rules declared; the
/// collection is never sorted or deduplicated. An empty collection means the
/// value passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Errors(Vec<ValidationError>);

impl Errors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Collection holding exactly one error.
    pub fn single<I, S>(
        field_names: I,
        classification: impl Into<String>,
        message: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut errors = Self::new();
        errors.add(field_names, classification, message);
        errors
    }

    /// Append an error built from its parts.
    pub fn add<I, S>(
        &mut self,
        field_names: I,
        classification: impl Into<String>,
        message: impl Into<String>,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .push(ValidationError::new(field_names, classification, message));
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any error carries the given classification.
    pub fn has(&self, classification: &str) -> bool {
        self.0.iter().any(|e| e.classification == classification)
    }

    /// Errors that name the given field.
    pub fn for_field(&self, field: &str) -> Vec<&ValidationError> {
        self.0
            .iter()
            .filter(|e| e.field_names.iter().any(|name| name == field))
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }

    /// JSON array of `{fieldNames, classification, message}` objects.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.0 {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}

impl From<Vec<ValidationError>> for Errors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl From<ValidationError> for Errors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl Extend<ValidationError> for Errors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Errors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut errors = Errors::new();
        errors.add(["title"], ERR_REQUIRED, "Required");
        errors.add(["title"], "LengthError", "Life is too short");
        errors.add(["id"], ERR_REQUIRED, "Required");

        let kinds: Vec<&str> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, ["Required", "LengthError", "Required"]);
        assert_eq!(errors.len(), 3);
        assert!(errors.has("LengthError"));
        assert!(!errors.has(ERR_EMAIL));
        assert_eq!(errors.for_field("title").len(), 2);
    }

    #[test]
    fn test_multi_field_error() {
        let error = ValidationError::new(["password", "confirm"], "Mismatch", "Mismatch");
        assert_eq!(error.fields(), ["password", "confirm"]);
        assert_eq!(error.to_string(), "password,confirm: Mismatch");
        assert!(!error.is_required());
    }

    #[test]
    fn test_serialized_shape() {
        let errors = Errors::single(["id"], ERR_REQUIRED, "Required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"fieldNames": ["id"], "classification": "Required", "message": "Required"}
            ])
        );
        assert_eq!(json, errors.to_json());

        let back: Errors = serde_json::from_value(json).unwrap();
        assert_eq!(back, errors);
    }

    #[test]
    fn test_empty_errors_equal_default() {
        assert_eq!(Errors::new(), Errors::default());
        assert!(Errors::new().is_empty());
        assert_eq!(Errors::new().to_json(), serde_json::json!([]));
    }

    #[test]
    fn test_to_json_keeps_order_and_multi_field_names() {
        let mut errors = Errors::new();
        errors.add(["password", "confirm"], "Mismatch", "Passwords differ");
        errors.add(["email"], ERR_EMAIL, "Email");
        assert_eq!(
            errors.to_json(),
            serde_json::json!([
                {"fieldNames": ["password", "confirm"], "classification": "Mismatch", "message": "Passwords differ"},
                {"fieldNames": ["email"], "classification": "Email", "message": "Email"}
            ])
        );
    }
}
