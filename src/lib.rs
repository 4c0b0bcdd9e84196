// tagbind - attribute-driven request validation
//
// Structs describe their validation rules with `#[binding("...")]` field
// attributes; handlers call `validate` (or the `BindingPipe`) and get back an
// ordered list of errors to render.

// Re-export core functionality
pub use tagbind_core::*;

pub use tagbind_validation::{
    BindingConfig, BindingPipe, Binding, Errors, Field, Node, Rule, RuleKind, Schema,
    SchemaBuilder, ValidationError, Validator, Value, as_field, schema_for, validate,
};

pub use tagbind_validation::{
    ERR_ALPHA_DASH, ERR_ALPHA_DASH_DOT, ERR_CONTENT_TYPE, ERR_DEFAULT, ERR_DESERIALIZATION,
    ERR_EMAIL, ERR_EXCLUDE, ERR_IN, ERR_INCLUDE, ERR_MAX_SIZE, ERR_MIN_SIZE, ERR_NOT_IN,
    ERR_PAYLOAD_TOO_LARGE, ERR_RANGE, ERR_REQUIRED, ERR_SIZE, ERR_URL,
};

pub use tagbind_validation;

// Re-export the derive macro under the trait's name
#[cfg(feature = "derive")]
pub use tagbind_macros::Binding;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Binding, BindingConfig, BindingPipe, Errors, HttpRequest, HttpResponse, ValidationError,
        Validator, validate,
    };
}
