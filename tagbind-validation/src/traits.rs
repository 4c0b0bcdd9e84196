// Validation traits

use crate::{Errors, Field, Schema};
use tagbind_core::HttpRequest;

/// A struct whose fields carry validation directives.
///
/// Usually derived with `#[derive(Binding)]`; the schema is built once per
/// type and cached, see [`crate::schema_for`].
pub trait Binding: Field + Sized + 'static {
    fn schema() -> Schema<Self>;
}

/// Custom validation on top of the built-in rules.
///
/// Register it on a type's schema with [`crate::SchemaBuilder::validator`]
/// (or `#[binding(validator)]` when deriving). The hook runs after the
/// built-in rules of the value it belongs to.
pub trait Validator {
    fn validate(&self, req: &HttpRequest) -> Errors;
}

/// A struct value the walker can descend into.
pub trait Node {
    fn walk(&mut self, req: &HttpRequest, errors: &mut Errors);
}

impl<T: Binding> Node for T {
    fn walk(&mut self, req: &HttpRequest, errors: &mut Errors) {
        crate::walker::walk_struct(self, req, errors);
    }
}
