// Depth-first traversal of a bound value

use crate::schema::Access;
use crate::{Binding, Errors, Field, schema_for};
use tagbind_core::HttpRequest;
use tracing::debug;

/// Validate `data` against its directives and custom validators.
///
/// `data` is a `#[derive(Binding)]` struct, or any sequence/option/box of
/// them; sequences are validated element by element in index order. Never
/// fails: every problem is reported in the returned [`Errors`], which is
/// empty when the value is valid. Fields carrying a `Default` rule may be
/// assigned in place.
pub fn validate<D>(req: &HttpRequest, data: &mut D) -> Errors
where
    D: Field + ?Sized,
{
    let mut errors = Errors::new();
    for node in data.nodes() {
        node.walk(req, &mut errors);
    }

    if !errors.is_empty() {
        debug!(
            method = %req.method,
            path = %req.path,
            errors = errors.len(),
            "request data failed validation"
        );
    }
    errors
}

/// Walk one struct: each field's rules, then its nested structs, in
/// declaration order; custom hooks last.
pub(crate) fn walk_struct<T: Binding>(target: &mut T, req: &HttpRequest, errors: &mut Errors) {
    let schema = schema_for::<T>();

    for spec in schema.fields() {
        match spec.access() {
            Access::Field(get) => {
                let field = get(target);
                for rule in spec.rules() {
                    rule.apply(&mut *field, spec.name(), errors);
                }
                for node in field.nodes() {
                    node.walk(req, errors);
                }
            }
            Access::Nodes(get) => {
                for node in get(target) {
                    node.walk(req, errors);
                }
            }
        }
    }

    schema.run_hooks(target, req, errors);
}
