// Descent into fields declared without a directive

use crate::{Field, Node};

/// A field the derive found without a directive.
///
/// Calling `nested_nodes()` with both traits in scope picks [`NestedField`]
/// when the field type implements [`Field`] and [`NestedOpaque`] otherwise,
/// so maps, enums and foreign types can sit in a bound struct untouched.
#[doc(hidden)]
pub struct Nested<'a, F: ?Sized>(pub &'a mut F);

#[doc(hidden)]
pub trait NestedField<'a> {
    fn nested_nodes(self) -> Vec<&'a mut dyn Node>;
}

impl<'a, F: Field + ?Sized> NestedField<'a> for Nested<'a, F> {
    fn nested_nodes(self) -> Vec<&'a mut dyn Node> {
        let Nested(field) = self;
        field.nodes()
    }
}

#[doc(hidden)]
pub trait NestedOpaque<'a> {
    fn nested_nodes(self) -> Vec<&'a mut dyn Node>;
}

impl<'a, F: ?Sized> NestedOpaque<'a> for &Nested<'a, F> {
    fn nested_nodes(self) -> Vec<&'a mut dyn Node> {
        Vec::new()
    }
}
