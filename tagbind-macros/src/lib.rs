//! Derive macro for tagbind.
//!
//! `#[derive(Binding)]` reads `#[binding(...)]` attributes and generates the
//! `Binding` (schema) and `Field` impls the validation walker needs.
//!
//! ```ignore
//! #[derive(Binding)]
//! #[binding(validator)]
//! struct BlogPost {
//!     #[binding("Required", name = "id")]
//!     id: i64,
//!     #[binding(embed)]
//!     post: Post,
//!     #[binding("Required")]
//!     author: Person,
//!     coauthor: Option<Person>,
//!     #[binding(skip)]
//!     received_at: std::time::Instant,
//! }
//! ```
//!
//! Field attributes:
//! - `"Rule;Rule(p)"` (or `rules = "..."`) - the directive for the field
//! - `name = "..."` - name reported in errors (lower-cased); a
//!   `#[serde(rename = "...")]` is used when absent
//! - `embed` - inline the nested struct's fields into this one
//! - `skip` - leave the field out entirely
//!
//! Container attributes:
//! - `validator` - run the type's `Validator` impl after the built-in rules

use proc_macro::TokenStream;

mod attrs;
mod binding;

#[proc_macro_derive(Binding, attributes(binding))]
pub fn derive_binding(input: TokenStream) -> TokenStream {
    binding::derive_binding_impl(input)
}
