//! Directive-driven validation for request data.
//!
//! Each struct field carries a directive such as `Required;MinSize(5)`. The
//! directives are parsed once per type into a cached [`Schema`]; [`validate`]
//! then walks a value (or a sequence of values) depth-first, runs the rules
//! of every field, descends into nested structs and finally calls any custom
//! [`Validator`] hooks. The outcome is an ordered [`Errors`] list, empty when
//! everything passed.
//!
//! # Examples
//!
//! ```
//! use tagbind_core::HttpRequest;
//! use tagbind_validation::{as_field, validate, Binding, Field, Node, Schema, Value};
//!
//! #[derive(Default)]
//! struct Comment {
//!     author: String,
//!     body: String,
//! }
//!
//! impl Field for Comment {
//!     fn value(&self) -> Value<'_> {
//!         Value::Struct
//!     }
//!
//!     fn nodes(&mut self) -> Vec<&mut dyn Node> {
//!         vec![self as &mut dyn Node]
//!     }
//! }
//!
//! impl Binding for Comment {
//!     fn schema() -> Schema<Self> {
//!         Schema::builder()
//!             .field("author", "Required;AlphaDash", |c: &mut Self| as_field(&mut c.author))
//!             .field("body", "Required;MaxSize(280)", |c: &mut Self| as_field(&mut c.body))
//!             .build()
//!     }
//! }
//!
//! let req = HttpRequest::new("POST", "/comments");
//! let mut comment = Comment { author: "jo-doe".into(), ..Default::default() };
//!
//! let errors = validate(&req, &mut comment);
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.iter().next().unwrap().fields(), ["body"]);
//! ```
//!
//! With the `tagbind` facade the `Field` and `Binding` impls come from
//! `#[derive(Binding)]` instead.

// Lets code generated by `#[derive(Binding)]` name this crate from inside it.
extern crate self as tagbind_validation;

pub mod directive;
mod config;
mod errors;
mod field;
mod nested;
mod pipe;
mod rules;
mod schema;
mod traits;
mod walker;

pub use config::*;
pub use directive::RuleInvocation;
pub use errors::*;
pub use field::*;
pub use pipe::*;
pub use rules::*;
pub use schema::*;
pub use traits::*;
pub use walker::validate;

#[doc(hidden)]
pub mod __private {
    pub use crate::nested::{Nested, NestedField, NestedOpaque};
}
