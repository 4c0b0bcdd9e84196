//! Per-type validation schemas.
//!
//! A [`Schema`] lists a struct's fields in declaration order, each with its
//! reported name, its compiled rules and an accessor, followed by the custom
//! hooks to run once the fields are done. Embedded structs are inlined here,
//! at construction time, so the walker never special-cases them.
//!
//! Schemas are built on first use and shared afterwards:
//!
//! ```
//! use tagbind_validation::{as_field, schema_for, Binding, Field, Node, Schema, Value};
//!
//! struct Login {
//!     user: String,
//! }
//!
//! impl Field for Login {
//!     fn value(&self) -> Value<'_> {
//!         Value::Struct
//!     }
//!
//!     fn nodes(&mut self) -> Vec<&mut dyn Node> {
//!         vec![self as &mut dyn Node]
//!     }
//! }
//!
//! impl Binding for Login {
//!     fn schema() -> Schema<Self> {
//!         Schema::builder()
//!             .field("user", "Required;AlphaDash", |l: &mut Self| as_field(&mut l.user))
//!             .build()
//!     }
//! }
//!
//! let schema = schema_for::<Login>();
//! assert_eq!(schema.fields()[0].name(), "user");
//! assert_eq!(schema.fields()[0].rules().len(), 2);
//! ```

use crate::directive;
use crate::rules::Rule;
use crate::{Binding, Errors, Field, Node, Validator};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tagbind_core::HttpRequest;
use tracing::trace;

type Accessor<T> = Arc<dyn for<'a> Fn(&'a mut T) -> &'a mut (dyn Field + 'a) + Send + Sync>;

type NodesAccessor<T> = Arc<dyn for<'a> Fn(&'a mut T) -> Vec<&'a mut dyn Node> + Send + Sync>;

type Hook<T> = Arc<dyn Fn(&mut T, &HttpRequest) -> Errors + Send + Sync>;

static SCHEMAS: Lazy<RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// How a [`FieldSpec`] reaches its field.
pub(crate) enum Access<T> {
    /// A field with rules; its nested structs are walked afterwards.
    Field(Accessor<T>),
    /// A field without a directive: only its nested structs, if any.
    Nodes(NodesAccessor<T>),
}

impl<T> Clone for Access<T> {
    fn clone(&self) -> Self {
        match self {
            Access::Field(get) => Access::Field(Arc::clone(get)),
            Access::Nodes(get) => Access::Nodes(Arc::clone(get)),
        }
    }
}

/// One validated field of `T`.
pub struct FieldSpec<T> {
    name: String,
    rules: Vec<Rule>,
    access: Access<T>,
}

impl<T> FieldSpec<T> {
    /// Name reported in errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The field itself, or `None` for a field registered with
    /// [`SchemaBuilder::nested`].
    pub fn get<'a>(&self, target: &'a mut T) -> Option<&'a mut dyn Field> {
        match &self.access {
            Access::Field(get) => Some(get(target)),
            Access::Nodes(_) => None,
        }
    }

    pub(crate) fn access(&self) -> &Access<T> {
        &self.access
    }
}

impl<T> Clone for FieldSpec<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            rules: self.rules.clone(),
            access: self.access.clone(),
        }
    }
}

/// Validation description of a struct type.
pub struct Schema<T> {
    fields: Vec<FieldSpec<T>>,
    hooks: Vec<Hook<T>>,
}

impl<T: 'static> Schema<T> {
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder {
            fields: Vec::new(),
            hooks: Vec::new(),
        }
    }

    pub fn fields(&self) -> &[FieldSpec<T>] {
        &self.fields
    }

    /// Run the custom hooks in registration order.
    pub fn run_hooks(&self, target: &mut T, req: &HttpRequest, errors: &mut Errors) {
        for hook in &self.hooks {
            errors.extend(hook(target, req));
        }
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }
}

/// Builder for [`Schema`].
pub struct SchemaBuilder<T> {
    fields: Vec<FieldSpec<T>>,
    hooks: Vec<Hook<T>>,
}

impl<T: 'static> SchemaBuilder<T> {
    /// Add a field with its directive. The directive is parsed here, once.
    pub fn field<F>(mut self, name: impl Into<String>, directive: &str, access: F) -> Self
    where
        F: for<'a> Fn(&'a mut T) -> &'a mut (dyn Field + 'a) + Send + Sync + 'static,
    {
        let rules = directive::parse(directive)
            .into_iter()
            .filter_map(Rule::compile)
            .collect();
        self.fields.push(FieldSpec {
            name: name.into(),
            rules,
            access: Access::Field(Arc::new(access)),
        });
        self
    }

    /// Add a field without rules. The walker only descends into the nested
    /// structs `access` returns.
    pub fn nested<F>(mut self, name: impl Into<String>, access: F) -> Self
    where
        F: for<'a> Fn(&'a mut T) -> Vec<&'a mut dyn Node> + Send + Sync + 'static,
    {
        self.fields.push(FieldSpec {
            name: name.into(),
            rules: Vec::new(),
            access: Access::Nodes(Arc::new(access)),
        });
        self
    }

    /// Inline the fields and hooks of an embedded struct, as if they were
    /// declared on `T` at this position.
    pub fn embed<U, F>(mut self, access: F) -> Self
    where
        U: Binding,
        F: for<'a> Fn(&'a mut T) -> &'a mut U + Send + Sync + 'static,
    {
        let outer = Arc::new(access);
        let inner = schema_for::<U>();

        for spec in inner.fields() {
            let outer = Arc::clone(&outer);
            let access = match &spec.access {
                Access::Field(get) => {
                    let get = Arc::clone(get);
                    Access::Field(accessor(move |target: &mut T| get(outer(target))))
                }
                Access::Nodes(get) => {
                    let get = Arc::clone(get);
                    Access::Nodes(nodes_accessor(move |target: &mut T| get(outer(target))))
                }
            };
            self.fields.push(FieldSpec {
                name: spec.name.clone(),
                rules: spec.rules.clone(),
                access,
            });
        }
        for hook in &inner.hooks {
            let outer = Arc::clone(&outer);
            let hook = Arc::clone(hook);
            self.hooks.push(Arc::new(move |target: &mut T, req: &HttpRequest| {
                hook(outer(target), req)
            }));
        }
        self
    }

    /// Add a custom hook.
    pub fn hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&T, &HttpRequest) -> Errors + Send + Sync + 'static,
    {
        self.hooks
            .push(Arc::new(move |target: &mut T, req: &HttpRequest| {
                hook(target, req)
            }));
        self
    }

    /// Register `T`'s own [`Validator`] implementation as a hook.
    pub fn validator(self) -> Self
    where
        T: Validator,
    {
        self.hook(|target: &T, req: &HttpRequest| target.validate(req))
    }

    pub fn build(self) -> Schema<T> {
        Schema {
            fields: self.fields,
            hooks: self.hooks,
        }
    }
}

fn accessor<T, F>(access: F) -> Accessor<T>
where
    F: for<'a> Fn(&'a mut T) -> &'a mut (dyn Field + 'a) + Send + Sync + 'static,
{
    Arc::new(access)
}

fn nodes_accessor<T, F>(access: F) -> NodesAccessor<T>
where
    F: for<'a> Fn(&'a mut T) -> Vec<&'a mut dyn Node> + Send + Sync + 'static,
{
    Arc::new(access)
}

/// Cached schema for `T`, built on first request.
pub fn schema_for<T: Binding>() -> Arc<Schema<T>> {
    let id = TypeId::of::<T>();

    let cached = SCHEMAS.read().get(&id).cloned();
    if let Some(schema) = cached.and_then(|s| s.downcast::<Schema<T>>().ok()) {
        return schema;
    }

    // Built without holding the lock: embedding asks for other schemas.
    let built = Arc::new(T::schema());
    trace!(
        type_name = std::any::type_name::<T>(),
        fields = built.fields.len(),
        hooks = built.hooks.len(),
        "built validation schema"
    );

    let shared = SCHEMAS
        .write()
        .entry(id)
        .or_insert_with(|| built.clone() as Arc<dyn Any + Send + Sync>)
        .clone();
    shared.downcast::<Schema<T>>().unwrap_or(built)
}
