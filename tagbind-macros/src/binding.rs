use crate::attrs::{ContainerAttrs, FieldAttrs};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

pub fn derive_binding_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Binding cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Binding can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Binding can only be derived for structs",
            ));
        }
    };

    let container = ContainerAttrs::from_attrs(&input.attrs)?;

    let mut steps = Vec::new();

    for field in fields {
        let attrs = FieldAttrs::from_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;

        if attrs.embed.is_some() {
            steps.push(quote! {
                .embed::<#ty, _>(|target: &mut Self| &mut target.#ident)
            });
            continue;
        }

        let reported = match attrs.name {
            Some(name) => name.to_lowercase(),
            None => {
                let raw = ident.to_string();
                raw.strip_prefix("r#").map(str::to_string).unwrap_or(raw)
            }
        };
        // Without a directive the field only matters if it holds bound
        // structs; other types need not implement `Field`.
        let Some(directive) = attrs.directive.map(|lit| lit.value()) else {
            steps.push(quote! {
                .nested(#reported, |target: &mut Self| {
                    #[allow(unused_imports)]
                    use ::tagbind_validation::__private::{NestedField as _, NestedOpaque as _};
                    ::tagbind_validation::__private::Nested(&mut target.#ident).nested_nodes()
                })
            });
            continue;
        };

        steps.push(quote! {
            .field(#reported, #directive, |target: &mut Self| {
                ::tagbind_validation::as_field(&mut target.#ident)
            })
        });
    }

    if container.validator {
        steps.push(quote! { .validator() });
    }

    Ok(quote! {
        impl ::tagbind_validation::Binding for #name {
            fn schema() -> ::tagbind_validation::Schema<Self> {
                ::tagbind_validation::Schema::builder()
                    #(#steps)*
                    .build()
            }
        }

        // A struct value is never zero: `Required` on it is satisfied, and
        // its own fields report what is missing.
        impl ::tagbind_validation::Field for #name {
            fn value(&self) -> ::tagbind_validation::Value<'_> {
                ::tagbind_validation::Value::Struct
            }

            fn nodes(&mut self) -> ::std::vec::Vec<&mut dyn ::tagbind_validation::Node> {
                ::std::vec![self as &mut dyn ::tagbind_validation::Node]
            }
        }
    })
}
