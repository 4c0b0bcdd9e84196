use syn::meta::ParseNestedMeta;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, Ident, LitStr, Token};

/// One entry inside `#[binding(...)]`.
enum Arg {
    Directive(LitStr),
    Name(LitStr),
    Flag(Ident),
}

impl Parse for Arg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            return Ok(Arg::Directive(input.parse()?));
        }

        let key: Ident = input.parse()?;
        if !input.peek(Token![=]) {
            return Ok(Arg::Flag(key));
        }
        input.parse::<Token![=]>()?;
        let value: LitStr = input.parse()?;

        if key == "name" {
            Ok(Arg::Name(value))
        } else if key == "rules" {
            Ok(Arg::Directive(value))
        } else {
            Err(syn::Error::new(
                key.span(),
                format!("unknown binding key `{}`", key),
            ))
        }
    }
}

fn binding_args(attrs: &[Attribute]) -> syn::Result<Vec<Arg>> {
    let mut args = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("binding")) {
        let parsed = attr.parse_args_with(Punctuated::<Arg, Token![,]>::parse_terminated)?;
        args.extend(parsed);
    }
    Ok(args)
}

#[derive(Default)]
pub struct FieldAttrs {
    pub directive: Option<LitStr>,
    pub name: Option<String>,
    pub embed: Option<Ident>,
    pub skip: bool,
}

impl FieldAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = FieldAttrs::default();

        for arg in binding_args(attrs)? {
            match arg {
                Arg::Directive(lit) => {
                    if out.directive.is_some() {
                        return Err(syn::Error::new(lit.span(), "duplicate directive"));
                    }
                    out.directive = Some(lit);
                }
                Arg::Name(lit) => out.name = Some(lit.value()),
                Arg::Flag(flag) if flag == "embed" => out.embed = Some(flag),
                Arg::Flag(flag) if flag == "skip" => out.skip = true,
                Arg::Flag(flag) => {
                    return Err(syn::Error::new(
                        flag.span(),
                        format!("unknown binding field option `{}`", flag),
                    ));
                }
            }
        }

        if out.name.is_none() {
            out.name = serde_rename(attrs)?;
        }

        if let (Some(flag), Some(_)) = (&out.embed, &out.directive) {
            return Err(syn::Error::new(
                flag.span(),
                "embedded fields cannot carry a directive",
            ));
        }
        Ok(out)
    }
}

#[derive(Default)]
pub struct ContainerAttrs {
    pub validator: bool,
}

impl ContainerAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = ContainerAttrs::default();
        for arg in binding_args(attrs)? {
            match arg {
                Arg::Flag(flag) if flag == "validator" => out.validator = true,
                Arg::Flag(flag) => {
                    return Err(syn::Error::new(
                        flag.span(),
                        format!("unknown binding container option `{}`", flag),
                    ));
                }
                Arg::Directive(lit) | Arg::Name(lit) => {
                    return Err(syn::Error::new(
                        lit.span(),
                        "directives belong on fields, not on the struct",
                    ));
                }
            }
        }
        Ok(out)
    }
}

/// `#[serde(rename = "...")]`, if present.
fn serde_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                let value: LitStr = meta.value()?.parse()?;
                rename = Some(value.value());
                Ok(())
            } else {
                skip_meta(&meta)
            }
        })?;
    }
    Ok(rename)
}

fn skip_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_meta(&inner))?;
    }
    Ok(())
}
