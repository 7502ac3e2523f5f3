//! # resgen derive
//!
//! Procedural macros for types generated by resgen.
//!
//! `#[derive(XmlElement)]` implements the XML encoding traits from
//! `resgen_core::xml` for structs with named fields.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, LitStr, parse_macro_input};

/// Derives `XmlElement` and `XmlValue` for a struct.
///
/// Each field is written as a child element named after the field, unless
/// renamed.
///
/// # Example
/// ```ignore
/// #[derive(XmlElement)]
/// struct Coding {
///     #[xml(rename = "system", omit_empty)]
///     system: Option<String>,
///     #[xml(skip)]
///     cache: String,
/// }
/// ```
#[proc_macro_derive(XmlElement, attributes(xml))]
pub fn derive_xml_element(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Parsed `#[xml(...)]` options for one field.
#[derive(Default)]
struct FieldOptions {
    rename: Option<String>,
    omit_empty: bool,
    skip: bool,
}

impl FieldOptions {
    fn from_field(field: &Field) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("xml")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    options.rename = Some(name.value());
                    Ok(())
                } else if meta.path.is_ident("omit_empty") {
                    options.omit_empty = true;
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    options.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported xml attribute, expected `rename`, `omit_empty` or `skip`"))
                }
            })?;
        }
        Ok(options)
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "XmlElement can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "XmlElement can only be derived for structs",
            ));
        }
    };

    let mut writes = Vec::with_capacity(fields.len());
    for field in fields {
        let options = FieldOptions::from_field(field)?;
        if options.skip {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let wire = options
            .rename
            .unwrap_or_else(|| ident.unraw().to_string());

        let write = quote! {
            ::resgen_core::xml::XmlValue::write_xml(&self.#ident, #wire, writer)?;
        };
        writes.push(if options.omit_empty {
            quote! {
                if !::resgen_core::xml::XmlValue::is_xml_empty(&self.#ident) {
                    #write
                }
            }
        } else {
            write
        });
    }

    if writes.is_empty() {
        writes.push(quote! { let _ = writer; });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::resgen_core::xml::XmlElement for #name #ty_generics #where_clause {
            fn write_children(
                &self,
                writer: &mut ::resgen_core::xml::XmlWriter,
            ) -> ::core::result::Result<(), ::resgen_core::xml::XmlError> {
                #(#writes)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::resgen_core::xml::XmlValue for #name #ty_generics #where_clause {
            fn write_xml(
                &self,
                name: &str,
                writer: &mut ::resgen_core::xml::XmlWriter,
            ) -> ::core::result::Result<(), ::resgen_core::xml::XmlError> {
                writer.start(name)?;
                ::resgen_core::xml::XmlElement::write_children(self, writer)?;
                writer.end(name)
            }
        }
    })
}
