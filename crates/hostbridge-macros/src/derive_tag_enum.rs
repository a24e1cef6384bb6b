//! Implementation of the `#[derive(TagEnum)]` macro.

use std::collections::HashMap;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, parse_macro_input};

use crate::attrs::{EnumAttrs, VariantAttrs};

pub fn derive_tag_enum_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_tag_enum_inner(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_tag_enum_inner(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attrs = EnumAttrs::from_attrs(&input.attrs)?;

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "TagEnum can only be derived for enums",
        ));
    };
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "TagEnum cannot be derived for generic enums",
        ));
    }

    let enum_name = attrs.name.unwrap_or_else(|| name.to_string());
    let krate = match attrs.krate {
        Some(path) => quote! { #path },
        None => quote! { ::hostbridge_core },
    };

    let entries = collect_tags(data)?;
    let variants: Vec<&Ident> = entries.iter().map(|(ident, _)| *ident).collect();
    let tags: Vec<&str> = entries.iter().map(|(_, tag)| tag.as_str()).collect();

    Ok(quote! {
        impl #krate::TagEnum for #name {
            const ENUM_NAME: &'static str = #enum_name;
            const TAGS: &'static [(&'static str, Self)] = &[
                #( (#tags, #name::#variants) ),*
            ];

            fn to_tag(self) -> &'static str {
                match self {
                    #( #name::#variants => #tags, )*
                }
            }
        }

        impl #krate::FromDynamic for #name {
            fn from_dynamic(
                value: &#krate::Dynamic,
            ) -> ::core::result::Result<Self, #krate::ConversionError> {
                #krate::enum_from_dynamic(value)
            }
        }

        impl #krate::IntoDynamic for #name {
            fn into_dynamic(self) -> #krate::Dynamic {
                #krate::enum_into_dynamic(self)
            }
        }
    })
}

/// Collect `(variant, tag)` pairs in declaration order, rejecting data-carrying
/// variants and duplicate tags.
fn collect_tags(data: &syn::DataEnum) -> syn::Result<Vec<(&Ident, String)>> {
    let mut entries = Vec::with_capacity(data.variants.len());
    let mut seen: HashMap<String, &Ident> = HashMap::new();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "TagEnum variants cannot carry data",
            ));
        }

        let variant_attrs = VariantAttrs::from_attrs(&variant.attrs)?;
        let tag = variant_attrs
            .tag
            .unwrap_or_else(|| variant.ident.to_string());

        if let Some(previous) = seen.insert(tag.clone(), &variant.ident) {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                format!("duplicate tag \"{tag}\" (already used by `{previous}`)"),
            ));
        }

        entries.push((&variant.ident, tag));
    }

    Ok(entries)
}
