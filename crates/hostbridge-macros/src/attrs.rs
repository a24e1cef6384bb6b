//! Attribute parsing for `#[hostbridge(...)]`.

use syn::{Attribute, LitStr, Path};

/// Parsed `#[hostbridge(...)]` attributes on an enum.
#[derive(Debug, Default)]
pub struct EnumAttrs {
    /// Override name used in diagnostics (default: Rust enum name)
    pub name: Option<String>,
    /// Path to the core crate (default: `::hostbridge_core`)
    pub krate: Option<Path>,
}

/// Parsed `#[hostbridge(...)]` attributes on a variant.
#[derive(Debug, Default)]
pub struct VariantAttrs {
    /// Override tag (default: variant name)
    pub tag: Option<String>,
}

impl EnumAttrs {
    /// Parse attributes from a list of `#[hostbridge(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("hostbridge") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                } else if meta.path.is_ident("crate") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.krate = Some(value.parse()?);
                } else {
                    return Err(meta.error(format!(
                        "unknown hostbridge attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

impl VariantAttrs {
    /// Parse attributes from a list of `#[hostbridge(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("hostbridge") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("tag") {
                    let value: LitStr = meta.value()?.parse()?;
                    if value.value().is_empty() {
                        return Err(syn::Error::new_spanned(value, "tag must not be empty"));
                    }
                    result.tag = Some(value.value());
                } else {
                    return Err(meta.error(format!(
                        "unknown hostbridge variant attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}
