//! Hostbridge Proc Macros
//!
//! # Macros
//!
//! - `#[derive(TagEnum)]` - Map a fieldless enum to and from string tags
//!
//! # Example
//!
//! ```ignore
//! use hostbridge_macros::TagEnum;
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Debug, TagEnum)]
//! #[hostbridge(name = "PlaybackState")]
//! pub enum State {
//!     Idle,
//!     Playing,
//!     #[hostbridge(tag = "paused")]
//!     Paused,
//! }
//! ```

use proc_macro::TokenStream;

mod attrs;
mod derive_tag_enum;

/// Derive `TagEnum`, `FromDynamic` and `IntoDynamic` for a fieldless enum.
///
/// The enum must also implement `Copy` and `Eq`.
///
/// # Attributes
///
/// - `#[hostbridge(name = "...")]` - Enum name used in error messages
/// - `#[hostbridge(crate = "...")]` - Path to the core crate, when it is not
///   a direct dependency under the name `hostbridge_core`
///
/// # Variant Attributes
///
/// - `#[hostbridge(tag = "...")]` - Override the tag (default: variant name)
///
/// Two variants with the same tag, or a variant with fields, is a compile
/// error.
#[proc_macro_derive(TagEnum, attributes(hostbridge))]
pub fn derive_tag_enum(input: TokenStream) -> TokenStream {
    derive_tag_enum::derive_tag_enum_impl(input)
}
