//! Bidirectional mapping between enum variants and string tags.
//!
//! Enums cross the bridge as tag strings only, never as integers. Each enum
//! declares one ordered table of `(tag, variant)` pairs; both directions
//! are derived from it.
//!
//! # Example
//!
//! ```ignore
//! #[derive(Clone, Copy, PartialEq, Eq, Debug, TagEnum)]
//! enum PlaybackState {
//!     Idle,
//!     Playing,
//!     #[hostbridge(tag = "paused")]
//!     Paused,
//! }
//!
//! assert_eq!(PlaybackState::Paused.to_tag(), "paused");
//! assert_eq!(PlaybackState::from_tag("Idle")?, PlaybackState::Idle);
//! ```
//!
//! The derive rejects duplicate tags at compile time. Hand-written impls can
//! get the same guarantee with [`has_unique_tags`] in a `const` assertion.

use crate::dynamic::Dynamic;
use crate::error::ConversionError;

/// A closed enum that converts to and from string tags.
pub trait TagEnum: Copy + Eq + Sized + 'static {
    /// Name used in diagnostics.
    const ENUM_NAME: &'static str;

    /// The tag table, in declaration order.
    const TAGS: &'static [(&'static str, Self)];

    /// Tag for this variant.
    fn to_tag(self) -> &'static str;

    /// Variant for a tag.
    ///
    /// Fails with [`ConversionError::UnknownEnumTag`] for strings not in the table.
    fn from_tag(tag: &str) -> Result<Self, ConversionError> {
        Self::TAGS
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, value)| *value)
            .ok_or_else(|| ConversionError::UnknownEnumTag {
                enum_name: Self::ENUM_NAME,
                tag: tag.to_string(),
            })
    }
}

/// Check at compile time that no tag appears twice in a table.
///
/// ```ignore
/// const _: () = assert!(has_unique_tags(MyEnum::TAGS));
/// ```
pub const fn has_unique_tags<E>(table: &[(&str, E)]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let mut j = i + 1;
        while j < table.len() {
            if str_eq(table[i].0, table[j].0) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Problems found in a tag table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagTableError {
    DuplicateTag(&'static str),
    /// Two tags map to the same variant (tags given)
    DuplicateValue(&'static str, &'static str),
    /// `to_tag` disagrees with the table for the given tag
    Inconsistent(&'static str),
}

/// Validate a tag table: unique tags, unique variants, and `to_tag`
/// agreeing with the table.
pub fn validate_tag_table<E: TagEnum>() -> Result<(), TagTableError> {
    for (i, (tag, value)) in E::TAGS.iter().enumerate() {
        for (other_tag, other_value) in &E::TAGS[i + 1..] {
            if tag == other_tag {
                return Err(TagTableError::DuplicateTag(*tag));
            }
            if value == other_value {
                return Err(TagTableError::DuplicateValue(*tag, *other_tag));
            }
        }
        if value.to_tag() != *tag {
            return Err(TagTableError::Inconsistent(*tag));
        }
    }
    Ok(())
}

/// `FromDynamic` body for tag enums; the derive calls this.
pub fn enum_from_dynamic<E: TagEnum>(value: &Dynamic) -> Result<E, ConversionError> {
    match value {
        Dynamic::String(tag) => E::from_tag(tag),
        _ => Err(ConversionError::mismatch("string", value)),
    }
}

/// `IntoDynamic` body for tag enums; the derive calls this.
pub fn enum_into_dynamic<E: TagEnum>(value: E) -> Dynamic {
    Dynamic::String(value.to_tag().to_string())
}
