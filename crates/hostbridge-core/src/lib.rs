//! Core types for marshalling values between native Rust code and a dynamic
//! script runtime.
//!
//! - [`Dynamic`]: the runtime's value model
//! - [`FromDynamic`] / [`IntoDynamic`]: one conversion pair per native type
//! - [`TagEnum`]: enums as string tags
//! - [`ScriptFunction`], [`NativeFn`], [`Callback`]: closures in both directions
//! - [`HostObject`], [`ObjectRef`], [`Hybrid`]: shared native objects with
//!   name-keyed method dispatch
//!
//! Most users depend on the `hostbridge` facade crate, which adds the
//! `TagEnum` derive.

pub mod callback;
pub mod config;
pub mod containers;
pub mod convert;
pub mod dynamic;
pub mod enum_tags;
pub mod error;
pub mod function;
pub mod hybrid;
pub mod object;

pub use callback::Callback;
pub use config::DispatchConfig;
pub use convert::{FromDynamic, IntoDynamic, IntoNativeResult};
pub use dynamic::{Dynamic, ObjectMap};
pub use enum_tags::{
    TagEnum, TagTableError, enum_from_dynamic, enum_into_dynamic, has_unique_tags,
    validate_tag_table,
};
pub use error::{BridgeError, ConversionError, NativeError, RegistrationError, ScriptError};
pub use function::{CallContext, IntoNativeFn, NativeCallable, NativeFn, ScriptFunction};
pub use hybrid::{
    Hybrid, HybridObject, IntoMethod, MemberFlags, MethodTable, MethodThunk, TO_STRING,
};
pub use object::{HostObject, ObjectRef, WeakObjectRef};
