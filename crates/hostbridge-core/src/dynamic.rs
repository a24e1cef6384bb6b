//! Runtime value type crossing the native/script boundary.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::function::ScriptFunction;
use crate::object::ObjectRef;

/// Property map of a plain script object.
///
/// Key order is not significant, matching the runtime's own object model.
pub type ObjectMap = FxHashMap<String, Dynamic>;

/// A value owned by the script runtime.
///
/// Every value the runtime hands to native code, or receives back, is one of
/// these variants. Conversions to native types pattern-match on the variant;
/// there is no implicit coercion between variants.
///
/// `Function` and `Host` hold shared references: cloning a `Dynamic` of
/// those kinds yields another reference to the same callable or object.
#[derive(Clone, Default)]
pub enum Dynamic {
    /// The absence of a value (`undefined`).
    #[default]
    Undefined,
    /// An explicit null.
    Null,
    /// Boolean value
    Bool(bool),
    /// Double-precision number
    Number(f64),
    /// Arbitrary-precision integer restricted to the 64-bit signed and
    /// unsigned ranges at conversion time.
    BigInt(i128),
    /// UTF-8 string
    String(String),
    /// Ordered sequence
    Array(Vec<Dynamic>),
    /// Plain object with string keys
    Object(ObjectMap),
    /// Callable value
    Function(ScriptFunction),
    /// Opaque reference to an exposed native object
    Host(ObjectRef),
}

impl Dynamic {
    /// Get a human-readable name for this value's kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Undefined => "undefined",
            Dynamic::Null => "null",
            Dynamic::Bool(_) => "boolean",
            Dynamic::Number(_) => "number",
            Dynamic::BigInt(_) => "bigint",
            Dynamic::String(_) => "string",
            Dynamic::Array(_) => "array",
            Dynamic::Object(_) => "object",
            Dynamic::Function(_) => "function",
            Dynamic::Host(_) => "host object",
        }
    }

    /// Check if this value is undefined.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Dynamic::Undefined)
    }

    /// Check if this value is null or undefined.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Dynamic::Undefined | Dynamic::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Dynamic::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Dynamic::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Dynamic]> {
        match self {
            Dynamic::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Dynamic::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&ScriptFunction> {
        match self {
            Dynamic::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_host(&self) -> Option<&ObjectRef> {
        match self {
            Dynamic::Host(obj) => Some(obj),
            _ => None,
        }
    }

    /// Build a plain object from key/value pairs.
    ///
    /// Later duplicates replace earlier ones.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Dynamic)>,
    {
        Dynamic::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Undefined => write!(f, "Undefined"),
            Dynamic::Null => write!(f, "Null"),
            Dynamic::Bool(v) => write!(f, "Bool({})", v),
            Dynamic::Number(v) => write!(f, "Number({})", v),
            Dynamic::BigInt(v) => write!(f, "BigInt({})", v),
            Dynamic::String(s) => write!(f, "String({:?})", s),
            Dynamic::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Dynamic::Object(map) => f.debug_tuple("Object").field(map).finish(),
            Dynamic::Function(func) => write!(f, "Function({})", func.name()),
            Dynamic::Host(obj) => write!(f, "Host({})", obj.type_name()),
        }
    }
}

impl PartialEq for Dynamic {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Dynamic::Undefined, Dynamic::Undefined) => true,
            (Dynamic::Null, Dynamic::Null) => true,
            (Dynamic::Bool(a), Dynamic::Bool(b)) => a == b,
            (Dynamic::Number(a), Dynamic::Number(b)) => a == b,
            (Dynamic::BigInt(a), Dynamic::BigInt(b)) => a == b,
            (Dynamic::String(a), Dynamic::String(b)) => a == b,
            (Dynamic::Array(a), Dynamic::Array(b)) => a == b,
            (Dynamic::Object(a), Dynamic::Object(b)) => a == b,
            // Callables and host objects compare by identity
            (Dynamic::Function(a), Dynamic::Function(b)) => a.ptr_eq(b),
            (Dynamic::Host(a), Dynamic::Host(b)) => a == b,
            _ => false,
        }
    }
}
