//! Error types for the bridge.
//!
//! ## Error Hierarchy
//!
//! ```text
//! BridgeError (aborts a boundary call)
//! ├── Conversion(ConversionError)  - value shape or content does not fit the native type
//! ├── ArityMismatch                - wrong argument count for a native function
//! ├── UnknownMethod / UnknownProperty / ReadOnlyProperty
//! ├── NativeFailure                - raised by a native implementation (see NativeError)
//! ├── Script                       - raised by a script function native code called
//! └── WrongThread                  - script callback invoked off the runtime thread
//!
//! ScriptError  - message-only form handed to the script runtime
//! ```
//!
//! Structured kinds stay on the native side. They are flattened into a
//! [`ScriptError`] exactly once, where a call re-enters the runtime.

use thiserror::Error;

/// Errors that can occur when converting a [`Dynamic`](crate::Dynamic) into a native type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The value's kind does not match the expected native type
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A host object of a different native type was supplied
    #[error("type mismatch: expected host object {expected}, got {actual}")]
    ObjectTypeMismatch {
        expected: &'static str,
        actual: String,
    },

    /// Integer value does not fit the target type
    #[error("integer overflow: value {value} does not fit in {target_type}")]
    IntegerOverflow {
        value: String,
        target_type: &'static str,
    },

    /// Fixed-size sequence received the wrong number of elements
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// String is not a tag of the enum's tag table
    #[error("unknown tag \"{tag}\" for enum {enum_name}")]
    UnknownEnumTag {
        enum_name: &'static str,
        tag: String,
    },
}

impl ConversionError {
    /// Shorthand for a [`ConversionError::TypeMismatch`] against a received value.
    pub fn mismatch(expected: &'static str, actual: &crate::Dynamic) -> Self {
        ConversionError::TypeMismatch {
            expected,
            actual: actual.type_name(),
        }
    }
}

/// Failure reported by a native implementation.
///
/// Native methods return this (or anything convertible into
/// [`BridgeError`]) for validation failures. Only the message crosses
/// into the script runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NativeError {
    message: String,
}

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for NativeError {
    fn from(message: String) -> Self {
        NativeError::new(message)
    }
}

impl From<&str> for NativeError {
    fn from(message: &str) -> Self {
        NativeError::new(message)
    }
}

/// Errors that abort a call crossing the bridge.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    /// Error converting an argument or return value
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Function called with the wrong number of arguments
    #[error("{function} expected {expected} arguments, received {received}")]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },

    /// Method name not present in the object's method table
    #[error("{type_name} has no method named \"{method}\"")]
    UnknownMethod { type_name: String, method: String },

    /// Property name not present in the object's property table
    #[error("{type_name} has no property named \"{property}\"")]
    UnknownProperty { type_name: String, property: String },

    /// Property has a getter but no setter
    #[error("property \"{property}\" of {type_name} is read-only")]
    ReadOnlyProperty { type_name: String, property: String },

    /// Error raised by native code during a call
    #[error("{message}")]
    NativeFailure { message: String },

    /// Exception raised by a script function called from native code
    #[error("script error: {message}")]
    Script { message: String },

    /// Script function invoked from a thread that does not own the runtime
    #[error("script function {function} called off the runtime thread")]
    WrongThread { function: String },
}

impl BridgeError {
    /// Create a native failure with a message.
    pub fn native(message: impl Into<String>) -> Self {
        BridgeError::NativeFailure {
            message: message.into(),
        }
    }

    /// Check if this error originated in native code rather than in marshalling.
    pub fn is_native_failure(&self) -> bool {
        matches!(self, BridgeError::NativeFailure { .. })
    }
}

impl From<NativeError> for BridgeError {
    fn from(err: NativeError) -> Self {
        BridgeError::NativeFailure {
            message: err.message,
        }
    }
}

impl From<ScriptError> for BridgeError {
    fn from(err: ScriptError) -> Self {
        BridgeError::Script {
            message: err.message,
        }
    }
}

/// Error as seen by the script runtime: a message and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScriptError {
    message: String,
}

impl ScriptError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<BridgeError> for ScriptError {
    fn from(err: BridgeError) -> Self {
        match err {
            // Already a script-side message; don't wrap it twice.
            BridgeError::Script { message } => ScriptError { message },
            other => ScriptError::new(other.to_string()),
        }
    }
}

/// Errors raised while an exposed object registers its members.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A method or property name was registered twice
    #[error("{type_name} already has a member named \"{name}\"")]
    DuplicateMember { type_name: String, name: String },
}
