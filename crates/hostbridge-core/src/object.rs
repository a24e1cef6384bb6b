//! Native objects exposed to the script runtime.
//!
//! [`HostObject`] is the dispatch seam the runtime talks to; [`ObjectRef`]
//! is the shared handle stored in [`Dynamic::Host`]. Every copy of a handle
//! co-owns the object, so it is dropped exactly once, when the last handle
//! on either side of the bridge goes away.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use tracing::warn;

use crate::convert::{FromDynamic, IntoDynamic};
use crate::dynamic::Dynamic;
use crate::error::{BridgeError, ConversionError, ScriptError};
use crate::function::ScriptFunction;

/// An object the script runtime can call into.
///
/// Usually implemented through [`Hybrid`](crate::Hybrid) rather than by hand.
pub trait HostObject: Send + Sync + 'static {
    /// Name of the exposed type, as shown to scripts.
    fn type_name(&self) -> &'static str;

    /// Call a method by name.
    fn call_method(&self, method: &str, args: &[Dynamic]) -> Result<Dynamic, BridgeError>;

    /// Read a property by name.
    fn get_property(&self, property: &str) -> Result<Dynamic, BridgeError>;

    /// Write a property by name.
    fn set_property(&self, property: &str, value: Dynamic) -> Result<(), BridgeError>;

    /// Names of every method and property, sorted.
    fn member_names(&self) -> Vec<String>;

    /// Declared argument count of `method`, or `None` if it is not a method.
    ///
    /// Reading a method name as a property yields a bound function only
    /// when this returns `Some`.
    fn method_arity(&self, _method: &str) -> Option<usize> {
        None
    }

    /// Upcast for downcasting back to the concrete type.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Shared handle to a host object.
///
/// Equality is identity: two handles are equal when they point at the same
/// object.
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn HostObject>);

impl ObjectRef {
    pub fn new<O: HostObject>(object: Arc<O>) -> Self {
        ObjectRef(object)
    }

    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Check whether two handles refer to the same object.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    /// Number of live handles (on both sides of the bridge).
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Non-owning handle that does not keep the object alive.
    pub fn downgrade(&self) -> WeakObjectRef {
        WeakObjectRef(Arc::downgrade(&self.0))
    }

    /// Recover the concrete object, if it is an `O`.
    pub fn downcast<O: HostObject>(&self) -> Option<Arc<O>> {
        Arc::clone(&self.0).into_any_arc().downcast::<O>().ok()
    }

    pub fn as_host_object(&self) -> &dyn HostObject {
        &*self.0
    }

    pub fn member_names(&self) -> Vec<String> {
        self.0.member_names()
    }

    /// Call a method the way the script runtime does.
    ///
    /// Structured errors are flattened to a message here.
    pub fn call(&self, method: &str, args: &[Dynamic]) -> Result<Dynamic, ScriptError> {
        self.0
            .call_method(method, args)
            .map_err(|err| self.to_script_error(method, err))
    }

    /// Read a property the way the script runtime does.
    ///
    /// Method names read as a `Function` bound to this object.
    pub fn get(&self, property: &str) -> Result<Dynamic, ScriptError> {
        if let Some(method) = self.bound_method(property) {
            return Ok(Dynamic::Function(method));
        }
        self.0
            .get_property(property)
            .map_err(|err| self.to_script_error(property, err))
    }

    /// Write a property the way the script runtime does.
    pub fn set(&self, property: &str, value: Dynamic) -> Result<(), ScriptError> {
        self.0
            .set_property(property, value)
            .map_err(|err| self.to_script_error(property, err))
    }

    /// A function value that calls `method` on this object.
    ///
    /// The function holds a strong handle, so the object lives at least as
    /// long as the function does.
    pub fn bound_method(&self, method: &str) -> Option<ScriptFunction> {
        let arity = self.0.method_arity(method)?;
        let object = self.clone();
        let name = method.to_string();
        Some(ScriptFunction::new(
            format!("{}.{}", self.type_name(), method),
            arity,
            move |args| object.call(&name, args),
        ))
    }

    fn to_script_error(&self, member: &str, err: BridgeError) -> ScriptError {
        warn!(type_name = self.type_name(), member, error = %err, "host object call failed");
        ScriptError::from(err)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ObjectRef {}

impl Hash for ObjectRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).cast::<()>().hash(state);
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("type_name", &self.type_name())
            .field("ptr", &Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

impl FromDynamic for ObjectRef {
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Host(object) => Ok(object.clone()),
            _ => Err(ConversionError::mismatch("host object", value)),
        }
    }
}

impl IntoDynamic for ObjectRef {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Host(self)
    }
}

/// Weak handle to a host object.
#[derive(Clone)]
pub struct WeakObjectRef(Weak<dyn HostObject>);

impl WeakObjectRef {
    /// Get a strong handle, if the object is still alive.
    pub fn upgrade(&self) -> Option<ObjectRef> {
        self.0.upgrade().map(ObjectRef)
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl fmt::Debug for WeakObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakObjectRef")
            .field("alive", &self.is_alive())
            .finish()
    }
}
