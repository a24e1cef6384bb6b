//! Exposed objects with per-instance method tables.
//!
//! A native type opts in by implementing [`HybridObject`]. Wrapping it in
//! [`Hybrid`] runs its registration hook once, building an immutable
//! [`MethodTable`] that maps script-visible names to typed native methods.
//!
//! ```ignore
//! struct Animator { animations: Vec<Animation> }
//!
//! impl HybridObject for Animator {
//!     const NAME: &'static str = "Animator";
//!
//!     fn load_hybrid_methods(&self, methods: &mut MethodTable<Self>) -> Result<(), RegistrationError> {
//!         methods
//!             .register_method("applyAnimation", Animator::apply_animation)?
//!             .register_getter("animationCount", Animator::animation_count)?;
//!         Ok(())
//!     }
//! }
//!
//! let animator = Hybrid::new(Animator::load(path)?)?;
//! let value = animator.into_dynamic();
//! ```
//!
//! ## Dispatch
//!
//! ```text
//! ObjectRef::call("applyAnimation", args)
//!   └─► MethodTable::dispatch
//!         ├─ name lookup          (UnknownMethod)
//!         ├─ arity check          (ArityMismatch, method not run)
//!         ├─ argument conversion  (Conversion)
//!         ├─ native method        (NativeFailure, prefixed "Animator.applyAnimation: ")
//!         └─ result conversion
//! ```

use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::panic::{self, AssertUnwindSafe};
use std::slice;
use std::sync::Arc;

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::config::DispatchConfig;
use crate::convert::{FromDynamic, IntoDynamic, IntoNativeResult};
use crate::dynamic::Dynamic;
use crate::error::{BridgeError, ConversionError, RegistrationError};
use crate::function::CallContext;
use crate::object::{HostObject, ObjectRef};

/// Name of the built-in description method.
pub const TO_STRING: &str = "toString";

/// A native type that exposes itself to scripts.
pub trait HybridObject: Send + Sync + Sized + 'static {
    /// Type name shown to scripts and used in error messages.
    const NAME: &'static str;

    /// Register every method and property. Called exactly once per
    /// instance, before the object is reachable from a script.
    fn load_hybrid_methods(&self, methods: &mut MethodTable<Self>) -> Result<(), RegistrationError>;
}

bitflags! {
    /// What kind of member a name refers to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MemberFlags: u8 {
        const METHOD = 1 << 0;
        const GETTER = 1 << 1;
        const SETTER = 1 << 2;
        /// Provided by the bridge rather than registered.
        const BUILTIN = 1 << 3;
    }
}

/// Type-erased method body: receives the object and the call's arguments.
pub type MethodThunk<T> =
    Arc<dyn Fn(&T, &CallContext<'_>) -> Result<Dynamic, BridgeError> + Send + Sync>;

struct Member<T> {
    /// `Type.name`, used in diagnostics
    qualified: String,
    arity: usize,
    thunk: MethodThunk<T>,
}

/// Name-keyed dispatch table for one exposed object.
pub struct MethodTable<T> {
    type_name: &'static str,
    config: DispatchConfig,
    methods: FxHashMap<String, Member<T>>,
    getters: FxHashMap<String, Member<T>>,
    setters: FxHashMap<String, Member<T>>,
}

impl<T: 'static> MethodTable<T> {
    pub fn new(type_name: &'static str, config: DispatchConfig) -> Self {
        Self {
            type_name,
            config,
            methods: FxHashMap::default(),
            getters: FxHashMap::default(),
            setters: FxHashMap::default(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a method. Argument and return conversions are picked from the
    /// function's signature.
    pub fn register_method<Args, Ret, F>(
        &mut self,
        name: &str,
        method: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        F: IntoMethod<T, Args, Ret>,
    {
        if self.methods.contains_key(name)
            || self.getters.contains_key(name)
            || self.setters.contains_key(name)
        {
            return Err(self.duplicate(name));
        }
        trace!(type_name = self.type_name, method = name, arity = F::ARITY, "registering method");
        let member = self.member(name, F::ARITY, method.into_thunk());
        self.methods.insert(name.to_string(), member);
        Ok(self)
    }

    /// Register a read accessor for a property.
    pub fn register_getter<Ret, F>(
        &mut self,
        name: &str,
        getter: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        F: IntoMethod<T, (), Ret>,
    {
        if self.methods.contains_key(name) || self.getters.contains_key(name) {
            return Err(self.duplicate(name));
        }
        trace!(type_name = self.type_name, property = name, "registering getter");
        let member = self.member(name, 0, getter.into_thunk());
        self.getters.insert(name.to_string(), member);
        Ok(self)
    }

    /// Register a write accessor for a property.
    pub fn register_setter<V, Ret, F>(
        &mut self,
        name: &str,
        setter: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        F: IntoMethod<T, (V,), Ret>,
    {
        if self.methods.contains_key(name) || self.setters.contains_key(name) {
            return Err(self.duplicate(name));
        }
        trace!(type_name = self.type_name, property = name, "registering setter");
        let member = self.member(name, 1, setter.into_thunk());
        self.setters.insert(name.to_string(), member);
        Ok(self)
    }

    /// Register a read/write property.
    pub fn register_property<V, GetRet, SetRet, G, S>(
        &mut self,
        name: &str,
        getter: G,
        setter: S,
    ) -> Result<&mut Self, RegistrationError>
    where
        G: IntoMethod<T, (), GetRet>,
        S: IntoMethod<T, (V,), SetRet>,
    {
        self.register_getter(name, getter)?;
        self.register_setter(name, setter)
    }

    fn member(&self, name: &str, arity: usize, thunk: MethodThunk<T>) -> Member<T> {
        Member {
            qualified: format!("{}.{}", self.type_name, name),
            arity,
            thunk,
        }
    }

    fn duplicate(&self, name: &str) -> RegistrationError {
        RegistrationError::DuplicateMember {
            type_name: self.type_name.to_string(),
            name: name.to_string(),
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// What `name` refers to; empty if nothing.
    pub fn member_flags(&self, name: &str) -> MemberFlags {
        let mut flags = MemberFlags::empty();
        if self.methods.contains_key(name) {
            flags |= MemberFlags::METHOD;
        }
        if self.getters.contains_key(name) {
            flags |= MemberFlags::GETTER;
        }
        if self.setters.contains_key(name) {
            flags |= MemberFlags::SETTER;
        }
        if flags.is_empty() && self.has_builtin(name) {
            flags = MemberFlags::METHOD | MemberFlags::BUILTIN;
        }
        flags
    }

    /// Every member name, sorted.
    pub fn member_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .methods
            .keys()
            .chain(self.getters.keys())
            .chain(self.setters.keys())
            .cloned()
            .collect();
        if self.has_builtin(TO_STRING) && !names.iter().any(|name| name == TO_STRING) {
            names.push(TO_STRING.to_string());
        }
        names.sort();
        names.dedup();
        names
    }

    /// Declared arity of a method, built-ins included.
    pub fn method_arity(&self, name: &str) -> Option<usize> {
        match self.methods.get(name) {
            Some(member) => Some(member.arity),
            None => self.has_builtin(name).then_some(0),
        }
    }

    /// Number of registered names (built-ins excluded).
    pub fn len(&self) -> usize {
        let mut count = self.methods.len() + self.getters.len();
        count += self
            .setters
            .keys()
            .filter(|name| !self.getters.contains_key(*name))
            .count();
        count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn has_builtin(&self, name: &str) -> bool {
        name == TO_STRING && self.config.builtin_to_string
    }

    /// `"[HybridObject <Name>]"`
    pub fn describe(&self) -> String {
        format!("[HybridObject {}]", self.type_name)
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Call a method on `this`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn dispatch(&self, this: &T, method: &str, args: &[Dynamic]) -> Result<Dynamic, BridgeError> {
        trace!(type_name = self.type_name, method, argc = args.len(), "dispatch");
        match self.methods.get(method) {
            Some(member) => self.invoke(this, member, args),
            None if self.has_builtin(method) => Ok(Dynamic::String(self.describe())),
            None => Err(BridgeError::UnknownMethod {
                type_name: self.type_name.to_string(),
                method: method.to_string(),
            }),
        }
    }

    /// Read a property of `this`.
    pub fn get(&self, this: &T, property: &str) -> Result<Dynamic, BridgeError> {
        match self.getters.get(property) {
            Some(member) => self.invoke(this, member, &[]),
            None => Err(BridgeError::UnknownProperty {
                type_name: self.type_name.to_string(),
                property: property.to_string(),
            }),
        }
    }

    /// Write a property of `this`.
    pub fn set(&self, this: &T, property: &str, value: Dynamic) -> Result<(), BridgeError> {
        match self.setters.get(property) {
            Some(member) => self
                .invoke(this, member, slice::from_ref(&value))
                .map(drop),
            None if self.getters.contains_key(property) => Err(BridgeError::ReadOnlyProperty {
                type_name: self.type_name.to_string(),
                property: property.to_string(),
            }),
            None => Err(BridgeError::UnknownProperty {
                type_name: self.type_name.to_string(),
                property: property.to_string(),
            }),
        }
    }

    fn invoke(&self, this: &T, member: &Member<T>, args: &[Dynamic]) -> Result<Dynamic, BridgeError> {
        let ctx = CallContext::new(&member.qualified, args);
        ctx.expect_arity(member.arity)?;

        let result = if self.config.catch_panics {
            panic::catch_unwind(AssertUnwindSafe(|| (member.thunk)(this, &ctx)))
                .unwrap_or_else(|payload| {
                    Err(BridgeError::native(format!(
                        "native panic: {}",
                        panic_message(&*payload)
                    )))
                })
        } else {
            (member.thunk)(this, &ctx)
        };

        result.map_err(|err| match err {
            BridgeError::NativeFailure { message } => {
                warn!(member = %member.qualified, %message, "native method failed");
                BridgeError::NativeFailure {
                    message: format!("{}: {}", member.qualified, message),
                }
            }
            other => other,
        })
    }
}

impl<T> fmt::Debug for MethodTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable")
            .field("type_name", &self.type_name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("getters", &self.getters.keys().collect::<Vec<_>>())
            .field("setters", &self.setters.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

// ============================================================================
// Method signatures
// ============================================================================

/// Conversion of a native method (`Fn(&T, A1, ..., An) -> Ret`) into a
/// [`MethodThunk`].
///
/// Implemented for up to 8 arguments. Arguments must implement
/// [`FromDynamic`], the return type [`IntoNativeResult`].
pub trait IntoMethod<T, Args, Ret>: Send + Sync + 'static {
    const ARITY: usize;

    fn into_thunk(self) -> MethodThunk<T>;
}

macro_rules! impl_into_method {
    ($count:expr; $($ty:ident $var:ident $idx:tt),*) => {
        impl<T, F, Ret, $($ty,)*> IntoMethod<T, ($($ty,)*), Ret> for F
        where
            T: 'static,
            F: Fn(&T, $($ty),*) -> Ret + Send + Sync + 'static,
            Ret: IntoNativeResult + 'static,
            $($ty: FromDynamic + 'static,)*
        {
            const ARITY: usize = $count;

            #[allow(unused_variables)]
            fn into_thunk(self) -> MethodThunk<T> {
                Arc::new(move |this: &T, ctx: &CallContext<'_>| {
                    $(let $var = ctx.arg::<$ty>($idx)?;)*
                    (self)(this, $($var),*).into_native_result()
                })
            }
        }
    };
}

impl_into_method!(0;);
impl_into_method!(1; A1 a1 0);
impl_into_method!(2; A1 a1 0, A2 a2 1);
impl_into_method!(3; A1 a1 0, A2 a2 1, A3 a3 2);
impl_into_method!(4; A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3);
impl_into_method!(5; A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3, A5 a5 4);
impl_into_method!(6; A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3, A5 a5 4, A6 a6 5);
impl_into_method!(7; A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3, A5 a5 4, A6 a6 5, A7 a7 6);
impl_into_method!(8; A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3, A5 a5 4, A6 a6 5, A7 a7 6, A8 a8 7);

// ============================================================================
// Hybrid<T>
// ============================================================================

/// A native value together with its method table.
///
/// Always handed out as `Arc<Hybrid<T>>`; converting that into a
/// [`Dynamic`] shares ownership with the script runtime.
pub struct Hybrid<T: HybridObject> {
    value: T,
    methods: MethodTable<T>,
}

impl<T: HybridObject> Hybrid<T> {
    /// Wrap `value` with the default [`DispatchConfig`].
    pub fn new(value: T) -> Result<Arc<Self>, RegistrationError> {
        Self::with_config(value, DispatchConfig::default())
    }

    /// Wrap `value`, running its registration hook once.
    pub fn with_config(value: T, config: DispatchConfig) -> Result<Arc<Self>, RegistrationError> {
        let mut methods = MethodTable::new(T::NAME, config);
        value.load_hybrid_methods(&mut methods)?;
        debug!(type_name = T::NAME, members = methods.len(), "loaded hybrid methods");
        Ok(Arc::new(Self { value, methods }))
    }

    pub fn methods(&self) -> &MethodTable<T> {
        &self.methods
    }

    /// Shared handle for the script side.
    pub fn object_ref(self: &Arc<Self>) -> ObjectRef {
        ObjectRef::new(Arc::clone(self))
    }
}

impl<T: HybridObject> Deref for Hybrid<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: HybridObject + fmt::Debug> fmt::Debug for Hybrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hybrid")
            .field("value", &self.value)
            .field("methods", &self.methods)
            .finish()
    }
}

impl<T: HybridObject> HostObject for Hybrid<T> {
    fn type_name(&self) -> &'static str {
        T::NAME
    }

    fn call_method(&self, method: &str, args: &[Dynamic]) -> Result<Dynamic, BridgeError> {
        self.methods.dispatch(&self.value, method, args)
    }

    fn get_property(&self, property: &str) -> Result<Dynamic, BridgeError> {
        self.methods.get(&self.value, property)
    }

    fn set_property(&self, property: &str, value: Dynamic) -> Result<(), BridgeError> {
        self.methods.set(&self.value, property, value)
    }

    fn member_names(&self) -> Vec<String> {
        self.methods.member_names()
    }

    fn method_arity(&self, method: &str) -> Option<usize> {
        self.methods.method_arity(method)
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl<T: HybridObject> IntoDynamic for Arc<Hybrid<T>> {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Host(ObjectRef::new(self))
    }
}

impl<T: HybridObject> FromDynamic for Arc<Hybrid<T>> {
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Host(object) => {
                object
                    .downcast::<Hybrid<T>>()
                    .ok_or_else(|| ConversionError::ObjectTypeMismatch {
                        expected: T::NAME,
                        actual: object.type_name().to_string(),
                    })
            }
            _ => Err(ConversionError::mismatch("host object", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::NativeError;

    #[derive(Debug, Default)]
    struct Playlist {
        tracks: Mutex<Vec<String>>,
        volume: Mutex<f64>,
    }

    impl Playlist {
        fn push(&self, track: String) -> u32 {
            let mut tracks = self.tracks.lock().unwrap();
            tracks.push(track);
            tracks.len() as u32
        }

        fn track(&self, index: i32) -> Result<String, NativeError> {
            let tracks = self.tracks.lock().unwrap();
            usize::try_from(index)
                .ok()
                .and_then(|i| tracks.get(i).cloned())
                .ok_or_else(|| NativeError::new(format!("index out of range: {index}")))
        }

        fn len(&self) -> u32 {
            self.tracks.lock().unwrap().len() as u32
        }

        fn volume(&self) -> f64 {
            *self.volume.lock().unwrap()
        }

        fn set_volume(&self, volume: f64) {
            *self.volume.lock().unwrap() = volume;
        }

        fn explode(&self) {
            panic!("boom");
        }
    }

    impl HybridObject for Playlist {
        const NAME: &'static str = "Playlist";

        fn load_hybrid_methods(&self, methods: &mut MethodTable<Self>) -> Result<(), RegistrationError> {
            methods
                .register_method("push", Playlist::push)?
                .register_method("track", Playlist::track)?
                .register_method("explode", Playlist::explode)?
                .register_getter("length", Playlist::len)?
                .register_property("volume", Playlist::volume, Playlist::set_volume)?;
            Ok(())
        }
    }

    fn playlist() -> Arc<Hybrid<Playlist>> {
        Hybrid::new(Playlist::default()).unwrap()
    }

    #[test]
    fn dispatch_converts_arguments() {
        let list = playlist();
        let result = list
            .call_method("push", &[Dynamic::String("intro".into())])
            .unwrap();
        assert_eq!(result, Dynamic::Number(1.0));
        assert_eq!(
            list.call_method("track", &[Dynamic::Number(0.0)]).unwrap(),
            Dynamic::String("intro".into())
        );
    }

    #[test]
    fn native_failure_is_prefixed() {
        let list = playlist();
        let err = list.call_method("track", &[Dynamic::Number(3.0)]).unwrap_err();
        assert_eq!(
            err,
            BridgeError::native("Playlist.track: index out of range: 3")
        );
    }

    #[test]
    fn arity_uses_qualified_name() {
        let list = playlist();
        let err = list.call_method("track", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Playlist.track expected 1 arguments, received 0");
    }

    #[test]
    fn unknown_method() {
        let err = playlist().call_method("shuffle", &[]).unwrap_err();
        assert_eq!(
            err,
            BridgeError::UnknownMethod {
                type_name: "Playlist".to_string(),
                method: "shuffle".to_string()
            }
        );
    }

    #[test]
    fn properties() {
        let list = playlist();
        list.set_property("volume", Dynamic::Number(0.5)).unwrap();
        assert_eq!(list.get_property("volume").unwrap(), Dynamic::Number(0.5));
        assert_eq!(list.volume(), 0.5);
        assert_eq!(list.get_property("length").unwrap(), Dynamic::Number(0.0));
        assert!(matches!(
            list.set_property("length", Dynamic::Number(1.0)),
            Err(BridgeError::ReadOnlyProperty { .. })
        ));
        assert!(matches!(
            list.get_property("missing"),
            Err(BridgeError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn builtin_to_string() {
        let list = playlist();
        assert_eq!(
            list.call_method(TO_STRING, &[]).unwrap(),
            Dynamic::String("[HybridObject Playlist]".into())
        );
        assert_eq!(
            list.methods().member_flags(TO_STRING),
            MemberFlags::METHOD | MemberFlags::BUILTIN
        );

        let plain = Hybrid::with_config(
            Playlist::default(),
            DispatchConfig::new().with_builtin_to_string(false),
        )
        .unwrap();
        assert!(plain.call_method(TO_STRING, &[]).is_err());
    }

    #[test]
    fn member_names_are_sorted() {
        assert_eq!(
            playlist().member_names(),
            vec!["explode", "length", "push", "toString", "track", "volume"]
        );
    }

    #[test]
    fn member_flags() {
        let list = playlist();
        let methods = list.methods();
        assert_eq!(methods.member_flags("push"), MemberFlags::METHOD);
        assert_eq!(methods.member_flags("length"), MemberFlags::GETTER);
        assert_eq!(
            methods.member_flags("volume"),
            MemberFlags::GETTER | MemberFlags::SETTER
        );
        assert!(methods.member_flags("nothing").is_empty());
        assert_eq!(methods.len(), 5);
    }

    #[test]
    fn method_arity_lookup() {
        let list = playlist();
        assert_eq!(list.methods().method_arity("push"), Some(1));
        assert_eq!(list.methods().method_arity(TO_STRING), Some(0));
        assert_eq!(list.methods().method_arity("volume"), None);
        assert_eq!(list.methods().method_arity("missing"), None);
    }

    #[test]
    fn panics_become_native_failures() {
        let err = playlist().call_method("explode", &[]).unwrap_err();
        assert_eq!(err, BridgeError::native("Playlist.explode: native panic: boom"));
    }

    #[test]
    fn duplicate_registration_fails() {
        #[derive(Debug)]
        struct Twice;

        impl HybridObject for Twice {
            const NAME: &'static str = "Twice";

            fn load_hybrid_methods(&self, methods: &mut MethodTable<Self>) -> Result<(), RegistrationError> {
                methods
                    .register_method("go", |_: &Twice| ())?
                    .register_getter("go", |_: &Twice| 1u8)?;
                Ok(())
            }
        }

        let err = Hybrid::new(Twice).unwrap_err();
        assert_eq!(
            err,
            RegistrationError::DuplicateMember {
                type_name: "Twice".to_string(),
                name: "go".to_string()
            }
        );
    }

    #[test]
    fn user_to_string_overrides_builtin() {
        struct Named;

        impl HybridObject for Named {
            const NAME: &'static str = "Named";

            fn load_hybrid_methods(&self, methods: &mut MethodTable<Self>) -> Result<(), RegistrationError> {
                methods.register_method(TO_STRING, |_: &Named| "custom")?;
                Ok(())
            }
        }

        let named = Hybrid::new(Named).unwrap();
        assert_eq!(
            named.call_method(TO_STRING, &[]).unwrap(),
            Dynamic::String("custom".into())
        );
    }

    #[test]
    fn registration_runs_once() {
        static LOADS: AtomicUsize = AtomicUsize::new(0);

        struct Counted;

        impl HybridObject for Counted {
            const NAME: &'static str = "Counted";

            fn load_hybrid_methods(&self, _methods: &mut MethodTable<Self>) -> Result<(), RegistrationError> {
                LOADS.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let counted = Hybrid::new(Counted).unwrap();
        counted.call_method(TO_STRING, &[]).unwrap();
        counted.call_method(TO_STRING, &[]).unwrap();
        assert_eq!(LOADS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dynamic_round_trip_keeps_identity() {
        let list = playlist();
        let value = Arc::clone(&list).into_dynamic();
        let back = Arc::<Hybrid<Playlist>>::from_dynamic(&value).unwrap();
        assert!(Arc::ptr_eq(&list, &back));
    }

    #[test]
    fn wrong_object_type() {
        struct Other;

        impl HybridObject for Other {
            const NAME: &'static str = "Other";

            fn load_hybrid_methods(&self, _methods: &mut MethodTable<Self>) -> Result<(), RegistrationError> {
                Ok(())
            }
        }

        let value = Hybrid::new(Other).unwrap().into_dynamic();
        let err = Arc::<Hybrid<Playlist>>::from_dynamic(&value).unwrap_err();
        assert_eq!(
            err,
            ConversionError::ObjectTypeMismatch {
                expected: "Playlist",
                actual: "Other".to_string()
            }
        );
    }
}
