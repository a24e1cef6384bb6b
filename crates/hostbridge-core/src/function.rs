//! Callable values and native function storage.
//!
//! - [`ScriptFunction`]: the `Function` variant of [`Dynamic`]; what the
//!   script runtime sees and calls.
//! - [`NativeFn`]: type-erased native callable with a fixed arity.
//! - [`CallContext`]: typed access to the arguments of one call.
//! - [`IntoNativeFn`]: turns ordinary Rust closures of 0 to 8 arguments into
//!   a [`NativeFn`], selecting each argument's conversion pair at compile time.
//!
//! ```text
//! script call ─► ScriptFunction::call ─► NativeFn::invoke ─► arity check
//!                                                          ─► CallContext::arg::<A>() per argument
//!                                                          ─► closure body (exactly once)
//!                                                          ─► IntoNativeResult
//! ```

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{trace, warn};

use crate::convert::{FromDynamic, IntoDynamic, IntoNativeResult};
use crate::dynamic::Dynamic;
use crate::error::{BridgeError, ConversionError, ScriptError};
use crate::hybrid::panic_message;

type FunctionBody = dyn Fn(&[Dynamic]) -> Result<Dynamic, ScriptError> + Send + Sync;

/// A callable script value.
///
/// Cloning shares the same underlying function; two clones compare equal
/// under [`ScriptFunction::ptr_eq`].
#[derive(Clone)]
pub struct ScriptFunction {
    inner: Arc<FunctionInner>,
}

struct FunctionInner {
    name: String,
    arity: usize,
    body: Box<FunctionBody>,
}

impl ScriptFunction {
    /// Create a function value as the script runtime would.
    ///
    /// `arity` is the declared parameter count. The runtime does not enforce
    /// it for its own functions: extra arguments are ignored by the body.
    pub fn new<F>(name: impl Into<String>, arity: usize, body: F) -> Self
    where
        F: Fn(&[Dynamic]) -> Result<Dynamic, ScriptError> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(FunctionInner {
                name: name.into(),
                arity,
                body: Box::new(body),
            }),
        }
    }

    /// Expose a native closure as a script function.
    ///
    /// The resulting function rejects calls with the wrong argument count
    /// before touching the closure.
    ///
    /// ```ignore
    /// let add = ScriptFunction::from_native("add", |a: i32, b: i32| a + b);
    /// assert_eq!(add.arity(), 2);
    /// ```
    pub fn from_native<Args, Ret, F>(name: impl Into<String>, f: F) -> Self
    where
        F: IntoNativeFn<Args, Ret>,
    {
        Self::from_native_fn(f.into_native_fn(name))
    }

    /// Expose an already type-erased native function.
    ///
    /// Panics in the native body are caught and reported as a `ScriptError`
    /// reading `native panic: <message>`.
    pub fn from_native_fn(native: NativeFn) -> Self {
        let name = native.name().to_string();
        let arity = native.arity();
        Self::new(name, arity, move |args| {
            panic::catch_unwind(AssertUnwindSafe(|| native.invoke(args)))
                .unwrap_or_else(|payload| {
                    Err(BridgeError::native(format!(
                        "native panic: {}",
                        panic_message(&*payload)
                    )))
                })
                .map_err(|err| {
                    warn!(function = native.name(), error = %err, "native function failed");
                    ScriptError::from(err)
                })
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Declared parameter count.
    pub fn arity(&self) -> usize {
        self.inner.arity
    }

    /// Invoke the function with the given arguments.
    pub fn call(&self, args: &[Dynamic]) -> Result<Dynamic, ScriptError> {
        trace!(function = %self.inner.name, argc = args.len(), "calling function");
        (self.inner.body)(args)
    }

    /// Check whether two values refer to the same function.
    pub fn ptr_eq(&self, other: &ScriptFunction) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ScriptFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptFunction")
            .field("name", &self.inner.name)
            .field("arity", &self.inner.arity)
            .finish_non_exhaustive()
    }
}

impl FromDynamic for ScriptFunction {
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Function(f) => Ok(f.clone()),
            _ => Err(ConversionError::mismatch("function", value)),
        }
    }
}

impl IntoDynamic for ScriptFunction {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Function(self)
    }
}

/// Context for native function calls.
///
/// Gives typed access to the arguments of a single call. Conversion uses
/// the argument type's [`FromDynamic`] impl.
///
/// ```ignore
/// let index: i32 = ctx.arg(0)?;
/// let time: f64 = ctx.arg(1)?;
/// ```
pub struct CallContext<'a> {
    /// Name used in diagnostics
    function: &'a str,
    args: &'a [Dynamic],
}

impl<'a> CallContext<'a> {
    pub fn new(function: &'a str, args: &'a [Dynamic]) -> Self {
        Self { function, args }
    }

    pub fn function_name(&self) -> &str {
        self.function
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Fail with [`BridgeError::ArityMismatch`] unless exactly `expected`
    /// arguments were supplied.
    pub fn expect_arity(&self, expected: usize) -> Result<(), BridgeError> {
        if self.args.len() != expected {
            return Err(BridgeError::ArityMismatch {
                function: self.function.to_string(),
                expected,
                received: self.args.len(),
            });
        }
        Ok(())
    }

    /// Get a raw reference to an argument.
    pub fn arg_slot(&self, index: usize) -> Result<&'a Dynamic, BridgeError> {
        self.args.get(index).ok_or_else(|| BridgeError::ArityMismatch {
            function: self.function.to_string(),
            expected: index + 1,
            received: self.args.len(),
        })
    }

    /// Get a typed argument.
    pub fn arg<T: FromDynamic>(&self, index: usize) -> Result<T, BridgeError> {
        let slot = self.arg_slot(index)?;
        T::from_dynamic(slot).map_err(BridgeError::Conversion)
    }
}

impl fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("function", &self.function)
            .field("arg_count", &self.arg_count())
            .finish()
    }
}

/// Trait for callable native functions.
///
/// Implemented for closures taking a [`CallContext`]; implement it directly
/// for native callables that need to inspect raw arguments.
pub trait NativeCallable {
    fn call(&self, ctx: &CallContext<'_>) -> Result<Dynamic, BridgeError>;
}

impl<F> NativeCallable for F
where
    F: Fn(&CallContext<'_>) -> Result<Dynamic, BridgeError>,
{
    fn call(&self, ctx: &CallContext<'_>) -> Result<Dynamic, BridgeError> {
        (self)(ctx)
    }
}

/// Type-erased native function with a declared arity.
///
/// The inner callable is wrapped in Arc so the function can be shared by
/// several script values.
#[derive(Clone)]
pub struct NativeFn {
    name: Arc<str>,
    arity: usize,
    inner: Arc<dyn NativeCallable + Send + Sync>,
}

impl NativeFn {
    /// Create a NativeFn from a closure over the call context.
    pub fn new<F>(name: impl Into<String>, arity: usize, f: F) -> Self
    where
        F: Fn(&CallContext<'_>) -> Result<Dynamic, BridgeError> + Send + Sync + 'static,
    {
        Self::from_callable(name, arity, f)
    }

    /// Create a NativeFn from any [`NativeCallable`].
    pub fn from_callable<C>(name: impl Into<String>, arity: usize, callable: C) -> Self
    where
        C: NativeCallable + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            arity,
            inner: Arc::new(callable),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Call with dynamic arguments.
    ///
    /// The argument count is validated first; on a mismatch the callable is
    /// not invoked.
    pub fn invoke(&self, args: &[Dynamic]) -> Result<Dynamic, BridgeError> {
        let ctx = CallContext::new(&self.name, args);
        ctx.expect_arity(self.arity)?;
        self.inner.call(&ctx)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Conversion of a Rust closure into a [`NativeFn`].
///
/// `Args` is the tuple of argument types and `Ret` the return type; both
/// are inferred from the closure. Arguments must implement [`FromDynamic`],
/// the return type [`IntoNativeResult`] (so `Result<T, E>` works).
pub trait IntoNativeFn<Args, Ret>: Send + Sync + 'static {
    /// Number of arguments the closure takes.
    const ARITY: usize;

    fn into_native_fn(self, name: impl Into<String>) -> NativeFn;
}

macro_rules! impl_into_native_fn {
    ($count:expr; $($ty:ident $var:ident $idx:tt),*) => {
        impl<F, Ret, $($ty,)*> IntoNativeFn<($($ty,)*), Ret> for F
        where
            F: Fn($($ty),*) -> Ret + Send + Sync + 'static,
            Ret: IntoNativeResult + 'static,
            $($ty: FromDynamic + 'static,)*
        {
            const ARITY: usize = $count;

            #[allow(unused_variables)]
            fn into_native_fn(self, name: impl Into<String>) -> NativeFn {
                NativeFn::new(name, $count, move |ctx: &CallContext<'_>| {
                    $(let $var = ctx.arg::<$ty>($idx)?;)*
                    (self)($($var),*).into_native_result()
                })
            }
        }
    };
}

impl_into_native_fn!(0;);
impl_into_native_fn!(1; A1 a1 0);
impl_into_native_fn!(2; A1 a1 0, A2 a2 1);
impl_into_native_fn!(3; A1 a1 0, A2 a2 1, A3 a3 2);
impl_into_native_fn!(4; A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3);
impl_into_native_fn!(5; A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3, A5 a5 4);
impl_into_native_fn!(6; A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3, A5 a5 4, A6 a6 5);
impl_into_native_fn!(7; A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3, A5 a5 4, A6 a6 5, A7 a7 6);
impl_into_native_fn!(8; A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3, A5 a5 4, A6 a6 5, A7 a7 6, A8 a8 7);
