//! Typed native handles on script functions.
//!
//! A [`Callback<Args, Ret>`] is what native code receives when a parameter
//! is declared as a function. Calling it converts each argument with its
//! [`IntoDynamic`] impl, invokes the script function, and converts the
//! result back with `Ret`'s [`FromDynamic`] impl.
//!
//! ```ignore
//! fn on_frame(callback: Callback<(f64,), bool>) -> Result<(), BridgeError> {
//!     let keep_going = callback.call(16.6)?;
//!     Ok(())
//! }
//! ```
//!
//! Script functions belong to the thread that converted them. Calls from
//! any other thread fail with [`BridgeError::WrongThread`].

use std::fmt;
use std::marker::PhantomData;
use std::thread::{self, ThreadId};

use tracing::trace;

use crate::convert::{FromDynamic, IntoDynamic};
use crate::dynamic::Dynamic;
use crate::error::{BridgeError, ConversionError};
use crate::function::ScriptFunction;

/// A script function viewed through a native signature.
///
/// `Args` is a tuple of argument types, `Ret` the expected return type.
/// `Ret = ()` discards whatever the script returns.
pub struct Callback<Args, Ret = ()> {
    function: ScriptFunction,
    owner: ThreadId,
    _signature: PhantomData<fn(Args) -> Ret>,
}

impl<Args, Ret> Callback<Args, Ret> {
    /// Wrap a function, binding it to the current thread.
    pub fn new(function: ScriptFunction) -> Self {
        Self {
            function,
            owner: thread::current().id(),
            _signature: PhantomData,
        }
    }

    /// The underlying script function.
    pub fn function(&self) -> &ScriptFunction {
        &self.function
    }

    /// Check whether the current thread may call this callback.
    pub fn is_owner_thread(&self) -> bool {
        thread::current().id() == self.owner
    }

    fn invoke(&self, args: &[Dynamic]) -> Result<Dynamic, BridgeError> {
        if !self.is_owner_thread() {
            return Err(BridgeError::WrongThread {
                function: self.function.name().to_string(),
            });
        }
        trace!(function = self.function.name(), argc = args.len(), "invoking callback");
        self.function.call(args).map_err(BridgeError::from)
    }
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
    fn clone(&self) -> Self {
        Self {
            function: self.function.clone(),
            owner: self.owner,
            _signature: PhantomData,
        }
    }
}

impl<Args, Ret> fmt::Debug for Callback<Args, Ret> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("function", &self.function.name())
            .field("owner", &self.owner)
            .finish()
    }
}

impl<Args, Ret> FromDynamic for Callback<Args, Ret> {
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Function(function) => Ok(Callback::new(function.clone())),
            _ => Err(ConversionError::mismatch("function", value)),
        }
    }
}

impl<Args, Ret> IntoDynamic for Callback<Args, Ret> {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Function(self.function)
    }
}

macro_rules! impl_callback_call {
    ($($ty:ident $var:ident),*) => {
        impl<Ret: FromDynamic, $($ty: IntoDynamic,)*> Callback<($($ty,)*), Ret> {
            /// Call the script function with typed arguments.
            pub fn call(&self, $($var: $ty),*) -> Result<Ret, BridgeError> {
                let args: Vec<Dynamic> = vec![$($var.into_dynamic()),*];
                let result = self.invoke(&args)?;
                Ok(Ret::from_dynamic(&result)?)
            }
        }
    };
}

impl_callback_call!();
impl_callback_call!(A1 a1);
impl_callback_call!(A1 a1, A2 a2);
impl_callback_call!(A1 a1, A2 a2, A3 a3);
impl_callback_call!(A1 a1, A2 a2, A3 a3, A4 a4);
impl_callback_call!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_callback_call!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_callback_call!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
impl_callback_call!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8);
