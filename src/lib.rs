//! Typed marshalling between native Rust code and a dynamic script runtime.
//!
//! Values the runtime owns are [`Dynamic`]s. Every native type crossing the
//! boundary has one [`FromDynamic`] / [`IntoDynamic`] pair; composite types
//! (options, sequences, maps, closures, shared objects) are built from the
//! pairs of their parts.
//!
//! # Example
//!
//! ```ignore
//! use hostbridge::prelude::*;
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Debug, TagEnum)]
//! #[hostbridge(crate = "hostbridge")]
//! enum PlaybackState { Idle, Playing, Paused }
//!
//! struct Player { state: Mutex<PlaybackState> }
//!
//! impl HybridObject for Player {
//!     const NAME: &'static str = "Player";
//!
//!     fn load_hybrid_methods(&self, methods: &mut MethodTable<Self>) -> Result<(), RegistrationError> {
//!         methods.register_property("state", Player::state, Player::set_state)?;
//!         Ok(())
//!     }
//! }
//!
//! let player = Hybrid::new(Player::default())?.into_dynamic();
//! ```
//!
//! # Features
//!
//! - `derive` (default): `#[derive(TagEnum)]`
//! - `profiling`: instrument conversions and dispatch with the `profiling` crate
//! - `profile-with-puffin`: route `profiling` scopes to puffin

pub use hostbridge_core::*;

#[cfg(feature = "derive")]
pub use hostbridge_macros::TagEnum;

pub mod prelude {
    pub use hostbridge_core::{
        BridgeError, Callback, ConversionError, DispatchConfig, Dynamic, FromDynamic,
        Hybrid, HybridObject, IntoDynamic, MethodTable, NativeError, ObjectRef,
        RegistrationError, ScriptError, ScriptFunction, TagEnum,
    };

    #[cfg(feature = "derive")]
    pub use hostbridge_macros::TagEnum;
}
