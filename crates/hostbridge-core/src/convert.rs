//! Conversion traits between native types and [`Dynamic`] values.
//!
//! Each native type has exactly one conversion pair:
//! - [`FromDynamic`]: extract a native value from a [`Dynamic`]
//! - [`IntoDynamic`]: turn a native value into a [`Dynamic`]
//!
//! Adding a native type means adding its two impls; nothing here changes.
//!
//! ## Scalar Mapping
//!
//! | Native                        | Dynamic                   |
//! |-------------------------------|---------------------------|
//! | `bool`                        | `Bool`                    |
//! | `i8 i16 i32 u8 u16 u32`       | `Number` (truncated, saturating) |
//! | `f32 f64`                     | `Number`                  |
//! | `i64 u64`                     | `BigInt` only             |
//! | `String`, `&str`              | `String`                  |
//! | `Option<T>`                   | `T` or `Undefined`/`Null` |
//! | `()`                          | `Undefined`               |
//!
//! Conversions never coerce between kinds: a `String` handed to an `i32`
//! parameter is a [`ConversionError::TypeMismatch`], not a parse.

use crate::dynamic::Dynamic;
use crate::error::{BridgeError, ConversionError};

/// Extract a native value from a [`Dynamic`].
pub trait FromDynamic: Sized {
    /// Convert the value, failing if its kind does not fit `Self`.
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError>;
}

/// Convert a native value into a [`Dynamic`].
pub trait IntoDynamic {
    fn into_dynamic(self) -> Dynamic;
}

/// Return value of a native function or method.
///
/// Implemented for every [`IntoDynamic`] type, and for `Result<T, E>` so
/// native code can report failures with `?`.
pub trait IntoNativeResult {
    fn into_native_result(self) -> Result<Dynamic, BridgeError>;
}

impl<T: IntoDynamic> IntoNativeResult for T {
    fn into_native_result(self) -> Result<Dynamic, BridgeError> {
        Ok(self.into_dynamic())
    }
}

impl<T, E> IntoNativeResult for Result<T, E>
where
    T: IntoDynamic,
    E: Into<BridgeError>,
{
    fn into_native_result(self) -> Result<Dynamic, BridgeError> {
        self.map(IntoDynamic::into_dynamic).map_err(Into::into)
    }
}

// ============================================================================
// 32-bit and narrower integers <> Number
// ============================================================================

macro_rules! impl_number_int {
    ($($ty:ty),*) => {
        $(
            impl FromDynamic for $ty {
                fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
                    match value {
                        // Truncates toward zero, saturates at the bounds, NaN is 0
                        Dynamic::Number(v) => Ok(*v as $ty),
                        _ => Err(ConversionError::mismatch("number", value)),
                    }
                }
            }

            impl IntoDynamic for $ty {
                fn into_dynamic(self) -> Dynamic {
                    Dynamic::Number(self as f64)
                }
            }
        )*
    };
}

impl_number_int!(i8, i16, i32, u8, u16, u32);

// ============================================================================
// 64-bit integers <> BigInt
// ============================================================================

macro_rules! impl_bigint {
    ($($ty:ty),*) => {
        $(
            impl FromDynamic for $ty {
                fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
                    match value {
                        Dynamic::BigInt(v) => <$ty>::try_from(*v).map_err(|_| {
                            ConversionError::IntegerOverflow {
                                value: v.to_string(),
                                target_type: stringify!($ty),
                            }
                        }),
                        // Number would lose precision above 2^53
                        _ => Err(ConversionError::mismatch("bigint", value)),
                    }
                }
            }

            impl IntoDynamic for $ty {
                fn into_dynamic(self) -> Dynamic {
                    Dynamic::BigInt(i128::from(self))
                }
            }
        )*
    };
}

impl_bigint!(i64, u64);

// ============================================================================
// Floats <> Number
// ============================================================================

impl FromDynamic for f64 {
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Number(v) => Ok(*v),
            _ => Err(ConversionError::mismatch("number", value)),
        }
    }
}

impl IntoDynamic for f64 {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Number(self)
    }
}

impl FromDynamic for f32 {
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Number(v) => Ok(*v as f32),
            _ => Err(ConversionError::mismatch("number", value)),
        }
    }
}

impl IntoDynamic for f32 {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Number(f64::from(self))
    }
}

// ============================================================================
// Bool, strings
// ============================================================================

impl FromDynamic for bool {
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Bool(v) => Ok(*v),
            _ => Err(ConversionError::mismatch("boolean", value)),
        }
    }
}

impl IntoDynamic for bool {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Bool(self)
    }
}

impl FromDynamic for String {
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::String(s) => Ok(s.clone()),
            _ => Err(ConversionError::mismatch("string", value)),
        }
    }
}

impl IntoDynamic for String {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::String(self)
    }
}

impl IntoDynamic for &str {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::String(self.to_string())
    }
}

// ============================================================================
// Unit (void)
// ============================================================================

/// Void results are discarded, whatever the script returned.
impl FromDynamic for () {
    fn from_dynamic(_value: &Dynamic) -> Result<Self, ConversionError> {
        Ok(())
    }
}

impl IntoDynamic for () {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Undefined
    }
}

// ============================================================================
// Optional
// ============================================================================

impl<T: FromDynamic> FromDynamic for Option<T> {
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        if value.is_nullish() {
            Ok(None)
        } else {
            T::from_dynamic(value).map(Some)
        }
    }
}

impl<T: IntoDynamic> IntoDynamic for Option<T> {
    fn into_dynamic(self) -> Dynamic {
        match self {
            Some(inner) => inner.into_dynamic(),
            None => Dynamic::Undefined,
        }
    }
}

// ============================================================================
// Untyped pass-through
// ============================================================================

impl FromDynamic for Dynamic {
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl IntoDynamic for Dynamic {
    fn into_dynamic(self) -> Dynamic {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Integer tests
    // ========================================================================

    #[test]
    fn from_dynamic_i32() {
        assert_eq!(i32::from_dynamic(&Dynamic::Number(42.0)).unwrap(), 42);
        assert_eq!(i32::from_dynamic(&Dynamic::Number(-7.0)).unwrap(), -7);
        assert!(matches!(
            i32::from_dynamic(&Dynamic::String("42".into())),
            Err(ConversionError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn from_dynamic_int_truncates_toward_zero() {
        assert_eq!(i32::from_dynamic(&Dynamic::Number(2.9)).unwrap(), 2);
        assert_eq!(i32::from_dynamic(&Dynamic::Number(-2.9)).unwrap(), -2);
        assert_eq!(u8::from_dynamic(&Dynamic::Number(255.99)).unwrap(), 255);
    }

    #[test]
    fn from_dynamic_int_never_fails_on_content() {
        assert_eq!(i8::from_dynamic(&Dynamic::Number(128.0)).unwrap(), i8::MAX);
        assert_eq!(u32::from_dynamic(&Dynamic::Number(-1.0)).unwrap(), 0);
        assert_eq!(i32::from_dynamic(&Dynamic::Number(3e10)).unwrap(), i32::MAX);
        assert_eq!(i32::from_dynamic(&Dynamic::Number(f64::NAN)).unwrap(), 0);
        assert_eq!(
            i16::from_dynamic(&Dynamic::Number(f64::NEG_INFINITY)).unwrap(),
            i16::MIN
        );
    }

    #[test]
    fn from_dynamic_small_negative_fraction_is_zero() {
        // -0.5 truncates to -0.0, which is within u32 range
        assert_eq!(u32::from_dynamic(&Dynamic::Number(-0.5)).unwrap(), 0);
    }

    #[test]
    fn into_dynamic_ints() {
        assert_eq!(42i32.into_dynamic(), Dynamic::Number(42.0));
        assert_eq!(u32::MAX.into_dynamic(), Dynamic::Number(4294967295.0));
        assert_eq!((-128i8).into_dynamic(), Dynamic::Number(-128.0));
    }

    // ========================================================================
    // 64-bit tests
    // ========================================================================

    #[test]
    fn i64_requires_bigint() {
        assert_eq!(
            i64::from_dynamic(&Dynamic::BigInt(i64::MIN as i128)).unwrap(),
            i64::MIN
        );
        assert!(matches!(
            i64::from_dynamic(&Dynamic::Number(1.0)),
            Err(ConversionError::TypeMismatch {
                expected: "bigint",
                actual: "number"
            })
        ));
    }

    #[test]
    fn u64_full_range_is_exact() {
        let value = u64::MAX.into_dynamic();
        assert_eq!(value, Dynamic::BigInt(u64::MAX as i128));
        assert_eq!(u64::from_dynamic(&value).unwrap(), u64::MAX);
    }

    #[test]
    fn bigint_out_of_range() {
        assert!(matches!(
            u64::from_dynamic(&Dynamic::BigInt(-1)),
            Err(ConversionError::IntegerOverflow { .. })
        ));
        assert!(matches!(
            i64::from_dynamic(&Dynamic::BigInt(u64::MAX as i128)),
            Err(ConversionError::IntegerOverflow { .. })
        ));
    }

    // ========================================================================
    // Float, bool, string tests
    // ========================================================================

    #[test]
    fn floats_from_number_only() {
        assert_eq!(f64::from_dynamic(&Dynamic::Number(0.1)).unwrap(), 0.1);
        assert_eq!(f32::from_dynamic(&Dynamic::Number(1.5)).unwrap(), 1.5f32);
        assert!(f64::from_dynamic(&Dynamic::BigInt(1)).is_err());
        assert!(f64::from_dynamic(&Dynamic::Bool(true)).is_err());
    }

    #[test]
    fn bool_is_not_coerced() {
        assert!(bool::from_dynamic(&Dynamic::Bool(true)).unwrap());
        assert!(bool::from_dynamic(&Dynamic::Number(1.0)).is_err());
        assert!(bool::from_dynamic(&Dynamic::Undefined).is_err());
    }

    #[test]
    fn strings() {
        assert_eq!(
            String::from_dynamic(&Dynamic::String("héllo".into())).unwrap(),
            "héllo"
        );
        assert_eq!("world".into_dynamic(), Dynamic::String("world".into()));
        assert!(String::from_dynamic(&Dynamic::Null).is_err());
    }

    // ========================================================================
    // Optional, unit, pass-through
    // ========================================================================

    #[test]
    fn optional_absence() {
        assert_eq!(Option::<i32>::from_dynamic(&Dynamic::Null).unwrap(), None);
        assert_eq!(
            Option::<i32>::from_dynamic(&Dynamic::Undefined).unwrap(),
            None
        );
        assert_eq!(Option::<i32>::None.into_dynamic(), Dynamic::Undefined);
    }

    #[test]
    fn optional_presence() {
        assert_eq!(
            Option::<i32>::from_dynamic(&Dynamic::Number(3.0)).unwrap(),
            Some(3)
        );
        assert_eq!(Some("a").into_dynamic(), Dynamic::String("a".into()));
        assert!(Option::<i32>::from_dynamic(&Dynamic::Bool(true)).is_err());
    }

    #[test]
    fn unit_discards() {
        assert!(<()>::from_dynamic(&Dynamic::Number(5.0)).is_ok());
        assert_eq!(().into_dynamic(), Dynamic::Undefined);
    }

    #[test]
    fn native_result_adapter() {
        let ok: Result<i32, BridgeError> = Ok(1);
        assert_eq!(ok.into_native_result().unwrap(), Dynamic::Number(1.0));

        let failed: Result<i32, crate::NativeError> = Err("bad index".into());
        assert!(matches!(
            failed.into_native_result(),
            Err(BridgeError::NativeFailure { .. })
        ));

        assert_eq!(true.into_native_result().unwrap(), Dynamic::Bool(true));
    }

    #[test]
    fn scalar_round_trips() {
        assert_eq!(i32::from_dynamic(&i32::MIN.into_dynamic()).unwrap(), i32::MIN);
        assert_eq!(u16::from_dynamic(&u16::MAX.into_dynamic()).unwrap(), u16::MAX);
        assert_eq!(i64::from_dynamic(&i64::MAX.into_dynamic()).unwrap(), i64::MAX);
        assert_eq!(f64::from_dynamic(&(-0.25f64).into_dynamic()).unwrap(), -0.25);
        assert!(!bool::from_dynamic(&false.into_dynamic()).unwrap());
        assert_eq!(
            String::from_dynamic(&String::from("x").into_dynamic()).unwrap(),
            "x"
        );
    }
}
