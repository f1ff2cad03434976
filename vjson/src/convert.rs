//! Typed conversions out of a [`Value`], behind [`Value::to`] and [`Value::is`].

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::Result;
use crate::value::Value;
use crate::variant::Variant;

/// A Rust type that can be read out of a [`Value`].
///
/// [`from_value`](FromValue::from_value) applies the same coercions as the `as_*` accessors;
/// [`is`](FromValue::is) answers whether the value holds that type without loss.
pub trait FromValue: Sized {
    /// Returns `true` if `value` holds this type exactly or in range.
    fn is(value: &Value) -> bool;

    /// Converts, coercing where a rule exists.
    fn from_value(value: &Value) -> Result<Self>;
}

impl FromValue for bool {
    fn is(value: &Value) -> bool {
        value.is_bool()
    }

    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.as_bool())
    }
}

macro_rules! integer {
    ($ty:ty, $accessor:ident) => {
        impl FromValue for $ty {
            fn is(value: &Value) -> bool {
                match value.var {
                    Variant::I64(n) => <$ty>::try_from(n).is_ok(),
                    Variant::U64(n) => <$ty>::try_from(n).is_ok(),
                    _ => false,
                }
            }

            fn from_value(value: &Value) -> Result<Self> {
                value.$accessor()
            }
        }
    };
}

integer!(i64, as_i64);
integer!(u64, as_u64);
integer!(i32, as_i32);
integer!(u32, as_u32);

impl FromValue for f64 {
    fn is(value: &Value) -> bool {
        value.is_number()
    }

    fn from_value(value: &Value) -> Result<Self> {
        value.as_f64()
    }
}

impl FromValue for String {
    fn is(value: &Value) -> bool {
        value.is_string()
    }

    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.as_string())
    }
}

impl FromValue for Value {
    fn is(_: &Value) -> bool {
        true
    }

    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn is(value: &Value) -> bool {
        value
            .elements()
            .is_ok_and(|mut elements| elements.all(T::is))
    }

    fn from_value(value: &Value) -> Result<Self> {
        value.as_vec()
    }
}
