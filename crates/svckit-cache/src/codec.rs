//! Conversion between typed values and the flat strings stored in Redis.
//!
//! Scalars map directly to text: strings verbatim, booleans as
//! `"true"`/`"false"`, integers in decimal, floats in shortest `%g` form and
//! byte sequences reinterpreted as text. Everything else (structs, maps,
//! non-byte sequences) is JSON, opted into through the [`Json`] wrapper.
//!
//! Dispatch is resolved at compile time through [`ToWire`] and [`FromWire`].
//! [`Value`] covers the places where the shape is only known at runtime.
//!
//! Decoding numbers is deliberately lenient: text that does not parse as the
//! target type decodes to zero instead of failing. Callers rely on this
//! default-zero behavior, so it must not be turned into an error.

use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use svckit_core::error::{AppError, ErrorKind};

/// Errors produced while encoding or decoding wire values.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value was an empty reference, or the wire text was empty.
    #[error("empty input")]
    EmptyInput,
    /// JSON encoding or decoding of a composite value failed.
    #[error("JSON marshal error: {0}")]
    Marshal(#[from] serde_json::Error),
    /// A byte payload is not valid UTF-8 and cannot become a wire string.
    #[error("byte payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

impl From<CodecError> for AppError {
    fn from(err: CodecError) -> Self {
        let kind = match err {
            CodecError::EmptyInput => ErrorKind::Validation,
            CodecError::Marshal(_) | CodecError::InvalidUtf8(_) => ErrorKind::Serialization,
        };
        AppError::with_source(kind, format!("Codec error: {err}"), err)
    }
}

/// A value that can be written to the store as a wire string.
pub trait ToWire {
    /// Encode `self` into its wire string.
    fn to_wire(&self) -> Result<String, CodecError>;
}

/// A value that can be rebuilt from a wire string.
///
/// Implementations assume non-empty input; go through [`decode_value`] to get
/// the empty-text check.
pub trait FromWire: Sized {
    /// Decode a non-empty wire string.
    fn from_wire(text: &str) -> Result<Self, CodecError>;
}

/// Encode any [`ToWire`] value.
pub fn encode<T: ToWire + ?Sized>(value: &T) -> Result<String, CodecError> {
    value.to_wire()
}

/// Decode a wire string into `T`. Empty text fails with [`CodecError::EmptyInput`].
pub fn decode_value<T: FromWire>(text: &str) -> Result<T, CodecError> {
    if text.is_empty() {
        return Err(CodecError::EmptyInput);
    }
    T::from_wire(text)
}

/// Decode every element with [`decode_value`], stopping at the first failure.
pub fn decode_array<T, S>(texts: &[S]) -> Result<Vec<T>, CodecError>
where
    T: FromWire,
    S: AsRef<str>,
{
    texts.iter().map(|t| decode_value(t.as_ref())).collect()
}

// ── Strings ────────────────────────────────────────────────

impl ToWire for str {
    fn to_wire(&self) -> Result<String, CodecError> {
        Ok(self.to_owned())
    }
}

impl ToWire for String {
    fn to_wire(&self) -> Result<String, CodecError> {
        Ok(self.clone())
    }
}

impl FromWire for String {
    fn from_wire(text: &str) -> Result<Self, CodecError> {
        Ok(text.to_owned())
    }
}

// ── Booleans ───────────────────────────────────────────────

impl ToWire for bool {
    fn to_wire(&self) -> Result<String, CodecError> {
        let text = if *self { "true" } else { "false" };
        Ok(text.to_string())
    }
}

impl FromWire for bool {
    fn from_wire(text: &str) -> Result<Self, CodecError> {
        Ok(text.eq_ignore_ascii_case("true") || text == "1")
    }
}

// ── Integers ───────────────────────────────────────────────

macro_rules! impl_integer_wire {
    ($($t:ty),* $(,)?) => {$(
        impl ToWire for $t {
            fn to_wire(&self) -> Result<String, CodecError> {
                Ok(self.to_string())
            }
        }

        impl FromWire for $t {
            /// Unparseable or out-of-range text decodes to zero.
            fn from_wire(text: &str) -> Result<Self, CodecError> {
                Ok(text.parse().unwrap_or(0))
            }
        }
    )*};
}

impl_integer_wire!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// ── Floats ─────────────────────────────────────────────────

/// Smallest decimal exponent written in exponent form.
const FLOAT_EXP_MAX: i32 = 6;
/// Decimal exponents below this are written in exponent form.
const FLOAT_EXP_MIN: i32 = -4;

/// Shape shortest-digit float text the way `%g` does.
///
/// `scientific` is the `{:e}` rendering; `plain` produces the `{}` rendering
/// used when the exponent is inside `[FLOAT_EXP_MIN, FLOAT_EXP_MAX)`.
fn format_g(scientific: &str, plain: impl FnOnce() -> String) -> String {
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return plain();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return plain();
    };
    if (FLOAT_EXP_MIN..FLOAT_EXP_MAX).contains(&exp) {
        return plain();
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

macro_rules! impl_float_wire {
    ($($t:ty),* $(,)?) => {$(
        impl ToWire for $t {
            fn to_wire(&self) -> Result<String, CodecError> {
                let text = if self.is_nan() {
                    "NaN".to_string()
                } else if self.is_infinite() {
                    let sign = if self.is_sign_positive() { '+' } else { '-' };
                    format!("{sign}Inf")
                } else {
                    format_g(&format!("{self:e}"), || self.to_string())
                };
                Ok(text)
            }
        }

        impl FromWire for $t {
            /// Unparseable text decodes to zero.
            fn from_wire(text: &str) -> Result<Self, CodecError> {
                Ok(text.parse().unwrap_or(0.0))
            }
        }
    )*};
}

impl_float_wire!(f32, f64);

// ── Byte sequences ─────────────────────────────────────────

impl ToWire for [u8] {
    fn to_wire(&self) -> Result<String, CodecError> {
        Ok(std::str::from_utf8(self)?.to_owned())
    }
}

impl ToWire for Vec<u8> {
    fn to_wire(&self) -> Result<String, CodecError> {
        self.as_slice().to_wire()
    }
}

impl FromWire for Vec<u8> {
    fn from_wire(text: &str) -> Result<Self, CodecError> {
        Ok(text.as_bytes().to_vec())
    }
}

// ── References ─────────────────────────────────────────────

impl<T: ToWire + ?Sized> ToWire for &T {
    fn to_wire(&self) -> Result<String, CodecError> {
        (**self).to_wire()
    }
}

impl<T: ToWire + ?Sized> ToWire for Box<T> {
    fn to_wire(&self) -> Result<String, CodecError> {
        (**self).to_wire()
    }
}

impl<T: ToWire + ?Sized> ToWire for Arc<T> {
    fn to_wire(&self) -> Result<String, CodecError> {
        (**self).to_wire()
    }
}

impl<T: ToWire + ?Sized> ToWire for Rc<T> {
    fn to_wire(&self) -> Result<String, CodecError> {
        (**self).to_wire()
    }
}

/// `None` is an empty reference and fails with [`CodecError::EmptyInput`].
impl<T: ToWire> ToWire for Option<T> {
    fn to_wire(&self) -> Result<String, CodecError> {
        match self {
            Some(value) => value.to_wire(),
            None => Err(CodecError::EmptyInput),
        }
    }
}

// ── Composites ─────────────────────────────────────────────

/// Marks a composite value that travels as JSON.
///
/// Wrap structs, maps, and non-byte sequences in `Json` to store them, and
/// decode into `Json<T>` to read them back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Unwrap the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Serialize> ToWire for Json<T> {
    fn to_wire(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

impl<T: DeserializeOwned> FromWire for Json<T> {
    fn from_wire(text: &str) -> Result<Self, CodecError> {
        Ok(Json(serde_json::from_str(text)?))
    }
}

impl ToWire for serde_json::Value {
    fn to_wire(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromWire for serde_json::Value {
    fn from_wire(text: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(text)?)
    }
}

// ── Dynamic values ─────────────────────────────────────────

/// The shape of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// UTF-8 text.
    String,
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// Floating-point number.
    Float,
    /// Raw bytes.
    Bytes,
    /// JSON document.
    Composite,
}

/// A wire value whose shape is only known at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text.
    String(String),
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating-point number.
    Float(f64),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// JSON document.
    Composite(serde_json::Value),
}

impl Value {
    /// The variant tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Uint(_) => ValueKind::Uint,
            Self::Float(_) => ValueKind::Float,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Composite(_) => ValueKind::Composite,
        }
    }

    /// Encode this value to its wire string.
    pub fn encode(&self) -> Result<String, CodecError> {
        self.to_wire()
    }

    /// Decode `text` as a value of the given shape.
    pub fn decode(text: &str, kind: ValueKind) -> Result<Self, CodecError> {
        Ok(match kind {
            ValueKind::String => Self::String(decode_value(text)?),
            ValueKind::Bool => Self::Bool(decode_value(text)?),
            ValueKind::Int => Self::Int(decode_value(text)?),
            ValueKind::Uint => Self::Uint(decode_value(text)?),
            ValueKind::Float => Self::Float(decode_value(text)?),
            ValueKind::Bytes => Self::Bytes(decode_value(text)?),
            ValueKind::Composite => Self::Composite(decode_value(text)?),
        })
    }
}

impl ToWire for Value {
    fn to_wire(&self) -> Result<String, CodecError> {
        match self {
            Self::String(v) => v.to_wire(),
            Self::Bool(v) => v.to_wire(),
            Self::Int(v) => v.to_wire(),
            Self::Uint(v) => v.to_wire(),
            Self::Float(v) => v.to_wire(),
            Self::Bytes(v) => v.to_wire(),
            Self::Composite(v) => v.to_wire(),
        }
    }
}

macro_rules! impl_value_from {
    ($variant:ident: $($t:ty => $conv:expr),* $(,)?) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::$variant($conv(v))
            }
        }
    )*};
}

impl_value_from!(String: String => |v| v, &str => str::to_owned);
impl_value_from!(Bool: bool => |v| v);
impl_value_from!(Int: i8 => i64::from, i16 => i64::from, i32 => i64::from, i64 => |v| v);
impl_value_from!(Uint: u8 => u64::from, u16 => u64::from, u32 => u64::from, u64 => |v| v);
impl_value_from!(Float: f32 => f64::from, f64 => |v| v);
impl_value_from!(Bytes: Vec<u8> => |v| v, &[u8] => <[u8]>::to_vec);
impl_value_from!(Composite: serde_json::Value => |v| v);
