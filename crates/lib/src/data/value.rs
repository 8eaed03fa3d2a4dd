//! Scalar values read from a document.
//!
//! A [`Value`] is one datum taken from the document tree (an attribute, a
//! flat element or a node's text content) together with the [`Location`] it
//! was read from. Values are never modified after the source produced them;
//! all coercions are pure and report failures with the recorded location.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{DataError, Location};
use crate::constants::DEFAULT_DATE_FORMAT;

/// The raw datum carried by a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raw {
    /// Text as it appeared in the document
    Text(String),
    /// A native boolean (JSON sources keep these)
    Bool(bool),
}

/// Target types of scalar coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Int,
    Float,
    Decimal,
    Bool,
}

impl ScalarType {
    /// The name used for this type in diagnostics and configuration
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Decimal => "decimal",
            ScalarType::Bool => "bool",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarType {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" | "str" => Ok(ScalarType::String),
            "int" | "integer" => Ok(ScalarType::Int),
            "float" | "double" => Ok(ScalarType::Float),
            "decimal" => Ok(ScalarType::Decimal),
            "bool" | "boolean" => Ok(ScalarType::Bool),
            other => Err(DataError::UnsupportedType {
                name: other.to_string(),
            }),
        }
    }
}

/// The result of [`Value::cast`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Bool(bool),
}

/// Rust types a primitive property can be declared as.
///
/// `TYPE` selects the coercion; `from_scalar` narrows the coerced scalar to
/// the concrete type and returns `None` when it does not fit (e.g. an `i64`
/// that overflows `u32`).
pub trait Primitive: Sized + 'static {
    const TYPE: ScalarType;

    fn from_scalar(scalar: Scalar) -> Option<Self>;
}

impl Primitive for String {
    const TYPE: ScalarType = ScalarType::String;

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Primitive for bool {
    const TYPE: ScalarType = ScalarType::Bool;

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl Primitive for f64 {
    const TYPE: ScalarType = ScalarType::Float;

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Float(n) => Some(n),
            _ => None,
        }
    }
}

impl Primitive for Decimal {
    const TYPE: ScalarType = ScalarType::Decimal;

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Decimal(d) => Some(d),
            _ => None,
        }
    }
}

macro_rules! impl_integer_primitive {
    ($($ty:ty),*) => {
        $(
            impl Primitive for $ty {
                const TYPE: ScalarType = ScalarType::Int;

                fn from_scalar(scalar: Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::Int(n) => <$ty>::try_from(n).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_integer_primitive!(i64, i32, u32, u64, usize);

/// A single scalar datum and the location it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    raw: Raw,
    location: Location,
}

impl Value {
    /// Creates a text value.
    pub fn text(text: impl Into<String>, location: Location) -> Self {
        Self {
            raw: Raw::Text(text.into()),
            location,
        }
    }

    /// Creates a native boolean value.
    pub fn bool(value: bool, location: Location) -> Self {
        Self {
            raw: Raw::Bool(value),
            location,
        }
    }

    /// The raw datum.
    pub fn raw(&self) -> &Raw {
        &self.raw
    }

    /// Where this value was read from.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Returns true for empty (or whitespace-only) text.
    pub fn is_empty(&self) -> bool {
        match &self.raw {
            Raw::Text(s) => s.trim().is_empty(),
            Raw::Bool(_) => false,
        }
    }

    /// Interprets the value as a floating point number.
    pub fn to_number(&self) -> Result<f64, DataError> {
        match &self.raw {
            Raw::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .ok_or_else(|| self.invalid(ScalarType::Float.name())),
            Raw::Bool(_) => Err(self.invalid(ScalarType::Float.name())),
        }
    }

    /// Interprets the value as a signed integer.
    pub fn to_int(&self) -> Result<i64, DataError> {
        match &self.raw {
            Raw::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| self.invalid(ScalarType::Int.name())),
            Raw::Bool(_) => Err(self.invalid(ScalarType::Int.name())),
        }
    }

    /// Interprets the value as an exact decimal number.
    pub fn to_decimal(&self) -> Result<Decimal, DataError> {
        match &self.raw {
            Raw::Text(s) => {
                let s = s.trim();
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .map_err(|_| self.invalid(ScalarType::Decimal.name()))
            }
            Raw::Bool(_) => Err(self.invalid(ScalarType::Decimal.name())),
        }
    }

    /// Interprets the value as a boolean (`true`/`false`/`1`/`0`).
    pub fn to_bool(&self) -> Result<bool, DataError> {
        match &self.raw {
            Raw::Bool(b) => Ok(*b),
            Raw::Text(s) => match s.trim() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(self.invalid(ScalarType::Bool.name())),
            },
        }
    }

    /// Interprets the value as a calendar date in the default `YYYY-MM-DD` format.
    ///
    /// Empty values yield `Ok(None)`; present but malformed values fail.
    pub fn to_date(&self) -> Result<Option<NaiveDate>, DataError> {
        self.to_date_with(DEFAULT_DATE_FORMAT)
    }

    /// Like [`Value::to_date`] with an explicit chrono format string.
    pub fn to_date_with(&self, format: &str) -> Result<Option<NaiveDate>, DataError> {
        if self.is_empty() {
            return Ok(None);
        }
        match &self.raw {
            Raw::Text(s) => NaiveDate::parse_from_str(s.trim(), format)
                .map(Some)
                .map_err(|_| self.invalid("date")),
            Raw::Bool(_) => Err(self.invalid("date")),
        }
    }

    /// Coerces the value to the given scalar type.
    pub fn cast(&self, ty: ScalarType) -> Result<Scalar, DataError> {
        match ty {
            ScalarType::String => Ok(Scalar::String(self.to_string())),
            ScalarType::Int => self.to_int().map(Scalar::Int),
            ScalarType::Float => self.to_number().map(Scalar::Float),
            ScalarType::Decimal => self.to_decimal().map(Scalar::Decimal),
            ScalarType::Bool => self.to_bool().map(Scalar::Bool),
        }
    }

    /// Coerces the value to a type given by name, as found in configuration.
    pub fn cast_named(&self, type_name: &str) -> Result<Scalar, DataError> {
        self.cast(type_name.parse()?)
    }

    /// Coerces the value straight into a [`Primitive`] Rust type.
    pub fn to_primitive<P: Primitive>(&self) -> Result<P, DataError> {
        P::from_scalar(self.cast(P::TYPE)?).ok_or_else(|| self.invalid(std::any::type_name::<P>()))
    }

    pub(crate) fn invalid(&self, expected: &str) -> DataError {
        DataError::InvalidFormat {
            expected: expected.to_string(),
            value: self.to_string(),
            path: self.location.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Raw::Text(s) => f.write_str(s),
            Raw::Bool(b) => write!(f, "{b}"),
        }
    }
}
