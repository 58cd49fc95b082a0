//! Dynamic values passed into and returned from stubbed calls.

use std::fmt;

/// An argument or result crossing a stubbed seam.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
	/// Absent value (`None`, unit, null).
	#[default]
	Nil,
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	Str(String),
	/// Ordered list of values.
	List(Vec<Value>),
}

/// The type of a [`Value`], used for type-check matchers and mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
	Nil,
	Bool,
	Int,
	Float,
	Str,
	List,
}

impl ValueKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Nil => "nil",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::Str => "string",
			Self::List => "list",
		}
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Value {
	/// Returns the kind of this value.
	pub fn kind(&self) -> ValueKind {
		match self {
			Value::Nil => ValueKind::Nil,
			Value::Bool(_) => ValueKind::Bool,
			Value::Int(_) => ValueKind::Int,
			Value::Float(_) => ValueKind::Float,
			Value::Str(_) => ValueKind::Str,
			Value::List(_) => ValueKind::List,
		}
	}

	pub fn is_nil(&self) -> bool {
		matches!(self, Value::Nil)
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value if this is a `Float` variant.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `Str` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the list items if this is a `List` variant.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(v) => Some(v),
			_ => None,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Nil => f.write_str("nil"),
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v:?}"),
			Value::Str(v) => write!(f, "{v:?}"),
			Value::List(items) => write!(f, "[{}]", display_args(items)),
		}
	}
}

/// Renders an argument list as a comma separated string for diagnostics.
pub fn display_args(args: &[Value]) -> String {
	args.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(", ")
}

impl From<()> for Value {
	fn from(_: ()) -> Self {
		Value::Nil
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

macro_rules! from_int {
	($($ty:ty),*) => {
		$(impl From<$ty> for Value {
			fn from(v: $ty) -> Self {
				Value::Int(i64::from(v))
			}
		})*
	};
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! from_wide_uint {
	($($ty:ty),*) => {
		$(
		/// Saturates at `i64::MAX`.
		impl From<$ty> for Value {
			fn from(v: $ty) -> Self {
				Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
			}
		})*
	};
}

from_wide_uint!(u64, usize);

impl From<f32> for Value {
	fn from(v: f32) -> Self {
		Value::Float(f64::from(v))
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float(v)
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Str(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Str(v.to_string())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map_or(Value::Nil, Into::into)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(v: Vec<T>) -> Self {
		Value::List(v.into_iter().map(Into::into).collect())
	}
}

/// Types that can be extracted from a [`Value`] returned by a stub.
///
/// Returns `None` when the value has a different shape than the caller expects.
pub trait FromValue: Sized {
	fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for Value {
	fn from_value(value: Value) -> Option<Self> {
		Some(value)
	}
}

impl FromValue for () {
	fn from_value(value: Value) -> Option<Self> {
		value.is_nil().then_some(())
	}
}

impl FromValue for bool {
	fn from_value(value: Value) -> Option<Self> {
		value.as_bool()
	}
}

impl FromValue for i64 {
	fn from_value(value: Value) -> Option<Self> {
		value.as_int()
	}
}

impl FromValue for i32 {
	fn from_value(value: Value) -> Option<Self> {
		value.as_int().and_then(|v| i32::try_from(v).ok())
	}
}

impl FromValue for u32 {
	fn from_value(value: Value) -> Option<Self> {
		value.as_int().and_then(|v| u32::try_from(v).ok())
	}
}

impl FromValue for u64 {
	fn from_value(value: Value) -> Option<Self> {
		value.as_int().and_then(|v| u64::try_from(v).ok())
	}
}

impl FromValue for usize {
	fn from_value(value: Value) -> Option<Self> {
		value.as_int().and_then(|v| usize::try_from(v).ok())
	}
}

impl FromValue for f64 {
	fn from_value(value: Value) -> Option<Self> {
		value.as_float()
	}
}

impl FromValue for String {
	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Str(v) => Some(v),
			_ => None,
		}
	}
}

impl<T: FromValue> FromValue for Option<T> {
	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Nil => Some(None),
			other => T::from_value(other).map(Some),
		}
	}
}

impl<T: FromValue> FromValue for Vec<T> {
	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::List(items) => items.into_iter().map(T::from_value).collect(),
			_ => None,
		}
	}
}

/// Builds a `Vec<Value>` from heterogeneous expressions.
///
/// ```
/// use mimic_stub::{Value, args};
///
/// let args = args!["Alice", 3, None::<i64>];
/// assert_eq!(args, vec![Value::from("Alice"), Value::Int(3), Value::Nil]);
/// ```
#[macro_export]
macro_rules! args {
	() => {
		::std::vec::Vec::<$crate::Value>::new()
	};
	($($arg:expr),+ $(,)?) => {
		::std::vec![$($crate::Value::from($arg)),+]
	};
}
