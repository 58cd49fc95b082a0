use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Callback producing a stub result from the full argument list.
pub type ComputeFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// What a stub does when it wins resolution.
#[derive(Clone)]
pub enum Action {
	/// Hand back a fixed value, ignoring the arguments.
	Return(Value),
	/// Invoke a callback with the call's arguments. Evaluated only when the stub wins.
	Compute(ComputeFn),
}

impl Action {
	pub fn returning(value: impl Into<Value>) -> Self {
		Self::Return(value.into())
	}

	pub fn compute<F, R>(f: F) -> Self
	where
		F: Fn(&[Value]) -> R + Send + Sync + 'static,
		R: Into<Value>,
	{
		Self::Compute(Arc::new(move |args| f(args).into()))
	}

	/// Produces this action's result for `args`.
	pub fn run(&self, args: &[Value]) -> Value {
		match self {
			Self::Return(value) => value.clone(),
			Self::Compute(f) => f(args),
		}
	}
}

impl fmt::Debug for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Return(v) => f.debug_tuple("Action::Return").field(v).finish(),
			Self::Compute(_) => f.write_str("Action::Compute(..)"),
		}
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Return(v) => write!(f, "return {v}"),
			Self::Compute(_) => f.write_str("compute(..)"),
		}
	}
}
