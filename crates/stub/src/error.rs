use crate::id::FunctionId;
use crate::value::{Value, ValueKind, display_args};

/// No stub matched a call and the caller supplied no fallback.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("no stub for `{function}` matched call ({})", display_args(.args))]
pub struct UnstubbedCall {
	pub function: FunctionId,
	pub args: Vec<Value>,
}

/// Recoverable resolution failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
	#[error(transparent)]
	Unstubbed(#[from] UnstubbedCall),

	/// The winning stub produced a value of the wrong shape for the call site.
	#[error("stub for `{function}` returned {got} ({value}), expected {expected}")]
	TypeMismatch {
		function: FunctionId,
		expected: &'static str,
		got: ValueKind,
		value: Value,
	},
}
