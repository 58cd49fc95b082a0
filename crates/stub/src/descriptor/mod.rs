//! Single registered stub.

use std::fmt;

use smallvec::SmallVec;

use crate::action::Action;
use crate::id::FunctionId;
use crate::matcher::Matcher;
use crate::value::Value;


/// One stub for one function: positional matchers plus the action to run.
///
/// An empty matcher list makes the descriptor a catch-all that accepts any
/// argument list, whatever its arity. Descriptors are configured during test
/// setup and only read once the system under test is exercised.
#[derive(Debug, Clone)]
pub struct StubDescriptor {
	function: FunctionId,
	matchers: SmallVec<[Matcher; 4]>,
	action: Option<Action>,
}

impl StubDescriptor {
	/// Creates an unconfigured catch-all descriptor for `function`.
	pub fn new(function: impl Into<FunctionId>) -> Self {
		Self {
			function: function.into(),
			matchers: SmallVec::new(),
			action: None,
		}
	}

	pub fn function(&self) -> &FunctionId {
		&self.function
	}

	pub fn matchers(&self) -> &[Matcher] {
		&self.matchers
	}

	pub fn action(&self) -> Option<&Action> {
		self.action.as_ref()
	}

	/// Returns true if no argument matchers were configured.
	pub fn is_catch_all(&self) -> bool {
		self.matchers.is_empty()
	}

	/// Appends positional matchers. Repeated calls keep appending in order.
	pub fn with_arguments<I>(&mut self, matchers: I) -> &mut Self
	where
		I: IntoIterator<Item = Matcher>,
	{
		self.matchers.extend(matchers);
		self
	}

	/// Sets the action, replacing any previously configured one.
	pub fn set_action(&mut self, action: Action) -> &mut Self {
		if let Some(previous) = self.action.replace(action) {
			tracing::trace!(
				function = %self.function,
				previous = %previous,
				"stub action overwritten",
			);
		}
		self
	}

	/// Returns true if this descriptor accepts `args`.
	///
	/// Arity mismatch is a non-match, never an error.
	pub fn matches_call(&self, args: &[Value]) -> bool {
		if self.matchers.is_empty() {
			return true;
		}
		self.matchers.len() == args.len()
			&& self.matchers.iter().zip(args).all(|(m, arg)| m.matches(arg))
	}

	/// Runs the configured action for `args`.
	///
	/// # Panics
	///
	/// Panics if no action was configured. An unfinished stub is a mistake in
	/// test setup, not a condition the caller can recover from.
	#[track_caller]
	pub fn execute(&self, args: &[Value]) -> Value {
		match &self.action {
			Some(action) => action.run(args),
			None => missing_action(&self.function, args),
		}
	}

	/// Human-readable summary for failure messages.
	pub fn describe(&self) -> String {
		self.to_string()
	}
}

#[cold]
#[track_caller]
fn missing_action(function: &FunctionId, args: &[Value]) -> ! {
	tracing::error!(
		function = %function,
		args = %crate::value::display_args(args),
		"stub invoked without an action",
	);
	panic!("stub for `{function}` has no action configured; finish it with `and_return` or `and_do`")
}

impl fmt::Display for StubDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}(", self.function)?;
		if self.matchers.is_empty() {
			f.write_str("..")?;
		} else {
			for (i, m) in self.matchers.iter().enumerate() {
				if i > 0 {
					f.write_str(", ")?;
				}
				write!(f, "{m}")?;
			}
		}
		match &self.action {
			Some(action) => write!(f, ") -> {action}"),
			None => f.write_str(") -> <no action>"),
		}
	}
}
