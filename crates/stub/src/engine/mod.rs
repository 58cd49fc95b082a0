//! Stub resolution.
//!
//! The [`ResolutionEngine`] picks which registered stub answers a call and runs
//! its action.
//!
//! # Resolution Order
//!
//! 1. Stubs that constrain their arguments, most recently registered first
//! 2. Catch-all stubs (no matchers), most recently registered first
//! 3. The caller's [`Fallback`] value, if any
//! 4. [`UnstubbedCall`]
//!
//! Later declarations override earlier ones, so a test can stub a general
//! default and then specialize it without removing anything. Both the scan
//! direction and the catch-all tier are configurable through [`MatchPolicy`].

use serde::Deserialize;

use crate::descriptor::StubDescriptor;
use crate::error::{ResolveError, UnstubbedCall};
use crate::id::FunctionId;
use crate::recorder::{CallRecorder, Discard};
use crate::registry::StubRegistry;
use crate::value::{FromValue, Value, display_args};

#[cfg(test)]
mod tests;

/// Direction in which candidates are scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrder {
	/// Newest stub wins; later declarations override earlier ones.
	#[default]
	MostRecentFirst,
	/// Oldest stub wins.
	FirstRegistered,
}

impl MatchOrder {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::MostRecentFirst => "most_recent_first",
			Self::FirstRegistered => "first_registered",
		}
	}
}

/// Tie-breaking rules applied when several stubs match one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPolicy {
	pub order: MatchOrder,
	/// Scan argument-constrained stubs before any catch-all.
	pub catch_all_last: bool,
}

impl Default for MatchPolicy {
	fn default() -> Self {
		Self {
			order: MatchOrder::MostRecentFirst,
			catch_all_last: true,
		}
	}
}

/// What to do when no stub matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Fallback {
	/// Report an [`UnstubbedCall`].
	#[default]
	None,
	/// Use this value instead.
	Value(Value),
}

impl From<Option<Value>> for Fallback {
	fn from(value: Option<Value>) -> Self {
		value.map_or(Fallback::None, Fallback::Value)
	}
}

/// Selects and executes the winning stub for a call.
///
/// Every resolved call is reported to the recorder before matching, so spies
/// observe calls whether or not a stub exists.
pub struct ResolutionEngine<'r> {
	policy: MatchPolicy,
	recorder: &'r dyn CallRecorder,
}

impl Default for ResolutionEngine<'static> {
	fn default() -> Self {
		Self::new(&Discard)
	}
}

impl<'r> ResolutionEngine<'r> {
	/// Creates an engine with the default policy reporting to `recorder`.
	pub fn new(recorder: &'r dyn CallRecorder) -> Self {
		Self {
			policy: MatchPolicy::default(),
			recorder,
		}
	}

	pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
		self.policy = policy;
		self
	}

	pub fn policy(&self) -> MatchPolicy {
		self.policy
	}

	/// Resolves one call against `registry`.
	///
	/// Returns the winning stub's result, the fallback value when nothing
	/// matched, or [`UnstubbedCall`] naming the function and arguments.
	///
	/// # Panics
	///
	/// Panics if the winning stub has no action configured.
	#[track_caller]
	pub fn resolve(
		&self,
		function: &FunctionId,
		args: &[Value],
		registry: Option<&StubRegistry>,
		fallback: Fallback,
	) -> Result<Value, UnstubbedCall> {
		self.recorder.record(function, args);

		let candidates = registry.map(StubRegistry::candidates).unwrap_or_default();
		if let Some(winner) = self.select(candidates, args) {
			tracing::debug!(
				function = %function,
				stub = %winner,
				"stub selected",
			);
			return Ok(winner.execute(args));
		}

		match fallback {
			Fallback::Value(value) => {
				tracing::debug!(
					function = %function,
					candidates = candidates.len(),
					value = %value,
					"no stub matched; using fallback",
				);
				Ok(value)
			}
			Fallback::None => {
				tracing::warn!(
					function = %function,
					args = %display_args(args),
					candidates = candidates.len(),
					"unstubbed call",
				);
				Err(UnstubbedCall {
					function: function.clone(),
					args: args.to_vec(),
				})
			}
		}
	}

	/// Resolves one call and converts the result to `T`.
	///
	/// Fails with [`ResolveError::TypeMismatch`] if the result has a different
	/// shape than `T`.
	#[track_caller]
	pub fn resolve_as<T: FromValue>(
		&self,
		function: &FunctionId,
		args: &[Value],
		registry: Option<&StubRegistry>,
		fallback: Fallback,
	) -> Result<T, ResolveError> {
		let value = self.resolve(function, args, registry, fallback)?;
		convert(function, value)
	}

	/// Returns the stub that would answer `args`, without running it or
	/// recording the call.
	pub fn select<'a>(
		&self,
		candidates: &'a [StubDescriptor],
		args: &[Value],
	) -> Option<&'a StubDescriptor> {
		if self.policy.catch_all_last {
			self.scan(candidates, args, |d| !d.is_catch_all())
				.or_else(|| self.scan(candidates, args, StubDescriptor::is_catch_all))
		} else {
			self.scan(candidates, args, |_| true)
		}
	}

	fn scan<'a>(
		&self,
		candidates: &'a [StubDescriptor],
		args: &[Value],
		tier: impl Fn(&StubDescriptor) -> bool,
	) -> Option<&'a StubDescriptor> {
		let accepts = |d: &&'a StubDescriptor| {
			if !tier(*d) {
				return false;
			}
			let matched = d.matches_call(args);
			tracing::trace!(stub = %d, matched, "candidate checked");
			matched
		};
		match self.policy.order {
			MatchOrder::MostRecentFirst => candidates.iter().rev().find(accepts),
			MatchOrder::FirstRegistered => candidates.iter().find(accepts),
		}
	}
}

/// Converts a resolved value to the call site's expected type.
pub fn convert<T: FromValue>(function: &FunctionId, value: Value) -> Result<T, ResolveError> {
	T::from_value(value.clone()).ok_or_else(|| ResolveError::TypeMismatch {
		function: function.clone(),
		expected: std::any::type_name::<T>(),
		got: value.kind(),
		value,
	})
}
