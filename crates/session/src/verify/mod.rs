//! Spy assertions over recorded calls.
//!
//! Every check returns a [`VerifyError`] describing the expectation alongside
//! the calls actually recorded, so test failures read without a debugger.

use mimic_stub::{CallRecord, FunctionId, Matcher, StubDescriptor};


/// A failed spy assertion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
	#[error("expected `{function}` to be called, but it never was")]
	NeverCalled { function: FunctionId },

	#[error("expected `{function}` never to be called, but it was called {count} time(s):{calls}")]
	Called {
		function: FunctionId,
		count: usize,
		calls: String,
	},

	#[error("expected `{function}` to be called {expected} time(s), but it was called {actual} time(s):{calls}")]
	WrongCount {
		function: FunctionId,
		expected: String,
		actual: usize,
		calls: String,
	},

	#[error("expected `{function}` to be called with ({expected}), but no recorded call matched:{calls}")]
	NoMatchingCall {
		function: FunctionId,
		expected: String,
		calls: String,
	},

	#[error("expected call #{index} of `{function}` to be ({expected}), but it was {actual}")]
	NthCallMismatch {
		function: FunctionId,
		index: usize,
		expected: String,
		actual: String,
	},
}

/// Recorded calls to one function, ready for assertions.
#[derive(Debug, Clone)]
pub struct Verification {
	function: FunctionId,
	calls: Vec<CallRecord>,
}

impl Verification {
	pub(crate) fn new(function: FunctionId, calls: Vec<CallRecord>) -> Self {
		Self { function, calls }
	}

	pub fn count(&self) -> usize {
		self.calls.len()
	}

	pub fn calls(&self) -> &[CallRecord] {
		&self.calls
	}

	/// At least one call was recorded.
	pub fn called(&self) -> Result<(), VerifyError> {
		if self.calls.is_empty() {
			return Err(VerifyError::NeverCalled {
				function: self.function.clone(),
			});
		}
		Ok(())
	}

	pub fn never_called(&self) -> Result<(), VerifyError> {
		if self.calls.is_empty() {
			return Ok(());
		}
		Err(VerifyError::Called {
			function: self.function.clone(),
			count: self.calls.len(),
			calls: self.listing(),
		})
	}

	/// Exactly `n` calls were recorded.
	pub fn times(&self, n: usize) -> Result<(), VerifyError> {
		if self.calls.len() == n {
			return Ok(());
		}
		Err(self.wrong_count(n.to_string()))
	}

	pub fn at_least(&self, n: usize) -> Result<(), VerifyError> {
		if self.calls.len() >= n {
			return Ok(());
		}
		Err(self.wrong_count(format!("at least {n}")))
	}

	/// Some recorded call satisfies `matchers` positionally.
	///
	/// An empty matcher list accepts any call, mirroring catch-all stubs.
	pub fn called_with<I>(&self, matchers: I) -> Result<(), VerifyError>
	where
		I: IntoIterator<Item = Matcher>,
	{
		let pattern = self.pattern(matchers);
		if self.calls.iter().any(|c| pattern.matches_call(&c.args)) {
			return Ok(());
		}
		Err(VerifyError::NoMatchingCall {
			function: self.function.clone(),
			expected: expected_args(&pattern),
			calls: self.listing(),
		})
	}

	/// The call at zero-based `index` satisfies `matchers`.
	pub fn nth_call_with<I>(&self, index: usize, matchers: I) -> Result<(), VerifyError>
	where
		I: IntoIterator<Item = Matcher>,
	{
		let pattern = self.pattern(matchers);
		let actual = match self.calls.get(index) {
			Some(call) if pattern.matches_call(&call.args) => return Ok(()),
			Some(call) => call.to_string(),
			None => format!("never made ({} call(s) recorded)", self.calls.len()),
		};
		Err(VerifyError::NthCallMismatch {
			function: self.function.clone(),
			index,
			expected: expected_args(&pattern),
			actual,
		})
	}

	fn pattern<I>(&self, matchers: I) -> StubDescriptor
	where
		I: IntoIterator<Item = Matcher>,
	{
		let mut pattern = StubDescriptor::new(&self.function);
		pattern.with_arguments(matchers);
		pattern
	}

	fn wrong_count(&self, expected: String) -> VerifyError {
		VerifyError::WrongCount {
			function: self.function.clone(),
			expected,
			actual: self.calls.len(),
			calls: self.listing(),
		}
	}

	fn listing(&self) -> String {
		self.calls.iter().map(|c| format!("\n  {c}")).collect()
	}
}

fn expected_args(pattern: &StubDescriptor) -> String {
	if pattern.is_catch_all() {
		return "..".to_string();
	}
	pattern
		.matchers()
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(", ")
}
