//! Call recording for spy assertions.

use std::fmt;

use parking_lot::Mutex;

use crate::id::FunctionId;
use crate::value::{Value, display_args};

/// One observed call to a stubbed seam.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
	pub function: FunctionId,
	pub args: Vec<Value>,
}

impl fmt::Display for CallRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}({})", self.function, display_args(&self.args))
	}
}

/// Receives every resolved call, matched or not.
///
/// Recorders observe; they never influence which stub wins.
pub trait CallRecorder {
	fn record(&self, function: &FunctionId, args: &[Value]);
}

/// Recorder that drops every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl CallRecorder for Discard {
	fn record(&self, _function: &FunctionId, _args: &[Value]) {}
}

/// In-memory call log in call order.
#[derive(Debug, Default)]
pub struct CallLog {
	calls: Mutex<Vec<CallRecord>>,
}

impl CallLog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of every recorded call.
	pub fn records(&self) -> Vec<CallRecord> {
		self.calls.lock().clone()
	}

	/// Recorded calls to `function`, oldest first.
	pub fn calls_to(&self, function: &str) -> Vec<CallRecord> {
		self.calls
			.lock()
			.iter()
			.filter(|c| c.function == function)
			.cloned()
			.collect()
	}

	pub fn count(&self, function: &str) -> usize {
		self.calls
			.lock()
			.iter()
			.filter(|c| c.function == function)
			.count()
	}

	pub fn len(&self) -> usize {
		self.calls.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.calls.lock().is_empty()
	}

	pub fn clear(&self) {
		self.calls.lock().clear();
	}
}

impl CallRecorder for CallLog {
	fn record(&self, function: &FunctionId, args: &[Value]) {
		self.calls.lock().push(CallRecord {
			function: function.clone(),
			args: args.to_vec(),
		});
	}
}
