//! Per-test stub session.
//!
//! A [`Session`] owns everything one test configures: the stub table, the call
//! log and the configuration. Sessions are never shared between tests.

use mimic_stub::{
	CallLog, CallRecord, CallRecorder, Discard, Fallback, FromValue, FunctionId, ResolutionEngine,
	ResolveError, StubDescriptor, StubTable, Value, convert,
};

use crate::builder::StubBuilder;
use crate::config::MimicConfig;
use crate::verify::Verification;

/// Stub registry, call log and configuration for one test.
#[derive(Debug, Default)]
pub struct Session {
	config: MimicConfig,
	table: StubTable,
	log: CallLog,
}

impl Session {
	/// Creates a session from [`MimicConfig::from_env`], so
	/// `MIMIC_MATCH_ORDER` applies. [`Session::default`] ignores the environment.
	pub fn new() -> Self {
		Self::with_config(MimicConfig::from_env())
	}

	pub fn with_config(config: MimicConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	pub fn config(&self) -> &MimicConfig {
		&self.config
	}

	/// Registers a new stub for `function` and returns its builder.
	///
	/// ```
	/// use mimic_session::Session;
	/// use mimic_stub::args;
	///
	/// let mut session = Session::new();
	/// session.stub("greet").with_args(["Alice"]).and_return("Hi Alice");
	/// session.stub("greet").and_return("Hi stranger");
	///
	/// assert_eq!(session.call_as::<String>("greet", &args!["Alice"]).unwrap(), "Hi Alice");
	/// assert_eq!(session.call_as::<String>("greet", &args!["Bob"]).unwrap(), "Hi stranger");
	/// ```
	pub fn stub(&mut self, function: impl Into<FunctionId>) -> StubBuilder<'_> {
		let descriptor = self.table.register(StubDescriptor::new(function));
		tracing::debug!(
			function = %descriptor.function(),
			"stub registered",
		);
		StubBuilder::new(descriptor)
	}

	/// Resolves a call, failing when no stub matches.
	#[track_caller]
	pub fn call(&self, function: &str, args: &[Value]) -> Result<Value, ResolveError> {
		Ok(self.resolve(function, args, Fallback::None)?)
	}

	/// Resolves a call, using `default` when no stub matches.
	#[track_caller]
	pub fn call_or(&self, function: &str, args: &[Value], default: impl Into<Value>) -> Value {
		match self.resolve(function, args, Fallback::Value(default.into())) {
			Ok(value) => value,
			Err(unstubbed) => unreachable!("fallback supplied but resolution failed: {unstubbed}"),
		}
	}

	/// Resolves a call and converts the result to `T`.
	#[track_caller]
	pub fn call_as<T: FromValue>(&self, function: &str, args: &[Value]) -> Result<T, ResolveError> {
		let value = self.resolve(function, args, Fallback::None)?;
		convert(&FunctionId::from(function), value)
	}

	/// Resolves a call with a typed default and converts the result to `T`.
	#[track_caller]
	pub fn call_or_as<T>(&self, function: &str, args: &[Value], default: T) -> Result<T, ResolveError>
	where
		T: FromValue + Into<Value>,
	{
		let value = self.call_or(function, args, default);
		convert(&FunctionId::from(function), value)
	}

	#[track_caller]
	fn resolve(
		&self,
		function: &str,
		args: &[Value],
		fallback: Fallback,
	) -> Result<Value, mimic_stub::UnstubbedCall> {
		let registry = self.table.registry(function);
		let id = registry.map_or_else(|| FunctionId::from(function), |r| r.function().clone());
		let result = self.engine().resolve(&id, args, registry, fallback);
		if self.config.trace_resolutions {
			tracing::debug!(
				function = %id,
				args = %mimic_stub::display_args(args),
				outcome = self.outcome(function, args, result.is_ok()),
				"resolved call",
			);
		}
		result
	}

	/// Names how a call was answered. Selection reruns the matchers but never
	/// records.
	fn outcome(&self, function: &str, args: &[Value], answered: bool) -> &'static str {
		let stubbed = self
			.table
			.registry(function)
			.and_then(|r| self.engine().select(r.candidates(), args))
			.is_some();
		match (stubbed, answered) {
			(true, _) => "stubbed",
			(false, true) => "fallback",
			(false, false) => "unstubbed",
		}
	}

	fn engine(&self) -> ResolutionEngine<'_> {
		let recorder: &dyn CallRecorder = if self.config.record_calls {
			&self.log
		} else {
			&Discard
		};
		ResolutionEngine::new(recorder).with_policy(self.config.policy())
	}

	/// Every recorded call, in call order.
	pub fn calls(&self) -> Vec<CallRecord> {
		self.log.records()
	}

	/// Recorded calls to `function`, oldest first.
	pub fn calls_to(&self, function: &str) -> Vec<CallRecord> {
		self.log.calls_to(function)
	}

	pub fn call_count(&self, function: &str) -> usize {
		self.log.count(function)
	}

	/// Forgets recorded calls; stubs stay registered.
	pub fn clear_calls(&self) {
		self.log.clear();
	}

	/// Human-readable summaries of the stubs for `function`, oldest first.
	pub fn describe_stubs(&self, function: &str) -> Vec<String> {
		self.table
			.registry(function)
			.map(|r| r.candidates().iter().map(StubDescriptor::describe).collect())
			.unwrap_or_default()
	}

	/// Starts a spy assertion over the calls recorded for `function`.
	pub fn verify(&self, function: &str) -> Verification {
		Verification::new(FunctionId::from(function), self.calls_to(function))
	}

	pub fn table(&self) -> &StubTable {
		&self.table
	}
}
