use mimic_stub::{Action, Matcher, StubDescriptor, Value};

/// Chained configuration for one freshly registered stub.
///
/// The stub is already registered when the builder is handed out; every
/// method mutates it in place. A stub left without an action panics if it
/// ever wins resolution.
pub struct StubBuilder<'a> {
	descriptor: &'a mut StubDescriptor,
}

impl<'a> StubBuilder<'a> {
	pub(crate) fn new(descriptor: &'a mut StubDescriptor) -> Self {
		Self { descriptor }
	}

	/// Appends positional matchers.
	pub fn with<I>(self, matchers: I) -> Self
	where
		I: IntoIterator<Item = Matcher>,
	{
		self.descriptor.with_arguments(matchers);
		self
	}

	/// Appends exact-equality matchers for `values`.
	pub fn with_args<I>(self, values: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Value>,
	{
		self.with(values.into_iter().map(Matcher::exact))
	}

	/// Returns `value` whenever this stub wins.
	pub fn and_return(self, value: impl Into<Value>) -> Self {
		self.descriptor.set_action(Action::returning(value));
		self
	}

	/// Runs `f` with the call's arguments whenever this stub wins.
	pub fn and_do<F, R>(self, f: F) -> Self
	where
		F: Fn(&[Value]) -> R + Send + Sync + 'static,
		R: Into<Value>,
	{
		self.descriptor.set_action(Action::compute(f));
		self
	}

	pub fn descriptor(&self) -> &StubDescriptor {
		self.descriptor
	}
}
