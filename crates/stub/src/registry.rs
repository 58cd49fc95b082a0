//! Ordered stub storage.
//!
//! Each function identifier owns one [`StubRegistry`]. Insertion order is
//! preserved and meaningful: resolution uses it to decide which of several
//! matching stubs wins. Nothing is ever removed; registries live as long as the
//! test that built them.

use rustc_hash::FxHashMap as HashMap;

use crate::descriptor::StubDescriptor;
use crate::id::FunctionId;

/// Insertion-ordered stubs for one function.
#[derive(Debug, Clone)]
pub struct StubRegistry {
	function: FunctionId,
	stubs: Vec<StubDescriptor>,
}

impl StubRegistry {
	pub fn new(function: impl Into<FunctionId>) -> Self {
		Self {
			function: function.into(),
			stubs: Vec::new(),
		}
	}

	pub fn function(&self) -> &FunctionId {
		&self.function
	}

	/// Appends `descriptor` and returns it for further configuration.
	///
	/// No deduplication: identical descriptors are all kept.
	pub fn register(&mut self, descriptor: StubDescriptor) -> &mut StubDescriptor {
		debug_assert_eq!(
			descriptor.function(),
			&self.function,
			"descriptor registered under a different function"
		);
		self.stubs.push(descriptor);
		let last = self.stubs.len() - 1;
		&mut self.stubs[last]
	}

	/// Registered stubs, oldest first.
	pub fn candidates(&self) -> &[StubDescriptor] {
		&self.stubs
	}

	pub fn len(&self) -> usize {
		self.stubs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.stubs.is_empty()
	}
}

/// Explicit mapping from function identifier to its registry.
#[derive(Debug, Clone, Default)]
pub struct StubTable {
	by_id: HashMap<FunctionId, StubRegistry>,
	/// Identifiers in first-registration order.
	id_order: Vec<FunctionId>,
}

impl StubTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn registry(&self, function: &str) -> Option<&StubRegistry> {
		self.by_id.get(function)
	}

	/// Returns the registry for `function`, creating an empty one on first use.
	pub fn registry_mut(&mut self, function: impl Into<FunctionId>) -> &mut StubRegistry {
		let function = function.into();
		if !self.by_id.contains_key(&function) {
			self.id_order.push(function.clone());
		}
		self.by_id
			.entry(function)
			.or_insert_with_key(|id| StubRegistry::new(id.clone()))
	}

	/// Routes `descriptor` to the registry of its own function.
	pub fn register(&mut self, descriptor: StubDescriptor) -> &mut StubDescriptor {
		let function = descriptor.function().clone();
		self.registry_mut(function).register(descriptor)
	}

	/// Stubbed functions in first-registration order.
	pub fn functions(&self) -> impl Iterator<Item = &FunctionId> {
		self.id_order.iter()
	}

	/// Total number of stubs across every function.
	pub fn stub_count(&self) -> usize {
		self.by_id.values().map(StubRegistry::len).sum()
	}
}
