use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Stable key grouping every stub configured for one function.
///
/// Usually a signature string such as `"Greeter::greet"`. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(Arc<str>);

impl FunctionId {
	pub fn new(name: impl Into<Arc<str>>) -> Self {
		Self(name.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for FunctionId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for FunctionId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<&str> for FunctionId {
	fn from(name: &str) -> Self {
		Self(Arc::from(name))
	}
}

impl From<String> for FunctionId {
	fn from(name: String) -> Self {
		Self(Arc::from(name))
	}
}

impl From<&FunctionId> for FunctionId {
	fn from(id: &FunctionId) -> Self {
		id.clone()
	}
}

impl fmt::Display for FunctionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl PartialEq<str> for FunctionId {
	fn eq(&self, other: &str) -> bool {
		&*self.0 == other
	}
}

impl PartialEq<&str> for FunctionId {
	fn eq(&self, other: &&str) -> bool {
		&*self.0 == *other
	}
}
