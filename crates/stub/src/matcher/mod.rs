//! Positional argument matchers.
//!
//! A [`Matcher`] answers one question: does this concrete argument satisfy the
//! expectation configured for its position? Matchers are pure and immutable;
//! predicate matchers are reference counted so descriptors stay cheap to clone.

use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::sync::Arc;

use crate::value::{Value, ValueKind};


/// Shared predicate body.
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Expected-argument constraint for one position.
#[derive(Clone)]
pub enum Matcher {
	/// Matches every argument.
	Any,
	/// Matches iff the argument equals the stored value.
	Exact(Value),
	/// Matches iff the predicate returns true.
	Predicate {
		/// Human-readable description used in diagnostics.
		label: Arc<str>,
		test: PredicateFn,
	},
}

impl Matcher {
	/// Wildcard for "don't care" positions.
	pub const fn any() -> Self {
		Self::Any
	}

	pub fn exact(value: impl Into<Value>) -> Self {
		Self::Exact(value.into())
	}

	/// Matches only [`Value::Nil`].
	pub fn nil() -> Self {
		Self::Exact(Value::Nil)
	}

	pub fn not_nil() -> Self {
		Self::predicate("not nil", |v| !v.is_nil())
	}

	/// Type check against a [`ValueKind`].
	pub fn kind(kind: ValueKind) -> Self {
		Self::predicate(format!("any {kind}"), move |v| v.kind() == kind)
	}

	/// Matches integers inside `range`. Non-integers never match.
	pub fn int_range<R>(range: R) -> Self
	where
		R: RangeBounds<i64> + Send + Sync + 'static,
	{
		let label = format!(
			"int in {}",
			range_label(range.start_bound(), range.end_bound())
		);
		Self::predicate(label, move |v| v.as_int().is_some_and(|i| range.contains(&i)))
	}

	/// Matches any argument equal to one of `values`.
	pub fn one_of<I, V>(values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		let values: Vec<Value> = values.into_iter().map(Into::into).collect();
		let label = format!("one of [{}]", crate::value::display_args(&values));
		Self::predicate(label, move |v| values.contains(v))
	}

	/// Custom predicate with a diagnostic label.
	pub fn predicate<F>(label: impl Into<Arc<str>>, test: F) -> Self
	where
		F: Fn(&Value) -> bool + Send + Sync + 'static,
	{
		Self::Predicate {
			label: label.into(),
			test: Arc::new(test),
		}
	}

	/// Returns true if `arg` satisfies this matcher.
	pub fn matches(&self, arg: &Value) -> bool {
		match self {
			Self::Any => true,
			Self::Exact(expected) => expected == arg,
			Self::Predicate { test, .. } => test(arg),
		}
	}
}

impl From<Value> for Matcher {
	fn from(value: Value) -> Self {
		Self::Exact(value)
	}
}

impl fmt::Debug for Matcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Any => f.write_str("Matcher::Any"),
			Self::Exact(v) => f.debug_tuple("Matcher::Exact").field(v).finish(),
			Self::Predicate { label, .. } => {
				f.debug_tuple("Matcher::Predicate").field(label).finish()
			}
		}
	}
}

impl fmt::Display for Matcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Any => f.write_str("_"),
			Self::Exact(v) => write!(f, "{v}"),
			Self::Predicate { label, .. } => write!(f, "<{label}>"),
		}
	}
}

fn range_label(start: Bound<&i64>, end: Bound<&i64>) -> String {
	let start = match start {
		Bound::Included(s) => s.to_string(),
		Bound::Excluded(s) => format!("{s}<"),
		Bound::Unbounded => String::new(),
	};
	match end {
		Bound::Included(e) => format!("{start}..={e}"),
		Bound::Excluded(e) => format!("{start}..{e}"),
		Bound::Unbounded => format!("{start}.."),
	}
}
