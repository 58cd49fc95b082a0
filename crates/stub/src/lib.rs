//! Stub registration and resolution engine for test doubles.
//!
//! Tests describe substitute behaviour for a function as a list of
//! [`StubDescriptor`]s, each holding positional [`Matcher`]s and an
//! [`Action`]. At call time the [`ResolutionEngine`] picks the winning
//! descriptor for the concrete arguments, runs its action, and reports the
//! call to a [`CallRecorder`] for later spy assertions.
//!
//! # Example
//!
//! ```
//! use mimic_stub::{
//! 	Action, Fallback, FunctionId, Matcher, ResolutionEngine, StubDescriptor, StubTable, args,
//! };
//!
//! let mut table = StubTable::new();
//! table
//! 	.register(StubDescriptor::new("greet"))
//! 	.with_arguments([Matcher::exact("Alice")])
//! 	.set_action(Action::returning("Hi Alice"));
//! table
//! 	.register(StubDescriptor::new("greet"))
//! 	.set_action(Action::returning("Hi stranger"));
//!
//! let engine = ResolutionEngine::default();
//! let greet = FunctionId::from("greet");
//! let hi: String = engine
//! 	.resolve_as(&greet, &args!["Bob"], table.registry("greet"), Fallback::None)
//! 	.unwrap();
//! assert_eq!(hi, "Hi stranger");
//! ```

mod action;
mod descriptor;
mod engine;
mod error;
mod id;
mod matcher;
mod recorder;
mod registry;
mod value;

pub use action::{Action, ComputeFn};
pub use descriptor::StubDescriptor;
pub use engine::{Fallback, MatchOrder, MatchPolicy, ResolutionEngine, convert};
pub use error::{ResolveError, UnstubbedCall};
pub use id::FunctionId;
pub use matcher::{Matcher, PredicateFn};
pub use recorder::{CallLog, CallRecord, CallRecorder, Discard};
pub use registry::{StubRegistry, StubTable};
pub use value::{FromValue, Value, ValueKind, display_args};
