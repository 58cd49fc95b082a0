use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::action::Action;
use crate::args;
use crate::matcher::Matcher;
use crate::recorder::CallLog;

fn stub(registry: &mut StubRegistry, matchers: Vec<Matcher>, result: &str) {
	let function = registry.function().clone();
	registry
		.register(StubDescriptor::new(function))
		.with_arguments(matchers)
		.set_action(Action::returning(result));
}

fn resolve(registry: &StubRegistry, args: &[Value]) -> Result<Value, UnstubbedCall> {
	ResolutionEngine::default().resolve(registry.function(), args, Some(registry), Fallback::None)
}

#[test]
fn later_specific_stub_overrides_earlier_catch_all() {
	let mut registry = StubRegistry::new("f");
	stub(&mut registry, vec![], "general");
	stub(&mut registry, vec![Matcher::exact("x")], "special");

	assert_eq!(resolve(&registry, &args!["x"]), Ok("special".into()));
	assert_eq!(resolve(&registry, &args!["y"]), Ok("general".into()));
}

#[test]
fn lone_catch_all_answers_every_call() {
	let mut registry = StubRegistry::new("f");
	stub(&mut registry, vec![], "default");

	assert_eq!(resolve(&registry, &args![]), Ok("default".into()));
	assert_eq!(resolve(&registry, &args![1, 2, 3]), Ok("default".into()));
	assert_eq!(resolve(&registry, &args![None::<i64>]), Ok("default".into()));
}

#[test]
fn greet_scenario() {
	let mut registry = StubRegistry::new("greet");
	stub(&mut registry, vec![Matcher::exact("Alice")], "Hi Alice");
	stub(&mut registry, vec![], "Hi stranger");

	assert_eq!(resolve(&registry, &args!["Alice"]), Ok("Hi Alice".into()));
	assert_eq!(resolve(&registry, &args!["Bob"]), Ok("Hi stranger".into()));
}

#[test]
fn most_recent_matching_stub_wins_within_a_tier() {
	let mut registry = StubRegistry::new("f");
	stub(&mut registry, vec![Matcher::any()], "old");
	stub(&mut registry, vec![Matcher::exact(1)], "new");
	stub(&mut registry, vec![Matcher::exact(2)], "other");

	assert_eq!(resolve(&registry, &args![1]), Ok("new".into()));
	assert_eq!(resolve(&registry, &args![3]), Ok("old".into()));
}

#[test]
fn duplicate_stubs_later_one_wins() {
	let mut registry = StubRegistry::new("f");
	stub(&mut registry, vec![Matcher::exact(1)], "first");
	stub(&mut registry, vec![Matcher::exact(1)], "second");

	assert_eq!(resolve(&registry, &args![1]), Ok("second".into()));
}

#[rstest]
#[case(MatchOrder::MostRecentFirst, true, "Hi Alice")]
#[case(MatchOrder::MostRecentFirst, false, "Hi stranger")]
#[case(MatchOrder::FirstRegistered, true, "Hi Alice")]
#[case(MatchOrder::FirstRegistered, false, "Hi Alice")]
fn policy_controls_tie_breaking(
	#[case] order: MatchOrder,
	#[case] catch_all_last: bool,
	#[case] expected: &str,
) {
	let mut registry = StubRegistry::new("greet");
	stub(&mut registry, vec![Matcher::exact("Alice")], "Hi Alice");
	stub(&mut registry, vec![], "Hi stranger");

	let engine = ResolutionEngine::default().with_policy(MatchPolicy {
		order,
		catch_all_last,
	});
	let result = engine.resolve(
		registry.function(),
		&args!["Alice"],
		Some(&registry),
		Fallback::None,
	);
	assert_eq!(result, Ok(expected.into()));
}

#[test]
fn first_registered_picks_oldest_match() {
	let mut registry = StubRegistry::new("f");
	stub(&mut registry, vec![Matcher::exact(1)], "first");
	stub(&mut registry, vec![Matcher::exact(1)], "second");

	let engine = ResolutionEngine::default().with_policy(MatchPolicy {
		order: MatchOrder::FirstRegistered,
		catch_all_last: true,
	});
	let winner = engine.select(registry.candidates(), &args![1]);
	assert_eq!(winner.map(|d| d.execute(&[])), Some("first".into()));
}

#[test]
fn empty_registry_without_fallback_is_unstubbed() {
	let engine = ResolutionEngine::default();
	let function = FunctionId::from("missing");

	let err = engine
		.resolve(&function, &args!["a", 1], None, Fallback::None)
		.unwrap_err();
	assert_eq!(err.function, function);
	assert_eq!(err.args, args!["a", 1]);
	assert_eq!(
		err.to_string(),
		r#"no stub for `missing` matched call ("a", 1)"#
	);
}

#[test]
fn no_match_uses_fallback() {
	let engine = ResolutionEngine::default();
	let function = FunctionId::from("missing");
	assert_eq!(
		engine.resolve(&function, &[], None, Fallback::Value("z".into())),
		Ok("z".into())
	);

	let mut registry = StubRegistry::new("f");
	stub(&mut registry, vec![Matcher::exact(1)], "one");
	assert_eq!(
		engine.resolve(
			registry.function(),
			&args![2],
			Some(&registry),
			Some(Value::Int(0)).into()
		),
		Ok(Value::Int(0))
	);
}

#[test]
fn arity_mismatch_falls_through() {
	let mut registry = StubRegistry::new("f");
	stub(&mut registry, vec![Matcher::any(), Matcher::any()], "pair");

	assert!(resolve(&registry, &args![1]).is_err());
	assert_eq!(resolve(&registry, &args![1, 2]), Ok("pair".into()));
}

#[test]
fn compute_runs_once_per_winning_call_with_exact_args() {
	let calls = Arc::new(AtomicUsize::new(0));
	let mut registry = StubRegistry::new("echo");
	{
		let calls = calls.clone();
		registry
			.register(StubDescriptor::new("echo"))
			.with_arguments([Matcher::kind(crate::ValueKind::Str)])
			.set_action(Action::compute(move |args: &[Value]| {
				calls.fetch_add(1, Ordering::SeqCst);
				Value::List(args.to_vec())
			}));
	}

	assert_eq!(
		resolve(&registry, &args!["hey"]),
		Ok(Value::List(args!["hey"]))
	);
	assert_eq!(calls.load(Ordering::SeqCst), 1);

	// Losing calls never evaluate the closure.
	assert!(resolve(&registry, &args![1]).is_err());
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn compute_is_lazy_for_losing_candidates() {
	let evaluated = Arc::new(AtomicUsize::new(0));
	let mut registry = StubRegistry::new("f");
	{
		let evaluated = evaluated.clone();
		registry
			.register(StubDescriptor::new("f"))
			.set_action(Action::compute(move |_: &[Value]| {
				evaluated.fetch_add(1, Ordering::SeqCst);
				"catch-all"
			}));
	}
	stub(&mut registry, vec![Matcher::exact(1)], "one");

	assert_eq!(resolve(&registry, &args![1]), Ok("one".into()));
	assert_eq!(evaluated.load(Ordering::SeqCst), 0);
}

#[test]
fn every_call_is_recorded_regardless_of_outcome() {
	let log = CallLog::new();
	let engine = ResolutionEngine::new(&log);
	let mut registry = StubRegistry::new("f");
	stub(&mut registry, vec![Matcher::exact(1)], "one");

	let _ = engine.resolve(registry.function(), &args![1], Some(&registry), Fallback::None);
	let _ = engine.resolve(registry.function(), &args![2], Some(&registry), Fallback::None);
	let _ = engine.resolve(&"g".into(), &args![], None, Fallback::Value(Value::Nil));

	let recorded: Vec<String> = log.records().iter().map(ToString::to_string).collect();
	assert_eq!(recorded, vec!["f(1)", "f(2)", "g()"]);
}

#[test]
fn select_does_not_record() {
	let log = CallLog::new();
	let engine = ResolutionEngine::new(&log);
	let mut registry = StubRegistry::new("f");
	stub(&mut registry, vec![], "any");

	assert!(engine.select(registry.candidates(), &args![1]).is_some());
	assert!(log.is_empty());
}

#[test]
fn resolve_as_reports_type_mismatch() {
	let mut registry = StubRegistry::new("count");
	stub(&mut registry, vec![], "not a number");
	let engine = ResolutionEngine::default();

	let err = engine
		.resolve_as::<i64>(registry.function(), &[], Some(&registry), Fallback::None)
		.unwrap_err();
	match err {
		ResolveError::TypeMismatch {
			function,
			expected,
			got,
			..
		} => {
			assert_eq!(function, "count");
			assert_eq!(expected, "i64");
			assert_eq!(got, crate::ValueKind::Str);
		}
		other => panic!("unexpected error: {other}"),
	}

	let text: String = engine
		.resolve_as(registry.function(), &[], Some(&registry), Fallback::None)
		.unwrap();
	assert_eq!(text, "not a number");
}

#[test]
fn resolve_as_passes_unstubbed_through() {
	let engine = ResolutionEngine::default();
	let err = engine
		.resolve_as::<String>(&"nope".into(), &[], None, Fallback::None)
		.unwrap_err();
	assert!(matches!(err, ResolveError::Unstubbed(_)));
}

#[test]
#[should_panic(expected = "stub for `f` has no action configured")]
fn winning_stub_without_action_is_fatal() {
	let mut registry = StubRegistry::new("f");
	stub(&mut registry, vec![], "unused");
	registry
		.register(StubDescriptor::new("f"))
		.with_arguments([Matcher::exact(1)]);

	let _ = resolve(&registry, &args![1]);
}

#[test]
fn unfinished_stub_that_loses_is_harmless() {
	let mut registry = StubRegistry::new("f");
	stub(&mut registry, vec![], "fine");
	registry
		.register(StubDescriptor::new("f"))
		.with_arguments([Matcher::exact(1)]);

	assert_eq!(resolve(&registry, &args![2]), Ok("fine".into()));
}
