use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

#[test]
fn empty_document_gives_defaults() {
	let config = MimicConfig::from_toml_str("").unwrap();
	assert_eq!(config, MimicConfig::default());
	assert_eq!(config.policy(), MatchPolicy::default());
	assert!(config.record_calls);
	assert!(!config.trace_resolutions);
}

#[test]
fn parses_every_key() {
	let config = MimicConfig::from_toml_str(
		r#"
		match_order = "first_registered"
		catch_all_last = false
		record_calls = false
		trace_resolutions = true
		"#,
	)
	.unwrap();

	assert_eq!(
		config,
		MimicConfig {
			match_order: MatchOrder::FirstRegistered,
			catch_all_last: false,
			record_calls: false,
			trace_resolutions: true,
		}
	);
	assert_eq!(
		config.policy(),
		MatchPolicy {
			order: MatchOrder::FirstRegistered,
			catch_all_last: false,
		}
	);
}

#[test]
fn rejects_unknown_keys_and_values() {
	let err = MimicConfig::from_toml_str("retries = 3").unwrap_err();
	assert!(err.to_string().starts_with("invalid mimic config"));

	assert!(MimicConfig::from_toml_str(r#"match_order = "random""#).is_err());
}

#[rstest]
#[case("sideways", MatchOrder::MostRecentFirst)]
#[case("", MatchOrder::MostRecentFirst)]
#[case(" first_registered ", MatchOrder::FirstRegistered)]
#[case("most_recent_first", MatchOrder::MostRecentFirst)]
fn env_match_order(#[case] raw: &str, #[case] expected: MatchOrder) {
	let mut config = MimicConfig::default();
	config.apply_match_order(raw);
	assert_eq!(config.match_order, expected);
}
