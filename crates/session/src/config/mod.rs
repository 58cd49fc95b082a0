//! Session configuration.
//!
//! Configuration is optional: [`MimicConfig::default`] gives most-recent-wins
//! resolution with catch-alls consulted last and call recording enabled.
//!
//! ```toml
//! match_order = "first_registered"
//! catch_all_last = false
//! record_calls = true
//! trace_resolutions = true
//! ```

use mimic_stub::{MatchOrder, MatchPolicy};
use serde::Deserialize;

#[cfg(test)]
mod tests;

/// Environment variable overriding [`MimicConfig::match_order`].
pub const MATCH_ORDER_ENV: &str = "MIMIC_MATCH_ORDER";

/// Tunables for one [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MimicConfig {
	/// Scan direction when several stubs match.
	pub match_order: MatchOrder,
	/// Argument-constrained stubs outrank catch-alls.
	pub catch_all_last: bool,
	/// Write every call to the session's call log.
	pub record_calls: bool,
	/// Emit a debug event for every resolved call.
	pub trace_resolutions: bool,
}

impl Default for MimicConfig {
	fn default() -> Self {
		let policy = MatchPolicy::default();
		Self {
			match_order: policy.order,
			catch_all_last: policy.catch_all_last,
			record_calls: true,
			trace_resolutions: false,
		}
	}
}

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid mimic config: {0}")]
	Parse(#[from] toml::de::Error),
}

impl MimicConfig {
	/// Parses a TOML document. Missing keys take their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(source)?)
	}

	/// Defaults, with [`MATCH_ORDER_ENV`] applied when set.
	pub fn from_env() -> Self {
		let mut config = Self::default();
		if let Ok(raw) = std::env::var(MATCH_ORDER_ENV) {
			config.apply_match_order(&raw);
		}
		config
	}

	fn apply_match_order(&mut self, raw: &str) {
		match parse_match_order(raw) {
			Some(order) => self.match_order = order,
			None => tracing::warn!(
				var = MATCH_ORDER_ENV,
				value = raw,
				default = self.match_order.as_str(),
				"unknown match order; keeping default",
			),
		}
	}

	/// Resolution policy derived from this configuration.
	pub fn policy(&self) -> MatchPolicy {
		MatchPolicy {
			order: self.match_order,
			catch_all_last: self.catch_all_last,
		}
	}
}

fn parse_match_order(raw: &str) -> Option<MatchOrder> {
	match raw.trim() {
		"most_recent_first" => Some(MatchOrder::MostRecentFirst),
		"first_registered" => Some(MatchOrder::FirstRegistered),
		_ => None,
	}
}
