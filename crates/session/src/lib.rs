//! Per-test stub sessions.
//!
//! This crate is the thin instrumentation layer around [`mimic_stub`]: a test
//! creates a [`Session`], declares stubs through [`StubBuilder`]s, lets the code
//! under test call back into [`Session::call`], and finally asserts on the
//! recorded calls through [`Verification`].

mod builder;
mod config;
mod session;
mod testing;
mod verify;

pub use builder::StubBuilder;
pub use config::{ConfigError, MATCH_ORDER_ENV, MimicConfig};
pub use session::Session;
pub use testing::init_test_tracing;
pub use verify::{Verification, VerifyError};
