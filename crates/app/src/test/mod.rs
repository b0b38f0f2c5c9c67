//! Shared test infrastructure for service integration tests.

pub(crate) mod helpers;

pub(crate) use context::TestContext;
