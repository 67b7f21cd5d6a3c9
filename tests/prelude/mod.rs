//! Shared imports for the integration test binaries.
#![allow(unfulfilled_lint_expectations)]

#[expect(unused_imports, reason = "not every test binary drives the CLI")]
pub use assert_cmd::{Command, prelude::*};
#[expect(unused_imports, reason = "not every test binary drives the CLI")]
pub use predicates::prelude::*;
#[expect(unused_imports, reason = "re-exporting common test utilities")]
pub use rstest::rstest;
#[expect(unused_imports, reason = "not every test binary touches the filesystem")]
pub use tempfile::tempdir;

#[macro_use]
#[path = "../common/mod.rs"]
mod common;
#[expect(unused_imports, reason = "re-exporting common test utilities")]
pub use common::*;
