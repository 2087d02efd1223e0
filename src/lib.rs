//! # absint-testkit: test infrastructure for an abstract-interpretation analyzer
//!
//! The analyzer itself (fixpoint engine, front end, SMT backend) lives elsewhere. This crate
//! produces its test inputs and validates its outputs:
//!
//! ```text
//! annotated test file ──► directive payloads ──► test runner ──► analyzer ──► result dump ──► checker
//! ```
//!
//! ## Tools
//!
//! Each tool is a library module plus a binary:
//!
//! - **[`float`]** (`fpgen`): bit-exact `(fp ...)` solver literals for doubles, and a generator
//!   for matched verification directives and instructions.
//! - **[`directive`]** (`extract-directives`): pulls `CONFIG:` payloads out of annotated files.
//! - **[`migrate`]** (`migrate-config`): rewrites a legacy single-document directive block into
//!   per-key assignments, resolving domains through the [`domain`] registry.
//! - **[`checker`]** (`check-results`): compares an analyzer's `<id> -> <value>` dump with an
//!   expected value.
//!
//! ## Basic Usage
//!
//! ```rust
//! use absint_testkit::checker::{check, Expectation, Verdict};
//! use absint_testkit::directive::{extract, Marker};
//! use absint_testkit::float::encode;
//!
//! assert_eq!(encode(-0.0), "(fp #b1 #b00000000000 #x0000000000000)");
//!
//! let payloads = extract(["int x;\n", "// CONFIG: widening: 3\n"], &Marker::default()).unwrap();
//! assert_eq!(payloads, vec!["widening: 3"]);
//!
//! let report = check(["x -> [0, 3]\n"], Some(Expectation::new("x", "[0, 3]"))).unwrap();
//! assert_eq!(report.verdict(), Verdict::Pass);
//! ```

pub mod checker;
pub mod directive;
pub mod domain;
pub mod error;
pub mod float;
pub mod migrate;

pub use error::{Error, Result};
