//! Escriba: English-to-Browser-Test Generation
//!
//! Escriba (Spanish: "scribe") turns plain-English test descriptions into an
//! intermediate, JSON-serializable step representation and validates the code
//! rendered from it. The pipeline is deterministic end to end: identical
//! instruction text and base URL produce byte-identical output.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     ESCRIBA Pipeline                             │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌───────────┐   ┌───────────┐   ┌───────────┐   ┌───────────┐  │
//! │   │ Free-text │   │ Value     │   │ Step      │   │ TestCase  │  │
//! │   │ Input     │──►│ Extractor │──►│ Resolver  │──►│ (JSON DSL)│  │
//! │   └───────────┘   └───────────┘   └───────────┘   └─────┬─────┘  │
//! │                                                         │        │
//! │   ┌───────────┐   ┌───────────┐                         │        │
//! │   │ Strict    │◄──│ Rendered  │◄────────── codegen ─────┘        │
//! │   │ Validator │   │ Code      │                                  │
//! │   └───────────┘   └───────────┘                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering lives in the `escriba-codegen` crate; this crate owns the data
//! model, extraction, resolution, validation and the execution boundary.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod error;
mod exec;
mod extract;
mod locator;
mod resolve;
mod step;
mod testcase;
mod validate;

pub use error::{EscribaError, EscribaResult};
pub use exec::{
    run_case, DryRunExecutor, ExecError, ExecStatus, ExecutionOptions, ExecutionReport,
    StepExecutor, StepResult,
};
pub use extract::{parse_locked, ExtractedValues, Field, LockKind, LockedValue};
pub use locator::Locator;
pub use resolve::{
    ResolverTables, StepResolver, Strictness, LEGACY_PASSWORD, LEGACY_USERNAME,
};
pub use step::{contains_not_specified, not_specified_marker, AssertionKind, TestStep};
pub use testcase::{derive_name, TestCase};
pub use validate::{
    Deviation, DeviationKind, StrictValidator, ValidationReport, FORBIDDEN_CONSTRUCTS,
};
