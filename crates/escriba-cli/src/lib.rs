//! Command-line interface for Escriba.
//!
//! Wires the core resolution pipeline and the code generators into four
//! subcommands: `generate`, `resolve`, `validate` and `suite`. Generated code
//! goes to stdout or files; status lines go to stderr.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod suite;

pub use commands::{Cli, ColorArg, Commands, GenerateArgs, ResolveArgs, SuiteArgs, ValidateArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
pub use suite::{output_filename, run_suite, SuiteEntry, SuiteFile, SuiteOutcome};
