//! Command-line argument definitions

use crate::config::ColorChoice;
use clap::{Parser, Subcommand, ValueEnum};
use escriba_codegen::{Framework, Language};
use std::path::PathBuf;

/// Escriba: generate browser tests from plain-English instructions
#[derive(Debug, Parser)]
#[command(name = "escriba", version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// When to use colored output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Color output argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    /// Always use colors
    Always,
    /// Detect terminal
    Auto,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Always => Self::Always,
            ColorArg::Auto => Self::Auto,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate test code from an instruction
    Generate(GenerateArgs),
    /// Resolve an instruction into the intermediate step representation
    Resolve(ResolveArgs),
    /// Validate existing test code against an instruction
    Validate(ValidateArgs),
    /// Generate a batch of tests from a suite file
    Suite(SuiteArgs),
}

/// Arguments for `escriba generate`
#[derive(Debug, clap::Args)]
pub struct GenerateArgs {
    /// Plain-English test instruction
    pub instruction: String,

    /// Base URL the test runs against
    #[arg(long)]
    pub base_url: String,

    /// Target framework
    #[arg(long, default_value = "playwright")]
    pub framework: Framework,

    /// Target language
    #[arg(long, default_value = "typescript")]
    pub language: Language,

    /// Substitute canned defaults for missing values instead of markers
    #[arg(long)]
    pub legacy: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: GenerateFormat,

    /// Write generated code to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a provenance manifest next to the output file
    #[arg(long)]
    pub manifest: bool,

    /// Include per-step comments in generated code
    #[arg(long)]
    pub comments: bool,

    /// Capture a screenshot after each step
    #[arg(long)]
    pub screenshots: bool,

    /// Test timeout in milliseconds
    #[arg(long, default_value_t = 30_000)]
    pub timeout: u64,
}

/// Output format for `generate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerateFormat {
    /// Generated code only
    Text,
    /// Full generation report as JSON
    Json,
}

/// Arguments for `escriba resolve`
#[derive(Debug, clap::Args)]
pub struct ResolveArgs {
    /// Plain-English test instruction
    pub instruction: String,

    /// Base URL the test runs against
    #[arg(long)]
    pub base_url: String,

    /// Substitute canned defaults for missing values instead of markers
    #[arg(long)]
    pub legacy: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: ResolveFormat,
}

/// Output format for `resolve`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolveFormat {
    /// JSON step representation
    Json,
    /// YAML step representation
    Yaml,
}

/// Arguments for `escriba validate`
#[derive(Debug, clap::Args)]
pub struct ValidateArgs {
    /// Path to the test code file to check
    pub code_file: PathBuf,

    /// Instruction the code was generated from
    #[arg(long)]
    pub instruction: String,
}

/// Arguments for `escriba suite`
#[derive(Debug, clap::Args)]
pub struct SuiteArgs {
    /// Path to the YAML suite file
    pub file: PathBuf,

    /// Stop at the first failing entry
    #[arg(long)]
    pub fail_fast: bool,

    /// Directory to write generated tests into
    #[arg(short, long, default_value = "generated")]
    pub output: PathBuf,
}
