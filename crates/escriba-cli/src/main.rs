//! Escriba command-line entry point.

use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use escriba::{parse_locked, ExtractedValues, StepResolver, Strictness, StrictValidator};
use escriba_codegen::{
    generate, FileManifest, GenerateOptions, GenerationMetadata, RenderOptions,
};

use escriba_cli::commands::{GenerateFormat, ResolveFormat};
use escriba_cli::{
    run_suite, Cli, CliConfig, CliError, CliResult, Commands, GenerateArgs, ProgressReporter,
    ResolveArgs, SuiteArgs, SuiteFile, ValidateArgs, Verbosity,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };
    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.into())
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, config: &CliConfig) -> CliResult<()> {
    let mut reporter = ProgressReporter::new(config.verbosity, config.color);
    match cli.command {
        Commands::Generate(args) => run_generate(&args, &reporter),
        Commands::Resolve(args) => run_resolve(&args),
        Commands::Validate(args) => run_validate(&args, &reporter),
        Commands::Suite(args) => run_suite_command(&args, &mut reporter),
    }
}

fn strictness_for(legacy: bool) -> Strictness {
    if legacy {
        Strictness::Legacy
    } else {
        Strictness::Strict
    }
}

fn run_generate(args: &GenerateArgs, reporter: &ProgressReporter) -> CliResult<()> {
    if args.manifest && args.output.is_none() {
        return Err(CliError::invalid_argument(
            "--manifest requires --output",
        ));
    }

    let options = GenerateOptions {
        render: RenderOptions {
            framework: args.framework,
            language: args.language,
            include_comments: args.comments,
            include_screenshots: args.screenshots,
            timeout_ms: args.timeout,
        },
        strictness: strictness_for(args.legacy),
        ..GenerateOptions::default()
    };
    let output = generate(&args.instruction, &args.base_url, &options);

    if args.format == GenerateFormat::Json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        if output.is_ok() {
            return Ok(());
        }
        return Err(CliError::generation(output.errors.join("; ")));
    }

    for step in &output.resolved_steps {
        reporter.verbose(&format!("  {step}"));
    }
    if !output.is_ok() {
        for error in &output.errors {
            reporter.failure(error);
        }
        return Err(CliError::generation(format!(
            "{} error(s)",
            output.errors.len()
        )));
    }

    match &args.output {
        Some(path) => {
            std::fs::write(path, &output.code)?;
            if args.manifest {
                let manifest = FileManifest::new(
                    path.display().to_string(),
                    &output.code,
                    GenerationMetadata::for_input(&args.instruction),
                );
                manifest.write(&FileManifest::manifest_path(path))?;
            }
            reporter.success(&format!("wrote {}", path.display()));
        }
        None => println!("{}", output.code),
    }
    Ok(())
}

fn run_resolve(args: &ResolveArgs) -> CliResult<()> {
    let values = ExtractedValues::extract(&args.instruction);
    let resolver = StepResolver::new().with_strictness(strictness_for(args.legacy));
    let case = resolver.resolve(&args.instruction, &values, &args.base_url)?;

    let rendered = match args.format {
        ResolveFormat::Json => case.to_json()?,
        ResolveFormat::Yaml => case.to_yaml()?,
    };
    println!("{rendered}");
    Ok(())
}

fn run_validate(args: &ValidateArgs, reporter: &ProgressReporter) -> CliResult<()> {
    let code = std::fs::read_to_string(&args.code_file)?;

    // A stale manifest beside the file means it was hand-edited.
    if FileManifest::manifest_path(&args.code_file).exists() {
        escriba_codegen::verify_file(&args.code_file)?;
    }

    let values = ExtractedValues::extract(&args.instruction);
    let locked = parse_locked(&args.instruction);
    let report = StrictValidator::new().validate(&args.instruction, &code, &values, &locked);

    if report.is_valid {
        reporter.success(&format!("{} matches its instruction", args.code_file.display()));
        return Ok(());
    }
    for deviation in &report.deviations {
        reporter.failure(&format!("{}: {}", deviation.kind, deviation.message));
    }
    Err(CliError::validation(format!(
        "{} deviation(s) found",
        report.deviations.len()
    )))
}

fn run_suite_command(args: &SuiteArgs, reporter: &mut ProgressReporter) -> CliResult<()> {
    let suite = SuiteFile::from_path(&args.file)?;
    let out_dir: &Path = &args.output;
    let outcomes = run_suite(&suite, out_dir, args.fail_fast, reporter)?;

    let mut failed = 0usize;
    for outcome in &outcomes {
        if outcome.passed {
            reporter.success(&format!("{}: {}", outcome.name, outcome.message));
        } else {
            failed += 1;
            reporter.failure(&format!("{}: {}", outcome.name, outcome.message));
        }
    }
    reporter.info(&format!(
        "{} passed, {failed} failed",
        outcomes.len() - failed
    ));

    if failed > 0 {
        return Err(CliError::generation(format!(
            "{failed} suite entr{} failed",
            if failed == 1 { "y" } else { "ies" }
        )));
    }
    Ok(())
}
