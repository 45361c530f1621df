//! End-to-end generation: text in, code plus diagnostics out.

use escriba::{
    parse_locked, ExtractedValues, ResolverTables, StepResolver, Strictness, StrictValidator,
    ValidationReport,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::options::RenderOptions;
use crate::render;

/// Options for one generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Target and rendering controls
    pub render: RenderOptions,
    /// Strict markers vs legacy demo defaults
    pub strictness: Strictness,
    /// Keyword tables for the resolver
    pub tables: ResolverTables,
}

/// What a generation request produces.
///
/// `errors` non-empty means `code` is not runnable and starts with the
/// literal `"ERROR: "` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutput {
    /// One description per resolved step, in order
    pub resolved_steps: Vec<String>,
    /// Values extracted from the instruction
    pub extracted_values: ExtractedValues,
    /// Rendered code, or an `"ERROR: "`-prefixed message
    pub code: String,
    /// Failures from resolution, rendering or strict validation
    pub errors: Vec<String>,
    /// Strict-mode report, present when validation ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
}

impl GenerationOutput {
    /// Whether generation produced runnable code.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

fn error_code(errors: &[String]) -> String {
    format!("ERROR: {}", errors.join("; "))
}

/// Run the whole pipeline for one instruction.
///
/// Extraction and resolution never panic; every failure lands in `errors`.
/// Under [`Strictness::Strict`] the rendered code is validated and replaced
/// by an error message when it deviates.
#[must_use]
pub fn generate(text: &str, base_url: &str, options: &GenerateOptions) -> GenerationOutput {
    let locked = parse_locked(text);
    let values = ExtractedValues::extract(text);

    let resolver = StepResolver::new()
        .with_strictness(options.strictness)
        .with_tables(options.tables.clone());
    let case = match resolver.resolve(text, &values, base_url) {
        Ok(case) => case,
        Err(e) => {
            let errors = vec![e.to_string()];
            return GenerationOutput {
                resolved_steps: Vec::new(),
                extracted_values: values,
                code: error_code(&errors),
                errors,
                validation: None,
            };
        }
    };
    let resolved_steps = case.resolved_steps();
    debug!(steps = resolved_steps.len(), "resolved instruction");

    let generated = match render::render(&case, &options.render) {
        Ok(generated) => generated,
        Err(e) => {
            let errors = vec![e.to_string()];
            return GenerationOutput {
                resolved_steps,
                extracted_values: values,
                code: error_code(&errors),
                errors,
                validation: None,
            };
        }
    };

    if options.strictness == Strictness::Strict {
        let report = StrictValidator::new().validate(text, &generated.code, &values, &locked);
        if !report.is_valid {
            let errors = report.errors.clone();
            return GenerationOutput {
                resolved_steps,
                extracted_values: values,
                code: error_code(&errors),
                errors,
                validation: Some(report),
            };
        }
        return GenerationOutput {
            resolved_steps,
            extracted_values: values,
            code: generated.code,
            errors: Vec::new(),
            validation: Some(report),
        };
    }

    GenerationOutput {
        resolved_steps,
        extracted_values: values,
        code: generated.code,
        errors: Vec::new(),
        validation: None,
    }
}
