//! Application entry point and dispatch.

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use calc_core::calculations::{self, default_input, request_from_json};
use calc_core::registry::{CalculatorKind, Category};
use calc_core::CalcError;

use crate::config::{AppConfig, Command, OutputFormat};
use crate::output::{self, BatchEntry};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<ExitCode> {
    match &config.command {
        Command::List { category } => list(category.as_deref(), config.format),
        Command::Describe { slug } => describe(slug, config.format),
        Command::Run { slug, input, file } => {
            let raw = read_input(input.as_deref(), file.as_deref())?;
            run_one(slug, raw, config.format)
        }
        Command::Batch { path } => batch(path, config.format),
    }
}

fn list(category: Option<&str>, format: OutputFormat) -> Result<ExitCode> {
    let kinds: Vec<CalculatorKind> = match category {
        Some(name) => {
            let Some(category) = Category::from_name(name) else {
                bail!(
                    "Unknown category '{}'. Expected one of: {}",
                    name,
                    Category::ALL.iter().map(|c| c.slug()).collect::<Vec<_>>().join(", ")
                );
            };
            CalculatorKind::in_category(category).collect()
        }
        None => CalculatorKind::ALL.to_vec(),
    };

    print!("{}", with_newline(output::render_list(&kinds, format)?));
    Ok(ExitCode::SUCCESS)
}

fn describe(slug: &str, format: OutputFormat) -> Result<ExitCode> {
    let Some(kind) = CalculatorKind::from_slug(slug) else {
        return Ok(report_error(&CalcError::unknown_calculator(slug)));
    };
    let defaults = default_input(kind)?;
    print!("{}", with_newline(output::render_description(kind, &defaults, format)?));
    Ok(ExitCode::SUCCESS)
}

fn run_one(slug: &str, input: Value, format: OutputFormat) -> Result<ExitCode> {
    match calculations::run_json(slug, input) {
        Ok(output) => {
            tracing::debug!(calculator = %output.kind(), "calculation finished");
            print!("{}", with_newline(output::render(&output, format)?));
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => Ok(report_error(&error)),
    }
}

fn batch(path: &Path, format: OutputFormat) -> Result<ExitCode> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read batch file {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&text).with_context(|| format!("Batch file {} is not valid JSON", path.display()))?;
    let Value::Array(requests) = value else {
        bail!("Batch file {} must contain a JSON array of requests", path.display());
    };

    let entries: Vec<BatchEntry> = requests
        .into_iter()
        .enumerate()
        .map(|(index, request)| run_batch_entry(index, request))
        .collect();

    let failures = entries.iter().filter(|e| e.failed()).count();
    tracing::debug!(total = entries.len(), failures, "batch finished");

    print!("{}", with_newline(output::render(&entries, format)?));
    Ok(if failures > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn run_batch_entry(index: usize, mut request: Value) -> BatchEntry {
    let requested = request
        .get("calculator")
        .and_then(Value::as_str)
        .unwrap_or_default();
    // Aliases are reported under the canonical slug, like `run` does
    let slug = CalculatorKind::from_slug(requested)
        .map(|kind| kind.slug().to_string())
        .unwrap_or_else(|| requested.to_string());
    let input = request.get_mut("input").map(Value::take).unwrap_or(Value::Null);

    let outcome = if slug.is_empty() {
        Err(CalcError::missing_field("calculator"))
    } else {
        request_from_json(&slug, input).and_then(|req| calculations::run(&req))
    };

    match outcome.and_then(|output| Ok(serde_json::to_value(output)?)) {
        Ok(mut output) => BatchEntry {
            index,
            calculator: slug,
            result: Some(output["result"].take()),
            error: None,
        },
        Err(error) => BatchEntry {
            index,
            calculator: slug,
            result: None,
            error: Some(error),
        },
    }
}

/// Input JSON from `--input`, `--file` or stdin. Empty input means defaults.
fn read_input(inline: Option<&str>, file: Option<&Path>) -> Result<Value> {
    let text = match (inline, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read input file {}", path.display()))?
        }
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            buffer
        }
    };

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).context("Input is not valid JSON")
}

fn report_error(error: &CalcError) -> ExitCode {
    tracing::debug!(code = error.error_code(), input_error = error.is_input_error(), "calculation failed");
    eprintln!("{}", output::render_error(error));
    ExitCode::FAILURE
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_entry_success() {
        let entry = run_batch_entry(0, json!({ "calculator": "cagr", "input": { "begin_value": 100, "end_value": 100, "years": 3 } }));
        assert!(!entry.failed());
        assert_eq!(entry.result.unwrap()["cagr_pct"], 0.0);
    }

    #[test]
    fn test_batch_entry_reports_canonical_slug() {
        let entry = run_batch_entry(0, json!({ "calculator": "Mortgage", "input": { "price": 1200, "term_months": 12 } }));
        assert!(!entry.failed());
        assert_eq!(entry.calculator, "loan");

        let unknown = run_batch_entry(1, json!({ "calculator": "warp_drive" }));
        assert_eq!(unknown.calculator, "warp_drive");
    }

    #[test]
    fn test_batch_entry_failures() {
        let missing = run_batch_entry(1, json!({ "input": {} }));
        assert_eq!(missing.error.unwrap().error_code(), "MISSING_FIELD");

        let unknown = run_batch_entry(2, json!({ "calculator": "nope" }));
        assert_eq!(unknown.error.unwrap().error_code(), "UNKNOWN_CALCULATOR");

        let domain = run_batch_entry(3, json!({ "calculator": "sqrt", "input": { "value": -1 } }));
        assert_eq!(domain.calculator, "sqrt");
        assert_eq!(domain.error.unwrap().error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_read_inline_input() {
        assert_eq!(read_input(Some(" "), None).unwrap(), Value::Null);
        assert_eq!(read_input(Some("{\"a\": 1}"), None).unwrap(), json!({ "a": 1 }));
        assert!(read_input(Some("{oops"), None).is_err());
    }

    #[test]
    fn test_with_newline() {
        assert_eq!(with_newline("x".to_string()), "x\n");
        assert_eq!(with_newline("x\n".to_string()), "x\n");
    }
}
