//! Rendering of listings, results and errors.

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use calc_core::registry::{CalculatorInfo, CalculatorKind, Category};
use calc_core::CalcError;

use crate::config::OutputFormat;

/// One entry of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub index: usize,
    pub calculator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CalcError>,
}

impl BatchEntry {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Error body written to stderr.
#[derive(Debug, Serialize)]
struct ErrorReport<'a> {
    code: &'static str,
    message: String,
    error: &'a CalcError,
}

/// Format a number for humans: whole numbers without decimals, otherwise
/// up to four decimals with trailing zeros trimmed.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let text = format!("{:.4}", value);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("-".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.as_f64().map(format_number).unwrap_or_else(|| n.to_string())),
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.iter().all(|v| !v.is_object() && !v.is_array()) => {
            let parts: Vec<String> = items.iter().filter_map(scalar).collect();
            Some(format!("[{}]", parts.join(", ")))
        }
        _ => None,
    }
}

fn render_into(out: &mut String, value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(map) => {
            let width = map.keys().map(|k| k.len()).max().unwrap_or(0);
            for (key, field) in map {
                match scalar(field) {
                    Some(text) => {
                        let _ = writeln!(out, "{}{:<width$}  {}", pad, key, text, width = width);
                    }
                    None => {
                        let _ = writeln!(out, "{}{}:", pad, key);
                        render_into(out, field, indent + 1);
                    }
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                match scalar(item) {
                    Some(text) => {
                        let _ = writeln!(out, "{}[{}] {}", pad, i, text);
                    }
                    None => {
                        let _ = writeln!(out, "{}[{}]", pad, i);
                        render_into(out, item, indent + 1);
                    }
                }
            }
        }
        other => {
            let _ = writeln!(out, "{}{}", pad, scalar(other).unwrap_or_default());
        }
    }
}

/// Render any JSON value as indented key/value text.
pub fn render_pretty(value: &Value) -> String {
    let mut out = String::new();
    render_into(&mut out, value, 0);
    out
}

/// Serialize for stdout in the chosen format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value),
        OutputFormat::Pretty => Ok(render_pretty(&serde_json::to_value(value)?)),
    }
}

/// Calculator listing, grouped by category in pretty mode.
pub fn render_list(kinds: &[CalculatorKind], format: OutputFormat) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        let infos: Vec<CalculatorInfo> = kinds.iter().map(|k| k.info()).collect();
        return serde_json::to_string_pretty(&infos);
    }

    let mut categories: Vec<Category> = Category::ALL.to_vec();
    categories.sort_by_key(|c| c.sort_order());
    let width = kinds.iter().map(|k| k.slug().len()).max().unwrap_or(0);

    let mut out = String::new();
    for category in categories {
        let members: Vec<&CalculatorKind> = kinds.iter().filter(|k| k.category() == category).collect();
        if members.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", category.display_name());
        for kind in members {
            let _ = writeln!(out, "  {:<width$}  {}", kind.slug(), kind.title(), width = width);
        }
    }
    Ok(out)
}

/// Title, category, description and default input of one calculator.
pub fn render_description(kind: CalculatorKind, defaults: &Value, format: OutputFormat) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(&serde_json::json!({
            "slug": kind.slug(),
            "title": kind.title(),
            "category": kind.category(),
            "description": kind.description(),
            "default_input": defaults,
        }));
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", kind.title(), kind.slug());
    let _ = writeln!(out, "Category: {}", kind.category().display_name());
    let _ = writeln!(out, "{}", kind.description());
    let _ = writeln!(out);
    let _ = writeln!(out, "Default input:");
    let _ = write!(out, "{}", serde_json::to_string_pretty(defaults)?);
    let _ = writeln!(out);
    Ok(out)
}

/// Error report for stderr; always JSON so scripts can parse it.
pub fn render_error(error: &CalcError) -> String {
    let report = ErrorReport {
        code: error.error_code(),
        message: error.to_string(),
        error,
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(3.14159), "3.1416");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.00001), "0");
    }

    #[test]
    fn test_render_pretty_nested() {
        let text = render_pretty(&json!({
            "total": 120.0,
            "rows": [{ "period": 1 }],
            "roots": [1.0, 2.5],
        }));
        assert!(text.contains("total  120"));
        assert!(text.contains("roots  [1, 2.5]"));
        assert!(text.contains("rows:\n  [0]\n    period  1"));
    }

    #[test]
    fn test_render_list_pretty_groups() {
        let text = render_list(&[CalculatorKind::Bmi, CalculatorKind::Loan], OutputFormat::Pretty).unwrap();
        let finance = text.find("Finance").unwrap();
        let fitness = text.find("Fitness").unwrap();
        assert!(finance < fitness);
        assert!(text.contains("loan  Loan Amortization"));
    }

    #[test]
    fn test_render_error_is_json() {
        let error = CalcError::unknown_calculator("warp");
        let value: Value = serde_json::from_str(&render_error(&error)).unwrap();
        assert_eq!(value["code"], "UNKNOWN_CALCULATOR");
        assert_eq!(value["error"]["type"], "UnknownCalculator");
    }
}
