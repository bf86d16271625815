//! CLI command implementations.

pub mod forecast;
pub mod plan;
pub mod preview;
pub mod request;

/// Placeholder for values that are absent.
pub const PLACEHOLDER: &str = "—";

/// Format an optional number, or the placeholder.
pub fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
