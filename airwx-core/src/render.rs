//! Plain-text output: forecast tables, report blocks and airport listings.
//!
//! Renderers return lines without trailing newlines and keep no state
//! between calls; printing is left to the caller.

mod airport;
mod current;
mod forecast;

pub use airport::airport_line;
pub use current::{ReportContext, ReportOptions, render_report};
pub use forecast::{TableOptions, render_forecast_table};

/// Placeholder for a value the provider didn't send.
pub const MISSING: &str = "N/A";

/// Provider number as text, or [`MISSING`].
pub fn format_value(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_and_placeholders() {
        assert_eq!(format_value(Some(21.4)), "21.4");
        assert_eq!(format_value(Some(3.0)), "3");
        assert_eq!(format_value(None), "N/A");
    }
}
