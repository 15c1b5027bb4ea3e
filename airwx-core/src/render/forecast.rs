//! Fixed-width multi-day forecast table.

use crate::model::ForecastSeries;
use crate::text::{display_width, pad_left, pad_right, split_glyph};

use super::format_value;

const DATE_MIN_WIDTH: usize = 12;
const ICON_MIN_WIDTH: usize = 6;
const WEATHER_MIN_WIDTH: usize = 22;
const VALUE_MIN_WIDTH: usize = 8;

/// Rendering knobs for [`render_forecast_table`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions<'a> {
    /// Appended to temperature cells, e.g. `"°C"`.
    pub unit_symbol: &'a str,
    /// Adds a separate icon column.
    pub show_icons: bool,
    /// Rows to render; capped at the series length.
    pub day_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

#[derive(Debug)]
struct Column {
    header: &'static str,
    align: Align,
    min_width: usize,
    cells: Vec<String>,
}

impl Column {
    fn new(header: &'static str, align: Align, min_width: usize) -> Self {
        Self {
            header,
            align,
            min_width,
            cells: Vec::new(),
        }
    }

    fn width(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| display_width(cell))
            .chain([display_width(self.header), self.min_width])
            .max()
            .unwrap_or(self.min_width)
    }

    fn pad(&self, text: &str, width: usize) -> String {
        match self.align {
            Align::Left => pad_right(text, width),
            Align::Right => pad_left(text, width),
        }
    }
}

// `HH:MM` tail of an ISO timestamp such as `2024-06-01T05:25`.
fn clock_time(timestamp: Option<&str>) -> String {
    let Some(timestamp) = timestamp else {
        return String::new();
    };
    let skip = timestamp.chars().count().saturating_sub(5);
    timestamp.chars().skip(skip).collect()
}

fn build_columns(series: &ForecastSeries, options: &TableOptions<'_>) -> Vec<Column> {
    let mut date = Column::new("Date", Align::Left, DATE_MIN_WIDTH);
    let mut icon = Column::new("Wx", Align::Left, ICON_MIN_WIDTH);
    let mut weather = Column::new("Weather", Align::Left, WEATHER_MIN_WIDTH);
    let mut high = Column::new("High", Align::Right, VALUE_MIN_WIDTH);
    let mut low = Column::new("Low", Align::Right, VALUE_MIN_WIDTH);
    let mut precip = Column::new("Precip", Align::Right, VALUE_MIN_WIDTH);
    let mut sunrise = Column::new("Sunrise", Align::Right, VALUE_MIN_WIDTH);
    let mut sunset = Column::new("Sunset", Align::Right, VALUE_MIN_WIDTH);

    let temperature = |value: Option<f64>| match value {
        Some(v) => format!("{v}{}", options.unit_symbol),
        None => format_value(None),
    };

    for day in series.days().take(options.day_count) {
        if options.show_icons {
            let combined = day.condition.display(true);
            let (glyph, description) = split_glyph(&combined);
            icon.cells.push(glyph.to_string());
            weather.cells.push(description.to_string());
        } else {
            weather.cells.push(day.condition.label().to_string());
        }

        date.cells.push(day.date.to_string());
        high.cells.push(temperature(day.temp_max));
        low.cells.push(temperature(day.temp_min));
        precip.cells.push(match day.precipitation {
            Some(v) => format!("{v}mm"),
            None => format_value(None),
        });
        sunrise.cells.push(clock_time(day.sunrise));
        sunset.cells.push(clock_time(day.sunset));
    }

    let mut columns = vec![date];
    if options.show_icons {
        columns.push(icon);
    }
    columns.extend([weather, high, low, precip, sunrise, sunset]);
    columns
}

/// Render `series` as a header row, a dashed rule and one row per day.
///
/// Every column is as wide as its widest cell or header, but never narrower
/// than its minimum. Cells are padded, never truncated, so each row has the
/// same display width as the header and the rule. An empty series yields
/// just the header and rule.
pub fn render_forecast_table(series: &ForecastSeries, options: &TableOptions<'_>) -> Vec<String> {
    let columns = build_columns(series, options);
    let widths: Vec<usize> = columns.iter().map(Column::width).collect();
    let rows = columns.first().map(|c| c.cells.len()).unwrap_or(0);

    let mut lines = Vec::with_capacity(rows + 2);
    lines.push(join_row(&columns, &widths, |column| column.header));
    lines.push("-".repeat(widths.iter().sum::<usize>() + widths.len().saturating_sub(1)));
    for row in 0..rows {
        lines.push(join_row(&columns, &widths, |column| column.cells[row].as_str()));
    }
    lines
}

fn join_row(columns: &[Column], widths: &[usize], cell: impl Fn(&Column) -> &str) -> String {
    columns
        .iter()
        .zip(widths)
        .map(|(column, &width)| column.pad(cell(column), width))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn series(codes: &[i64]) -> ForecastSeries {
        let n = codes.len();
        ForecastSeries {
            dates: (0..n).map(|i| format!("2024-06-{:02}", i + 1)).collect(),
            temp_max: (0..n).map(|i| Some(20.5 + i as f64)).collect(),
            temp_min: (0..n).map(|i| Some(10.0 - i as f64 * 7.5)).collect(),
            weather_codes: codes.iter().map(|c| json!(c)).collect(),
            precipitation: (0..n).map(|i| Some(i as f64 * 12.25)).collect(),
            sunrise: (0..n)
                .map(|i| Some(format!("2024-06-{:02}T05:2{}", i + 1, i % 10)))
                .collect(),
            sunset: (0..n)
                .map(|i| Some(format!("2024-06-{:02}T20:3{}", i + 1, i % 10)))
                .collect(),
        }
    }

    fn options(show_icons: bool, day_count: usize) -> TableOptions<'static> {
        TableOptions {
            unit_symbol: "°C",
            show_icons,
            day_count,
        }
    }

    #[test]
    fn three_days_with_icons() {
        let series = series(&[0, 61, 999]);
        let options = options(true, 3);

        let columns = build_columns(&series, &options);
        let icon = &columns[1];
        assert_eq!(icon.header, "Wx");
        assert!(!icon.cells[0].is_empty());
        assert!(!icon.cells[1].is_empty());
        assert!(icon.cells[2].is_empty());
        assert_eq!(columns[2].cells, vec!["Clear", "Rain", "Unknown"]);

        let mins = [12, 6, 22, 8, 8, 8, 8, 8];
        for (column, min) in columns.iter().zip(mins) {
            assert!(column.width() >= min, "{} narrower than {min}", column.header);
        }

        let lines = render_forecast_table(&series, &options);
        assert_eq!(lines.len(), 2 + 3);
    }

    #[test]
    fn rows_stay_aligned_with_mixed_glyphs() {
        let series = series(&[0, 1, 45, 51, 61, 71, 95, 999, 3]);
        for show_icons in [true, false] {
            let lines = render_forecast_table(&series, &options(show_icons, 9));
            let header = display_width(&lines[0]);

            assert_eq!(lines[1].len(), header);
            for line in &lines[2..] {
                assert_eq!(display_width(line), header, "misaligned: {line:?}");
            }
        }
    }

    #[test]
    fn header_and_rule_at_minimum_widths() {
        let lines = render_forecast_table(&ForecastSeries::default(), &options(true, 7));

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Date         Wx     Weather                    High      Low   Precip  Sunrise   Sunset"
        );
        assert_eq!(lines[1], "-".repeat(12 + 6 + 22 + 8 * 5 + 7));

        let plain = render_forecast_table(&ForecastSeries::default(), &options(false, 7));
        assert!(!plain[0].contains("Wx"));
        assert_eq!(plain[1], "-".repeat(12 + 22 + 8 * 5 + 6));
    }

    #[test]
    fn row_cells_are_formatted_and_aligned() {
        let lines = render_forecast_table(&series(&[61]), &options(false, 1));

        assert_eq!(
            lines[2],
            "2024-06-01   Rain                     20.5°C     10°C      0mm    05:20    20:30"
        );
    }

    #[test]
    fn wide_cells_widen_their_column() {
        let mut series = series(&[0]);
        series.dates[0] = "2024-06-01 (Saturday)".into();
        series.precipitation[0] = Some(1234567.5);

        let lines = render_forecast_table(&series, &options(false, 1));
        assert!(lines[2].starts_with("2024-06-01 (Saturday) Clear"));
        assert!(lines[2].contains(" 1234567.5mm "));
        assert_eq!(display_width(&lines[0]), display_width(&lines[2]));
    }

    #[test]
    fn day_count_is_capped_by_series() {
        let series = series(&[0, 1, 2]);
        assert_eq!(render_forecast_table(&series, &options(true, 16)).len(), 5);
        assert_eq!(render_forecast_table(&series, &options(true, 1)).len(), 3);
    }

    #[test]
    fn missing_values_degrade_to_placeholders() {
        let mut series = series(&[0]);
        series.temp_max = vec![None];
        series.precipitation.clear();
        series.sunrise = vec![None];
        series.sunset = vec![Some("bad".into())];
        series.weather_codes = vec![json!("abc")];

        let columns = build_columns(&series, &options(false, 1));
        assert_eq!(columns[1].cells, vec!["Unknown"]);
        assert_eq!(columns[2].cells, vec!["N/A"]);
        assert_eq!(columns[4].cells, vec!["N/A"]);
        assert_eq!(columns[5].cells, vec![""]);
        assert_eq!(columns[6].cells, vec!["bad"]);
    }

    #[test]
    fn rendering_is_idempotent() {
        let series = series(&[0, 61, 95]);
        let options = options(true, 3);
        assert_eq!(
            render_forecast_table(&series, &options),
            render_forecast_table(&series, &options)
        );
    }
}
