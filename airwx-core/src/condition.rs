//! Open-Meteo (WMO) weather code classification.
//!
//! Code table: <https://open-meteo.com/en/docs#weathervariables>

use serde_json::Value;

/// Coarse sky/precipitation condition derived from a provider weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Clear,
    PartlyCloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl Condition {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Condition::Clear,
            1..=3 => Condition::PartlyCloudy,
            45 | 48 => Condition::Fog,
            51 | 53 | 55 | 56 | 57 => Condition::Drizzle,
            61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => Condition::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => Condition::Snow,
            95 | 96 | 99 => Condition::Thunderstorm,
            _ => Condition::Unknown,
        }
    }

    /// Classify a textual code. Anything that is not an integer is unknown.
    pub fn parse(code: &str) -> Self {
        code.trim()
            .parse::<i64>()
            .map(Self::from_code)
            .unwrap_or(Condition::Unknown)
    }

    /// Classify a raw JSON value as returned by the provider.
    ///
    /// Numbers are truncated toward zero, numeric strings are parsed, and
    /// everything else (null, bool, arrays, garbage) is unknown.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(code) => Self::from_code(code),
                None => n
                    .as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| Self::from_code(f.trunc() as i64))
                    .unwrap_or(Condition::Unknown),
            },
            Value::String(s) => Self::parse(s),
            _ => Condition::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::PartlyCloudy => "Partly Cloudy",
            Condition::Fog => "Fog",
            Condition::Drizzle => "Drizzle",
            Condition::Rain => "Rain",
            Condition::Snow => "Snow",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Unknown => "Unknown",
        }
    }

    /// Emoji for the condition; empty for [`Condition::Unknown`].
    pub fn icon(&self) -> &'static str {
        match self {
            Condition::Clear => "☀️",
            Condition::PartlyCloudy => "⛅",
            Condition::Fog => "🌫️",
            Condition::Drizzle => "🌦️",
            Condition::Rain => "🌧️",
            Condition::Snow => "❄️",
            Condition::Thunderstorm => "⛈️",
            Condition::Unknown => "",
        }
    }

    /// Combined `"<icon> <label>"` text, or just the label.
    pub fn display(&self, with_icon: bool) -> String {
        let icon = self.icon();
        if with_icon && !icon.is_empty() {
            format!("{icon} {}", self.label())
        } else {
            self.label().to_string()
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// `(label, icon)` for a provider weather code value.
pub fn classify(value: &Value) -> (&'static str, &'static str) {
    let condition = Condition::from_value(value);
    (condition.label(), condition.icon())
}
