// Data models for progression queries

use crate::core::errors::ProgressionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects which transformation is applied to the raw elapsed seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputFormat {
    /// Raw seconds elapsed within each unit
    Seconds,
    /// Elapsed share of each unit, in percent
    Percentage,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Seconds => "second",
            OutputFormat::Percentage => "percent",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "second" => Ok(OutputFormat::Seconds),
            "percent" => Ok(OutputFormat::Percentage),
            _ => Err(ProgressionError::InvalidFormat),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = ProgressionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.as_str().to_string()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional simplification applied to every value after computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Round,
    Ceil,
    Floor,
}

impl Rounding {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Rounding::Round => value.round(),
            Rounding::Ceil => value.ceil(),
            Rounding::Floor => value.floor(),
        }
    }
}

/// Returned when a rounding name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRounding(pub String);

impl fmt::Display for UnknownRounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rounding '{}'", self.0)
    }
}

impl std::error::Error for UnknownRounding {}

impl FromStr for Rounding {
    type Err = UnknownRounding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "round" => Ok(Rounding::Round),
            "ceil" => Ok(Rounding::Ceil),
            "floor" => Ok(Rounding::Floor),
            _ => Err(UnknownRounding(s.to_string())),
        }
    }
}

/// Per-unit progression, either raw seconds or percentages
///
/// Field order matches the serialized JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressionValues {
    pub year: f64,
    pub month: f64,
    pub week: f64,
    pub day: f64,
    pub hour: f64,
    pub minute: f64,
}

impl ProgressionValues {
    /// Apply `f` to every field
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            year: f(self.year),
            month: f(self.month),
            week: f(self.week),
            day: f(self.day),
            hour: f(self.hour),
            minute: f(self.minute),
        }
    }

    pub fn rounded(self, rounding: Rounding) -> Self {
        self.map(|v| rounding.apply(v))
    }

    /// Fields paired with their names, year first
    pub fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("year", self.year),
            ("month", self.month),
            ("week", self.week),
            ("day", self.day),
            ("hour", self.hour),
            ("minute", self.minute),
        ]
    }
}

/// Result of one progression query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionResult {
    /// Zone identifier exactly as the caller supplied it
    pub timezone: String,
    /// RFC 1123 style rendering of the evaluated instant
    pub timestamp: String,
    pub result: ProgressionValues,
}
