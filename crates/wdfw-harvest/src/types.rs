use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
#[error("Invalid output format '{0}'. Accepted values: 'csv', 'json'")]
pub struct OutputFormatParseError(String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(OutputFormatParseError(s.to_string())),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// A flat output row with a fixed column order.
pub trait FlatRecord {
    const COLUMNS: &'static [&'static str];
}

/// One harvest method of one unit in one reporting year.
///
/// Numeric columns are kept as cleaned cell text so that suffixes such as
/// `%` survive into the output untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestRecord {
    pub year: u16,
    pub district: String,
    pub unit_id: String,
    pub unit_name: String,
    pub method: String,
    pub antlerless_harvest: String,
    pub antlered_harvest: String,
    pub total_harvest: String,
    pub points_1: String,
    pub points_2: String,
    pub points_3: String,
    pub points_4: String,
    pub points_5_plus: String,
    pub hunters: String,
    pub success_rate: String,
    pub hunter_days: String,
    pub days_per_kill: String,
}

impl FlatRecord for HarvestRecord {
    const COLUMNS: &'static [&'static str] = &[
        "year",
        "district",
        "unit_id",
        "unit_name",
        "method",
        "antlerless_harvest",
        "antlered_harvest",
        "total_harvest",
        "points_1",
        "points_2",
        "points_3",
        "points_4",
        "points_5_plus",
        "hunters",
        "success_rate",
        "hunter_days",
        "days_per_kill",
    ];
}

impl Display for HarvestRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} - {} ({}): {} harvested by {} hunters",
            self.year, self.unit_id, self.unit_name, self.method, self.total_harvest, self.hunters
        )
    }
}

/// Per-unit aggregate of a single reporting period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub district: String,
    pub unit_id: String,
    pub unit_name: String,
    pub archery_hunters: String,
    pub archery_harvest: String,
    pub archery_success_rate: String,
    pub archery_days_per_kill: String,
    pub total_hunters: String,
    pub total_harvest: String,
    pub overall_success_rate: String,
    pub overall_days_per_kill: String,
}

impl FlatRecord for SummaryRecord {
    const COLUMNS: &'static [&'static str] = &[
        "district",
        "unit_id",
        "unit_name",
        "archery_hunters",
        "archery_harvest",
        "archery_success_rate",
        "archery_days_per_kill",
        "total_hunters",
        "total_harvest",
        "overall_success_rate",
        "overall_days_per_kill",
    ];
}

impl Display for SummaryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.unit_id, self.unit_name)?;
        if !self.district.is_empty() {
            write!(f, " (District {})", self.district)?;
        }
        write!(
            f,
            ": {} harvested by {} hunters",
            self.total_harvest, self.total_hunters
        )?;
        if !self.overall_success_rate.is_empty() {
            write!(f, ", {} success", self.overall_success_rate)?;
        }
        Ok(())
    }
}
