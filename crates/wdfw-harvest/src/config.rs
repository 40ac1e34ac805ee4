use crate::types::OutputFormat;

use chrono::Datelike;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL_TEMPLATE: &str =
    "https://wdfw.wa.gov/hunting/management/game-harvest/{year}/deer-general";

pub const YEAR_PLACEHOLDER: &str = "{year}";

pub const DEFAULT_START_YEAR: u16 = 2013;
pub const DEFAULT_END_YEAR: u16 = 2024;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

const EARLIEST_YEAR: u16 = 1900;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub start_year: u16,
    pub end_year: u16,
    pub output_path: PathBuf,
    pub base_url_template: String,
    /// Pause between consecutive page fetches.
    pub delay: Duration,
    pub format: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            output_path: default_output_path(
                DEFAULT_START_YEAR,
                DEFAULT_END_YEAR,
                OutputFormat::Csv,
            ),
            base_url_template: DEFAULT_BASE_URL_TEMPLATE.to_string(),
            delay: DEFAULT_DELAY,
            format: OutputFormat::Csv,
        }
    }
}

/// `deer_harvest_2013_2024.csv`, or `deer_harvest_2024.csv` for a single year.
pub fn default_output_path(start_year: u16, end_year: u16, format: OutputFormat) -> PathBuf {
    if start_year == end_year {
        PathBuf::from(format!("deer_harvest_{start_year}.{format}"))
    } else {
        PathBuf::from(format!("deer_harvest_{start_year}_{end_year}.{format}"))
    }
}

pub fn render_url(template: &str, year: u16) -> String {
    template.replace(YEAR_PLACEHOLDER, &year.to_string())
}

impl RunConfig {
    pub fn years(&self) -> RangeInclusive<u16> {
        self.start_year..=self.end_year
    }

    pub fn url_for(&self, year: u16) -> String {
        render_url(&self.base_url_template, year)
    }

    pub fn validate(self) -> Result<Self, String> {
        if self.start_year > self.end_year {
            return Err(format!(
                "Start year ({}) cannot be after end year ({})",
                self.start_year, self.end_year
            ));
        }
        if self.start_year < EARLIEST_YEAR {
            return Err(format!(
                "Start year ({}) must be {EARLIEST_YEAR} or later",
                self.start_year
            ));
        }
        let current_year = chrono::Local::now().year();
        if i32::from(self.end_year) > current_year {
            return Err(format!(
                "End year ({}) cannot be after the current year ({current_year})",
                self.end_year
            ));
        }
        if !self.base_url_template.contains(YEAR_PLACEHOLDER) {
            return Err(format!(
                "Base URL template '{}' must contain {YEAR_PLACEHOLDER}",
                self.base_url_template
            ));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err("Output path cannot be empty".to_string());
        }
        Ok(self)
    }
}
