//! Core data types for scenefinder

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};

/// Closed interval of whole UTC days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a date range, rejecting a start after the end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidDateRange(format!("{} is after {}", start, end)));
        }
        Ok(Self { start, end })
    }

    /// Parses two `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|e| Error::InvalidDateRange(format!("'{}': {}", s, e)))
        };
        Self::new(parse(start)?, parse(end)?)
    }

    /// The `days` days leading up to and including `end`
    pub fn ending_at(end: NaiveDate, days: u64) -> Self {
        let start = end.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// RFC 3339 interval covering both boundary days completely
    pub fn to_stac_interval(&self) -> String {
        format!("{}T00:00:00Z/{}T23:59:59Z", self.start, self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// The best scene found by a search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneResult {
    /// Catalog item id
    pub id: String,
    /// Acquisition time, if the item carries one
    pub acquisition_time: Option<DateTime<Utc>>,
    /// Cloud cover percentage, if the item carries one
    pub cloud_cover: Option<f64>,
    /// Preview image
    pub thumbnail_url: Option<String>,
}

impl SceneResult {
    pub fn acquisition_time_label(&self) -> String {
        self.acquisition_time
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn cloud_cover_label(&self) -> String {
        self.cloud_cover
            .map(|c| format!("{:.2}%", c))
            .unwrap_or_else(|| "n/a".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_date_range_interval() {
        let range = DateRange::parse("2024-06-01", "2024-06-30").unwrap();
        assert_eq!(range.to_stac_interval(), "2024-06-01T00:00:00Z/2024-06-30T23:59:59Z");
        assert_eq!(range.to_string(), "2024-06-01 to 2024-06-30");
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date("2024-06-01"), date("2024-06-01")).unwrap();
        assert_eq!(range.start(), range.end());
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = DateRange::new(date("2024-07-01"), date("2024-06-01")).unwrap_err();
        assert!(matches!(err, Error::InvalidDateRange(_)));
    }

    #[test]
    fn test_unparsable_date_rejected() {
        assert!(DateRange::parse("2024-13-01", "2024-06-01").is_err());
        assert!(DateRange::parse("yesterday", "2024-06-01").is_err());
    }

    #[test]
    fn test_ending_at() {
        let range = DateRange::ending_at(date("2024-03-01"), 30);
        assert_eq!(range.start(), date("2024-01-31"));
        assert_eq!(range.end(), date("2024-03-01"));
    }

    #[test]
    fn test_scene_labels() {
        let scene = SceneResult {
            id: "S2B_10SEG_20240601_0_L2A".to_string(),
            acquisition_time: None,
            cloud_cover: Some(5.4),
            thumbnail_url: None,
        };
        assert_eq!(scene.cloud_cover_label(), "5.40%");
        assert_eq!(scene.acquisition_time_label(), "unknown");
    }
}
