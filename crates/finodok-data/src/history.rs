//! Daily closing-price history.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DataError, Result};

/// Window used for the moving average sent with analysis requests
pub const MEAN_WINDOW: usize = 30;

/// One trading day's close
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Headline numbers derived from a history
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSummary {
    /// Most recent close
    pub last_close: Option<f64>,
    /// Mean of the last 30 closes, absent with fewer than 30 points
    pub mean_30d: Option<f64>,
}

/// Closing prices in ascending date order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceHistory {
    points: Vec<PricePoint>,
}

impl PriceHistory {
    /// Build a history from points, sorting them by date
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    /// Load a history from a CSV file with `Date` and `Close` columns
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Load a history from CSV data
    ///
    /// Header names are matched case-insensitively and other columns are
    /// ignored. Rows whose date or close cannot be parsed are skipped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let date_col = find_column(&headers, "date").ok_or(DataError::MissingColumn("Date"))?;
        let close_col = find_column(&headers, "close").ok_or(DataError::MissingColumn("Close"))?;

        let mut points = Vec::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            let date = record.get(date_col).and_then(parse_date);
            let close = record
                .get(close_col)
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|c| c.is_finite());

            match (date, close) {
                (Some(date), Some(close)) => points.push(PricePoint { date, close }),
                _ => debug!(row = line + 1, "skipping unparsable price row"),
            }
        }

        Ok(Self::from_points(points))
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent closing price
    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// Mean of the last `window` closes, `None` when there are fewer points
    pub fn mean_close(&self, window: usize) -> Option<f64> {
        if window == 0 || self.points.len() < window {
            return None;
        }
        let tail = &self.points[self.points.len() - window..];
        Some(tail.iter().map(|p| p.close).sum::<f64>() / window as f64)
    }

    /// Lowest and highest close
    pub fn close_range(&self) -> Option<(f64, f64)> {
        let mut closes = self.points.iter().map(|p| p.close);
        let first = closes.next()?;
        Some(closes.fold((first, first), |(lo, hi), c| (lo.min(c), hi.max(c))))
    }

    pub fn summary(&self) -> PriceSummary {
        PriceSummary {
            last_close: self.last_close(),
            mean_30d: self.mean_close(MEAN_WINDOW),
        }
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

/// Parse `YYYY-MM-DD`, ignoring any time or zone suffix
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(closes: &[f64]) -> PriceHistory {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        PriceHistory::from_points(
            closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PricePoint {
                    date: start + chrono::Days::new(i as u64),
                    close,
                })
                .collect(),
        )
    }

    #[test]
    fn test_parse_csv() {
        let data = "Date,Open,Close,Volume\n\
                    2025-01-02,10,11.5,100\n\
                    2025-01-01,9,10.0,100\n";
        let history = PriceHistory::from_csv_reader(data.as_bytes()).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.points()[0].close, 10.0);
        assert_eq!(history.last_close(), Some(11.5));
    }

    #[test]
    fn test_headers_case_insensitive() {
        let data = "date,close\n2025-01-01 00:00:00+05:30,42.0\n";
        let history = PriceHistory::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(history.last_close(), Some(42.0));
    }

    #[test]
    fn test_bad_rows_skipped() {
        let data = "Date,Close\n2025-01-01,1.0\nnot-a-date,2.0\n2025-01-03,NaN\n2025-01-04,\n2025-01-05,5.0\n";
        let history = PriceHistory::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.last_close(), Some(5.0));
    }

    #[test]
    fn test_missing_close_column() {
        let data = "Date,Open\n2025-01-01,1.0\n";
        let result = PriceHistory::from_csv_reader(data.as_bytes());
        assert!(matches!(result, Err(DataError::MissingColumn("Close"))));
    }

    #[test]
    fn test_mean_close_window() {
        let closes: Vec<f64> = (1..=29).map(f64::from).collect();
        assert_eq!(history(&closes).mean_close(30), None);

        let closes: Vec<f64> = (1..=30).map(f64::from).collect();
        assert_eq!(history(&closes).mean_close(30), Some(15.5));

        let closes: Vec<f64> = (1..=40).map(f64::from).collect();
        assert_eq!(history(&closes).mean_close(30), Some(25.5));
        assert_eq!(history(&closes).mean_close(0), None);
    }

    #[test]
    fn test_summary() {
        let summary = history(&[3.0, 1.0, 2.0]).summary();
        assert_eq!(summary.last_close, Some(2.0));
        assert_eq!(summary.mean_30d, None);

        assert_eq!(PriceHistory::default().summary(), PriceSummary::default());
    }

    #[test]
    fn test_close_range() {
        assert_eq!(history(&[3.0, 1.0, 2.0]).close_range(), Some((1.0, 3.0)));
        assert_eq!(PriceHistory::default().close_range(), None);
    }
}
