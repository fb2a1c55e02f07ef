//! finodok-data - price data for reports
//!
//! Loads daily closing prices, derives the figures a report and an analysis
//! request need, and draws the price chart embedded in the report.
//!
//! # Example
//!
//! ```
//! use finodok_data::{exchange_symbol, PriceHistory};
//!
//! let csv = "Date,Close\n2025-01-01,100.0\n2025-01-02,101.5\n";
//! let history = PriceHistory::from_csv_reader(csv.as_bytes()).unwrap();
//!
//! assert_eq!(history.last_close(), Some(101.5));
//! assert_eq!(exchange_symbol("TCS", "NSE"), "TCS.NS");
//! ```

pub mod chart;
pub mod error;
pub mod history;
pub mod symbol;

pub use chart::ChartRenderer;
pub use error::{DataError, Result};
pub use history::{PriceHistory, PricePoint, PriceSummary, MEAN_WINDOW};
pub use symbol::exchange_symbol;
