//! Energidata SDK - Rust client library for the Energi Data Service API.
//!
//! This crate fetches day-ahead electricity prices from the public
//! `DayAheadPrices` dataset at <https://api.energidataservice.dk>.
//!
//! # Core Types
//!
//! - [`PriceArea`] — Validated price area code (`DK1`, `DK2`, ...)
//! - [`PriceAreaFilter`] — Non-empty, ordered list of areas sent as `filter`
//! - [`PriceRecord`] — One hourly price in EUR/MWh and DKK/MWh
//! - [`PriceQueryResult`] — Response envelope with records in server order
//!
//! # Client
//!
//! - [`EnergiDataClient`] — Builds the query, performs the GET, parses the body
//! - [`ClientConfig`] — Base URL, timeout and user agent
//! - [`Transport`] — Pluggable HTTP capability, `reqwest` by default
//!
//! # Example
//!
//! ```rust
//! use energidata_sdk::{PriceArea, PriceAreaFilter};
//!
//! let filter = PriceAreaFilter::from_codes(["DK1", "DK2"]).unwrap();
//! assert_eq!(filter.areas()[0], PriceArea::DK1);
//! assert_eq!(filter.to_json().unwrap(), r#"{"PriceArea":["DK1","DK2"]}"#);
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{ClientConfig, ClientError, EnergiDataClient, Transport, TransportResponse};
pub use error::SdkError;
pub use types::{PriceArea, PriceAreaFilter, PriceQueryResult, PriceRecord};
