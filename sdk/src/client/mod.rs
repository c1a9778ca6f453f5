//! HTTP client for the Energi Data Service REST API.
//!
//! This module provides a type-safe client for the `DayAheadPrices` dataset.
//!
//! # Example
//!
//! ```rust,ignore
//! use energidata_sdk::client::{ClientConfig, EnergiDataClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EnergiDataClient::new(ClientConfig::default())?;
//!
//!     // Last 24 hourly prices for western Denmark
//!     let prices = client.fetch_day_ahead_prices_for_area("DK1", Some(24)).await?;
//!     println!("Found {} records", prices.len());
//!
//!     // Both areas in one request
//!     let both = client.fetch_day_ahead_prices(&["DK1", "DK2"], None).await?;
//!     println!("Cheapest: {:?}", both.cheapest());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::EnergiDataClient;
pub use query::{DayAheadQuery, DEFAULT_LIMIT};
pub use transport::{ReqwestTransport, Transport, TransportResponse};
