//! Core types for the Energi Data Service SDK.
//!
//! This module provides the query filter and response types of the
//! `DayAheadPrices` dataset.

pub mod area;
mod fields;
pub mod record;
pub mod result;

pub use area::{PriceArea, PriceAreaFilter};
pub use record::PriceRecord;
pub use result::{PriceQueryResult, DAY_AHEAD_PRICES_DATASET};
