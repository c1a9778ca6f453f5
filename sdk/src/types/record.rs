//! Day-ahead price record.
//!
//! One hourly price observation for a single price area.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::de::{Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Serialize;

use super::area::PriceArea;
use super::fields;

/// A single hourly day-ahead price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRecord {
    #[serde(rename = "TimeUTC")]
    time_utc: NaiveDateTime,

    #[serde(rename = "TimeDK")]
    time_dk: NaiveDateTime,

    #[serde(rename = "PriceArea")]
    price_area: String,

    #[serde(rename = "DayAheadPriceEUR")]
    day_ahead_price_eur: Decimal,

    #[serde(rename = "DayAheadPriceDKK")]
    day_ahead_price_dkk: Decimal,
}

impl PriceRecord {
    /// Creates a new price record.
    #[must_use]
    pub fn new(
        time_utc: NaiveDateTime,
        time_dk: NaiveDateTime,
        price_area: impl Into<String>,
        day_ahead_price_eur: Decimal,
        day_ahead_price_dkk: Decimal,
    ) -> Self {
        Self {
            time_utc,
            time_dk,
            price_area: price_area.into(),
            day_ahead_price_eur,
            day_ahead_price_dkk,
        }
    }

    /// Start of the delivery hour in UTC, as sent by the API (no offset).
    #[must_use]
    pub fn time_utc(&self) -> NaiveDateTime {
        self.time_utc
    }

    /// Start of the delivery hour in UTC.
    #[must_use]
    pub fn time_utc_as_utc(&self) -> DateTime<Utc> {
        self.time_utc.and_utc()
    }

    /// Start of the delivery hour in Danish local time.
    #[must_use]
    pub fn time_dk(&self) -> NaiveDateTime {
        self.time_dk
    }

    /// Price area code of this record.
    #[must_use]
    pub fn price_area(&self) -> &str {
        &self.price_area
    }

    /// Returns true if the record belongs to `area`.
    #[must_use]
    pub fn is_in_area(&self, area: &PriceArea) -> bool {
        self.price_area == area.as_str()
    }

    /// Day-ahead price in EUR/MWh.
    #[must_use]
    pub fn day_ahead_price_eur(&self) -> Decimal {
        self.day_ahead_price_eur
    }

    /// Day-ahead price in DKK/MWh.
    #[must_use]
    pub fn day_ahead_price_dkk(&self) -> Decimal {
        self.day_ahead_price_dkk
    }
}

impl fmt::Display for PriceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {:.2} DKK/MWh | {:.2} EUR/MWh",
            self.time_dk.format("%Y-%m-%d %H:%M"),
            self.price_area,
            self.day_ahead_price_dkk.round_dp(2),
            self.day_ahead_price_eur.round_dp(2)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordField {
    TimeUtc,
    TimeDk,
    PriceArea,
    PriceEur,
    PriceDkk,
}

const RECORD_FIELDS: &[(&str, RecordField)] = &[
    ("TimeUTC", RecordField::TimeUtc),
    ("TimeDK", RecordField::TimeDk),
    ("PriceArea", RecordField::PriceArea),
    ("DayAheadPriceEUR", RecordField::PriceEur),
    ("DayAheadPriceDKK", RecordField::PriceDkk),
];

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = PriceRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a day-ahead price record object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut time_utc = None;
        let mut time_dk = None;
        let mut price_area = None;
        let mut price_eur = None;
        let mut price_dkk = None;

        while let Some(key) = map.next_key::<String>()? {
            match fields::lookup(RECORD_FIELDS, &key) {
                Some(RecordField::TimeUtc) => fields::fill(&mut time_utc, &mut map, "TimeUTC")?,
                Some(RecordField::TimeDk) => fields::fill(&mut time_dk, &mut map, "TimeDK")?,
                Some(RecordField::PriceArea) => {
                    fields::fill(&mut price_area, &mut map, "PriceArea")?
                }
                Some(RecordField::PriceEur) => {
                    fields::fill(&mut price_eur, &mut map, "DayAheadPriceEUR")?
                }
                Some(RecordField::PriceDkk) => {
                    fields::fill(&mut price_dkk, &mut map, "DayAheadPriceDKK")?
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(PriceRecord {
            time_utc: fields::require::<_, A::Error>(time_utc, "TimeUTC")?,
            time_dk: fields::require::<_, A::Error>(time_dk, "TimeDK")?,
            price_area: fields::require::<_, A::Error>(price_area, "PriceArea")?,
            day_ahead_price_eur: fields::require::<_, A::Error>(price_eur, "DayAheadPriceEUR")?,
            day_ahead_price_dkk: fields::require::<_, A::Error>(price_dkk, "DayAheadPriceDKK")?,
        })
    }
}

impl<'de> Deserialize<'de> for PriceRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}
