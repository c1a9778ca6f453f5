//! Day-ahead price query result.
//!
//! Provides the response envelope returned by the `DayAheadPrices` dataset
//! together with a few summaries over its records.

use std::fmt;

use rust_decimal::Decimal;
use serde::de::{Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Serialize;

use super::area::PriceArea;
use super::fields;
use super::record::PriceRecord;

/// Name of the day-ahead price dataset.
pub const DAY_AHEAD_PRICES_DATASET: &str = "DayAheadPrices";

/// Result of a day-ahead price query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQueryResult {
    total: u64,
    filters: String,
    limit: u32,
    dataset: String,
    records: Vec<PriceRecord>,
}

impl PriceQueryResult {
    /// Creates a new result.
    #[must_use]
    pub fn new(
        total: u64,
        filters: impl Into<String>,
        limit: u32,
        dataset: impl Into<String>,
        records: Vec<PriceRecord>,
    ) -> Self {
        Self {
            total,
            filters: filters.into(),
            limit,
            dataset: dataset.into(),
            records,
        }
    }

    /// Total number of records available on the server.
    ///
    /// May exceed the number of records returned.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Filter string echoed back by the server.
    #[must_use]
    pub fn filters(&self) -> &str {
        &self.filters
    }

    /// Limit applied to the query.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Dataset name.
    #[must_use]
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Records in the order the server returned them.
    #[must_use]
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Consumes the result and returns its records.
    #[must_use]
    pub fn into_records(self) -> Vec<PriceRecord> {
        self.records
    }

    /// Number of records returned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were returned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of a single price area, in received order.
    pub fn records_for_area<'a>(
        &'a self,
        area: &'a PriceArea,
    ) -> impl Iterator<Item = &'a PriceRecord> + 'a {
        self.records.iter().filter(move |r| r.is_in_area(area))
    }

    /// Average DKK price of an area, or `None` if the area has no records.
    #[must_use]
    pub fn average_price_dkk(&self, area: &PriceArea) -> Option<Decimal> {
        average(self.records_for_area(area).map(PriceRecord::day_ahead_price_dkk))
    }

    /// Average EUR price of an area, or `None` if the area has no records.
    #[must_use]
    pub fn average_price_eur(&self, area: &PriceArea) -> Option<Decimal> {
        average(self.records_for_area(area).map(PriceRecord::day_ahead_price_eur))
    }

    /// Record with the lowest DKK price; the first one wins a tie.
    #[must_use]
    pub fn cheapest(&self) -> Option<&PriceRecord> {
        self.records.iter().min_by_key(|r| r.day_ahead_price_dkk())
    }

    /// Record with the highest DKK price; the last one wins a tie.
    #[must_use]
    pub fn most_expensive(&self) -> Option<&PriceRecord> {
        self.records.iter().max_by_key(|r| r.day_ahead_price_dkk())
    }

    /// Difference between the most expensive and cheapest DKK price.
    #[must_use]
    pub fn spread_dkk(&self) -> Option<Decimal> {
        match (self.most_expensive(), self.cheapest()) {
            (Some(high), Some(low)) => high
                .day_ahead_price_dkk()
                .checked_sub(low.day_ahead_price_dkk()),
            _ => None,
        }
    }
}

impl fmt::Display for PriceQueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} records (limit {})",
            self.dataset,
            self.records.len(),
            self.total,
            self.limit
        )
    }
}

fn average(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    let (sum, count) = values.fold(Some((Decimal::ZERO, 0u32)), |acc, value| {
        let (sum, count) = acc?;
        Some((sum.checked_add(value)?, count.checked_add(1)?))
    })?;

    if count == 0 {
        return None;
    }
    sum.checked_div(Decimal::from(count))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResultField {
    Total,
    Filters,
    Limit,
    Dataset,
    Records,
}

const RESULT_FIELDS: &[(&str, ResultField)] = &[
    ("total", ResultField::Total),
    ("filters", ResultField::Filters),
    ("limit", ResultField::Limit),
    ("dataset", ResultField::Dataset),
    ("records", ResultField::Records),
];

struct ResultVisitor;

impl<'de> Visitor<'de> for ResultVisitor {
    type Value = PriceQueryResult;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a day-ahead price response object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut total = None;
        let mut filters = None;
        let mut limit = None;
        let mut dataset = None;
        let mut records = None;

        while let Some(key) = map.next_key::<String>()? {
            match fields::lookup(RESULT_FIELDS, &key) {
                Some(ResultField::Total) => fields::fill(&mut total, &mut map, "total")?,
                Some(ResultField::Filters) => fields::fill(&mut filters, &mut map, "filters")?,
                Some(ResultField::Limit) => fields::fill(&mut limit, &mut map, "limit")?,
                Some(ResultField::Dataset) => fields::fill(&mut dataset, &mut map, "dataset")?,
                Some(ResultField::Records) => fields::fill(&mut records, &mut map, "records")?,
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(PriceQueryResult {
            total: fields::require::<_, A::Error>(total, "total")?,
            filters: fields::require::<_, A::Error>(filters, "filters")?,
            limit: fields::require::<_, A::Error>(limit, "limit")?,
            dataset: fields::require::<_, A::Error>(dataset, "dataset")?,
            records: fields::require::<_, A::Error>(records, "records")?,
        })
    }
}

impl<'de> Deserialize<'de> for PriceQueryResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ResultVisitor)
    }
}
