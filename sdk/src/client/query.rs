//! Day-ahead price query construction.
//!
//! Builds `/dataset/DayAheadPrices?filter=<json>&limit=<n>` against a base URL.

use url::Url;

use super::error::ClientError;
use crate::types::PriceAreaFilter;

/// Default number of records requested.
pub const DEFAULT_LIMIT: u32 = 100;

/// Path segments of the day-ahead price dataset.
const DATASET_SEGMENTS: [&str; 2] = ["dataset", "DayAheadPrices"];

/// A day-ahead price query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAheadQuery {
    filter: PriceAreaFilter,
    limit: u32,
}

impl DayAheadQuery {
    /// Creates a query with the default limit.
    #[must_use]
    pub fn new(filter: PriceAreaFilter) -> Self {
        Self {
            filter,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Sets the record limit.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Returns the area filter.
    #[must_use]
    pub fn filter(&self) -> &PriceAreaFilter {
        &self.filter
    }

    /// Returns the record limit.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Builds the request URL on top of `base`.
    ///
    /// Only the `filter` and `limit` parameters are sent; any query already
    /// present on `base` is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` cannot carry a path or the filter cannot be
    /// encoded.
    pub fn to_url(&self, base: &Url) -> Result<Url, ClientError> {
        let filter = self.filter.to_json()?;

        let mut url = base.clone();
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::InvalidConfig(format!("base url cannot carry a path: {}", base))
            })?
            .pop_if_empty()
            .extend(DATASET_SEGMENTS);

        url.query_pairs_mut()
            .clear()
            .append_pair("filter", &filter)
            .append_pair("limit", &self.limit.to_string());

        Ok(url)
    }
}
