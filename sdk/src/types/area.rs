//! Price area types for the Energi Data Service SDK.
//!
//! Provides the price area code wrapper and the filter sent with price queries.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SdkError;

/// A price area (bidding zone) code such as `DK1` or `DK2`.
///
/// Validation is syntactic only: any non-blank code is accepted, including
/// codes the API does not know. Unknown codes simply return no records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PriceArea(Cow<'static, str>);

impl PriceArea {
    /// Western Denmark (west of the Great Belt).
    pub const DK1: Self = Self(Cow::Borrowed("DK1"));

    /// Eastern Denmark (east of the Great Belt).
    pub const DK2: Self = Self(Cow::Borrowed("DK2"));

    /// Creates a new price area from a code.
    ///
    /// The code is kept as given; it is only rejected when blank.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::BlankPriceArea` if the code is empty or whitespace.
    pub fn new(code: impl Into<String>) -> Result<Self, SdkError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(SdkError::BlankPriceArea);
        }
        Ok(Self(Cow::Owned(code)))
    }

    /// Returns the area code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PriceArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PriceArea {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for PriceArea {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for PriceArea {
    type Error = SdkError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for PriceArea {
    type Error = SdkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-empty, ordered list of price areas used to filter a price query.
///
/// Serializes as `{"PriceArea":["DK1","DK2"]}`. Order is kept exactly as
/// supplied and duplicates are not removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceAreaFilter {
    #[serde(rename = "PriceArea")]
    areas: Vec<PriceArea>,
}

impl PriceAreaFilter {
    /// Creates a filter from already validated price areas.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::EmptyPriceAreaFilter` if `areas` is empty.
    pub fn new(areas: Vec<PriceArea>) -> Result<Self, SdkError> {
        if areas.is_empty() {
            return Err(SdkError::EmptyPriceAreaFilter);
        }
        Ok(Self { areas })
    }

    /// Creates a filter holding a single area.
    #[must_use]
    pub fn single(area: PriceArea) -> Self {
        Self { areas: vec![area] }
    }

    /// Creates a filter from raw area codes.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::EmptyPriceAreaFilter` if no codes are given, or
    /// `SdkError::BlankPriceAreaAt` for the first blank code.
    pub fn from_codes<I, S>(codes: I) -> Result<Self, SdkError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let areas = codes
            .into_iter()
            .enumerate()
            .map(|(idx, code)| {
                PriceArea::new(code.as_ref()).map_err(|_| SdkError::BlankPriceAreaAt(idx))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(areas)
    }

    /// Returns the areas in filter order.
    #[must_use]
    pub fn areas(&self) -> &[PriceArea] {
        &self.areas
    }

    /// Returns the number of areas in the filter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Always false; a filter holds at least one area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Returns the compact JSON form sent as the `filter` query parameter.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::Serialization` if the filter cannot be encoded.
    pub fn to_json(&self) -> Result<String, SdkError> {
        serde_json::to_string(self).map_err(|e| SdkError::Serialization(e.to_string()))
    }
}

impl From<PriceArea> for PriceAreaFilter {
    fn from(area: PriceArea) -> Self {
        Self::single(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_area_new() {
        let area = PriceArea::new("DK1").expect("valid area");
        assert_eq!(area.as_str(), "DK1");
        assert_eq!(area, PriceArea::DK1);
    }

    #[test]
    fn test_price_area_blank() {
        assert_eq!(PriceArea::new(""), Err(SdkError::BlankPriceArea));
        assert_eq!(PriceArea::new("   "), Err(SdkError::BlankPriceArea));
        assert_eq!(PriceArea::new("\t\n"), Err(SdkError::BlankPriceArea));
    }

    #[test]
    fn test_price_area_unknown_code_accepted() {
        let area: PriceArea = "SE3".parse().expect("syntactically valid");
        assert_eq!(area.to_string(), "SE3");
    }

    #[test]
    fn test_price_area_try_from() {
        assert_eq!(PriceArea::try_from("DK2"), Ok(PriceArea::DK2));
        assert_eq!(PriceArea::try_from(String::from("DK1")), Ok(PriceArea::DK1));
        assert_eq!(PriceArea::try_from(" "), Err(SdkError::BlankPriceArea));
        assert_eq!(
            PriceArea::try_from(String::new()),
            Err(SdkError::BlankPriceArea)
        );
    }

    #[test]
    fn test_filter_from_area() {
        let filter = PriceAreaFilter::from(PriceArea::DK2);
        assert_eq!(filter.areas(), &[PriceArea::DK2]);
        assert_eq!(filter, PriceAreaFilter::single(PriceArea::DK2));
    }

    #[test]
    fn test_filter_single_json() {
        let filter = PriceAreaFilter::single(PriceArea::DK1);
        assert_eq!(filter.to_json().expect("json"), r#"{"PriceArea":["DK1"]}"#);
    }

    #[test]
    fn test_filter_keeps_order_and_duplicates() {
        let filter = PriceAreaFilter::from_codes(["DK2", "DK1", "DK2"]).expect("valid");
        assert_eq!(filter.len(), 3);
        assert_eq!(
            filter.to_json().expect("json"),
            r#"{"PriceArea":["DK2","DK1","DK2"]}"#
        );
    }

    #[test]
    fn test_filter_empty() {
        let codes: [&str; 0] = [];
        assert_eq!(
            PriceAreaFilter::from_codes(codes),
            Err(SdkError::EmptyPriceAreaFilter)
        );
        assert_eq!(
            PriceAreaFilter::new(Vec::new()),
            Err(SdkError::EmptyPriceAreaFilter)
        );
    }

    #[test]
    fn test_filter_blank_entry_position() {
        let result = PriceAreaFilter::from_codes(vec!["DK1".to_string(), " ".to_string()]);
        assert_eq!(result, Err(SdkError::BlankPriceAreaAt(1)));
    }

    #[test]
    fn test_filter_json_escapes_codes() {
        let filter = PriceAreaFilter::from_codes([r#"D"K"#]).expect("valid");
        assert_eq!(filter.to_json().expect("json"), r#"{"PriceArea":["D\"K"]}"#);
    }
}
