//! SDK error types.
//!
//! Provides error types for validating SDK values.

/// SDK errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// Price area code is empty or only whitespace.
    #[error("price area cannot be blank")]
    BlankPriceArea,

    /// Price area filter has no entries.
    #[error("at least one price area must be specified")]
    EmptyPriceAreaFilter,

    /// Blank entry inside a price area list.
    #[error("price area at position {0} is blank")]
    BlankPriceAreaAt(usize),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
