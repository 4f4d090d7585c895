use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Stored identifiers are always written from Discord snowflakes, so this means the
    /// store document was edited by hand or corrupted.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Slot machine weights could not build a distribution
    #[error("Invalid slot machine weight table: {0}")]
    SlotWeights(#[from] rand::distr::weighted::Error),
}
