//! Decoding errors.

use thiserror::Error;

/// Failure to decode a log that matched a known event signature.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The log carried a known topic but its body did not match the event ABI.
    #[error("failed to decode {event}: {source}")]
    Event {
        /// The Solidity signature of the event.
        event: &'static str,
        /// The underlying ABI error.
        #[source]
        source: alloy_sol_types::Error,
    },
    /// A decoded integer field does not fit the column it is stored in.
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// The offending field.
        field: &'static str,
        /// The decimal value.
        value: String,
    },
}
