//! Error types for the heap and the Huffman coder.

use std::collections::TryReserveError;

use thiserror::Error;

/// Error variants for queue, tree and compressor operations.
#[derive(Debug, Error)]
pub enum Error {
    /// `pop` or `peek` was called on an empty priority queue.
    #[error("calling to peek with the empty heap")]
    Underflow,

    /// Growing the heap's backing storage failed.
    #[error("heap allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// A character has no code in the current table.
    #[error("key ({0}) is not found")]
    SymbolNotFound(char),

    /// Tree arity outside the representable range of the code alphabet.
    #[error("invalid tree arity: {0} (expected 2..=36)")]
    InvalidArity(usize),
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a code could not be decoded into a record.
///
/// Decoding failures are reported in-band so batch callers can skip a bad
/// record; each class keeps its own textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    /// The code could not be walked through the tree.
    #[error("code does not decode against the current tree")]
    Sentinel,

    /// The decoded text is not of the form `name:(key: value), ...`.
    #[error("decoded text does not parse as a record")]
    GrammarMismatch,
}

impl DecodeFailure {
    /// In-band value: [`DECODE_SENTINEL`](crate::tree::DECODE_SENTINEL) or
    /// the empty string.
    pub fn as_str(self) -> &'static str {
        match self {
            DecodeFailure::Sentinel => crate::tree::DECODE_SENTINEL,
            DecodeFailure::GrammarMismatch => "",
        }
    }
}
