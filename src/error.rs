//! Error types for the Aztec Code decoder.
//!
//! One enum covers every failure mode named in the decoder design: each
//! pipeline stage fails the whole decode, nothing is retried internally.

use snafu::Snafu;

/// Everything that can go wrong while decoding an Aztec symbol.
#[derive(Debug, Snafu, PartialEq, Eq, Clone)]
#[snafu(visibility(pub(crate)))]
pub enum AztecDecoderError {
    /// Matrix shape/parity wrong, bounds inconsistent with matrix, empty shift letter, etc.
    #[snafu(display("invalid parameter: {message}"))]
    InvalidParameter { message: String },

    /// No valid alternating ring could be found around the matrix center.
    #[snafu(display("failed to locate a valid bull's-eye"))]
    BullseyeDetection,

    /// The canonical corner-mark tuple was never achieved after rotation.
    #[snafu(display("could not orient matrix to the canonical configuration"))]
    Orientation,

    /// The mode-message ring could not be read or its fields are out of range.
    #[snafu(display("mode field error: {message}"))]
    ModeField { message: String },

    /// Reed-Solomon correction failed (mode message or data codewords).
    #[snafu(display("reed-solomon correction failed: {message}"))]
    ReedSolomon { message: String },

    /// Data-spiral traversal computed an out-of-matrix index.
    #[snafu(display("bit read error: {message}"))]
    BitRead { message: String },

    /// Fewer than `data_words` codewords were recovered before the stream ran dry.
    #[snafu(display("bit stuffing error: {message}"))]
    BitStuffing { message: String },

    /// A table entry was undefined for the given symbol index (e.g. DIGIT index > 15).
    #[snafu(display("symbol decode error: {message}"))]
    SymbolDecode { message: String },

    /// The matrix size/layer count falls outside the supported range.
    #[snafu(display("unsupported symbol: {message}"))]
    UnsupportedSymbol { message: String },

    /// FLG(7) or a byte-shift ran past the end of the bit stream.
    #[snafu(display("stream termination error: {message}"))]
    StreamTermination { message: String },
}

pub type Result<T> = std::result::Result<T, AztecDecoderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_not_empty() {
        let err = AztecDecoderError::BullseyeDetection;
        assert!(!err.to_string().is_empty());
    }
}
