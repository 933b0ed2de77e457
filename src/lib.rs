//! Decodes Aztec Code 2-D barcode symbols from a sampled binary module
//! matrix.
//!
//! The pipeline mirrors the physical read order of an Aztec symbol:
//! locate the bull's-eye ([`detection`]), rotate into canonical orientation
//! ([`orientation`]), read the mode message ([`mode`]), walk the data
//! spiral and Reed-Solomon correct it ([`codewords`], [`reed_solomon`]),
//! strip stuff bits ([`bitstuff`]) and run the shift/latch text state
//! machine ([`text`]) to produce the final string. [`decoder::AztecDecoder`]
//! orchestrates the whole pipeline with each stage memoized.

pub mod bitstuff;
pub mod codewords;
pub mod decoder;
pub mod detection;
pub mod enums;
pub mod error;
pub mod gf;
pub mod matrix;
pub mod mode;
pub mod orientation;
pub mod reed_solomon;
pub mod tables;
pub mod text;
pub mod tracing_init;

pub use decoder::{decode, decode_all, AztecDecoder, DecoderOptions};
pub use error::{AztecDecoderError, Result};
pub use matrix::Matrix;
