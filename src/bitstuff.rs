//! Removal of the stuff bits inserted by the encoder to avoid long runs of
//! identical bits inside a code word.

use crate::error::{AztecDecoderError, Result};

/// Strips the stuff bit from every `cw_size`-bit code word in `bits` and
/// trims the result to exactly `data_words * cw_size` bits.
///
/// A code word is "stuffed" when every bit except the last repeats the
/// first bit of the word; in that case the last bit is a padding bit and is
/// dropped. Otherwise the whole word is kept as data.
///
/// # Errors
/// [`AztecDecoderError::BitStuffing`] if the stream runs out before
/// `data_words` code words have been recovered.
pub fn remove_stuff_bits(bits: &[u8], cw_size: usize, data_words: usize) -> Result<Vec<u8>> {
    let mut cleaned = Vec::new();
    let mut i = 0;
    let mut words_seen = 0;

    while words_seen < data_words && i < bits.len() {
        let end = (i + cw_size).min(bits.len());
        let run = &bits[i..end];
        if run.len() == cw_size && run[..cw_size - 1].iter().all(|&b| b == run[0]) {
            cleaned.extend_from_slice(&run[..cw_size - 1]);
        } else {
            cleaned.extend_from_slice(run);
        }
        i += cw_size;
        words_seen += 1;
    }

    if words_seen < data_words {
        return Err(AztecDecoderError::BitStuffing {
            message: format!("stream exhausted after {words_seen} of {data_words} code words"),
        });
    }

    let start_padding = bits.len() % cw_size;
    let end = (data_words * cw_size).min(cleaned.len());
    if start_padding >= end {
        return Ok(Vec::new());
    }
    Ok(cleaned[start_padding..end].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stuffed_word_loses_its_last_bit() {
        // cw_size = 6, word = 000001 (stuffed, last bit differs from the run).
        let bits = vec![0, 0, 0, 0, 0, 1];
        let cleaned = remove_stuff_bits(&bits, 6, 1).unwrap();
        assert_eq!(cleaned, vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn non_stuffed_word_is_kept_whole() {
        let bits = vec![1, 0, 1, 0, 1, 0];
        let cleaned = remove_stuff_bits(&bits, 6, 1).unwrap();
        assert_eq!(cleaned, bits);
    }

    #[test]
    fn trims_to_exact_data_word_span() {
        let bits = vec![1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0];
        let cleaned = remove_stuff_bits(&bits, 6, 2).unwrap();
        assert_eq!(cleaned.len(), 11);
    }

    #[test]
    fn exhausted_stream_is_an_error() {
        let bits = vec![1, 0, 1, 0, 1, 0];
        assert!(remove_stuff_bits(&bits, 6, 5).is_err());
    }
}
