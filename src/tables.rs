//! Aztec Code character table manager.

use crate::enums::AztecTableType;
use crate::error::{AztecDecoderError, Result};

/// Single row of the 5 Aztec character tables (index 0-31).
#[derive(Debug, Clone, Copy)]
pub struct AztecTableEntry {
    /// Character in the UPPER table.
    pub upper: &'static str,
    /// Character in the LOWER table.
    pub lower: &'static str,
    /// Character in the MIXED table.
    pub mixed: &'static str,
    /// Character in the PUNCT table.
    pub punct: &'static str,
    /// Character in the DIGIT table, `None` for indices 16-31 which have no
    /// digit-table meaning.
    pub digit: Option<&'static str>,
}

/// The character mapping for all five tables, index 0-31.
///
/// Verbatim from the Aztec Code character-set tables (ISO/IEC 24778).
const MAPPING: [AztecTableEntry; 32] = [
    AztecTableEntry { upper: "P/S", lower: "P/S", mixed: "P/S", punct: "FLG(n)", digit: Some("P/S") },
    AztecTableEntry { upper: " ", lower: " ", mixed: " ", punct: "\n", digit: Some(" ") },
    AztecTableEntry { upper: "A", lower: "a", mixed: "\u{1}", punct: "\n\r", digit: Some("0") },
    AztecTableEntry { upper: "B", lower: "b", mixed: "\u{2}", punct: ". ", digit: Some("1") },
    AztecTableEntry { upper: "C", lower: "c", mixed: "\u{3}", punct: ", ", digit: Some("2") },
    AztecTableEntry { upper: "D", lower: "d", mixed: "\u{4}", punct: ": ", digit: Some("3") },
    AztecTableEntry { upper: "E", lower: "e", mixed: "\u{5}", punct: "!", digit: Some("4") },
    AztecTableEntry { upper: "F", lower: "f", mixed: "\u{6}", punct: "\"", digit: Some("5") },
    AztecTableEntry { upper: "G", lower: "g", mixed: "\u{7}", punct: "#", digit: Some("6") },
    AztecTableEntry { upper: "H", lower: "h", mixed: "\u{8}", punct: "$", digit: Some("7") },
    AztecTableEntry { upper: "I", lower: "i", mixed: "\u{9}", punct: "%", digit: Some("8") },
    AztecTableEntry { upper: "J", lower: "j", mixed: "\u{a}", punct: "&", digit: Some("9") },
    AztecTableEntry { upper: "K", lower: "k", mixed: "\u{b}", punct: "'", digit: Some(",") },
    AztecTableEntry { upper: "L", lower: "l", mixed: "\u{c}", punct: "(", digit: Some(".") },
    AztecTableEntry { upper: "M", lower: "m", mixed: "\u{d}", punct: ")", digit: Some("U/L") },
    AztecTableEntry { upper: "N", lower: "n", mixed: "\u{1b}", punct: "*", digit: Some("U/S") },
    AztecTableEntry { upper: "O", lower: "o", mixed: "\u{1c}", punct: "+", digit: None },
    AztecTableEntry { upper: "P", lower: "p", mixed: "\u{1d}", punct: ",", digit: None },
    AztecTableEntry { upper: "Q", lower: "q", mixed: "\u{1e}", punct: "-", digit: None },
    AztecTableEntry { upper: "R", lower: "r", mixed: "\u{1f}", punct: ".", digit: None },
    AztecTableEntry { upper: "S", lower: "s", mixed: "@", punct: "/", digit: None },
    AztecTableEntry { upper: "T", lower: "t", mixed: "\\", punct: ":", digit: None },
    AztecTableEntry { upper: "U", lower: "u", mixed: "^", punct: ";", digit: None },
    AztecTableEntry { upper: "V", lower: "v", mixed: "_", punct: "<", digit: None },
    AztecTableEntry { upper: "W", lower: "w", mixed: "`", punct: "=", digit: None },
    AztecTableEntry { upper: "X", lower: "x", mixed: "|", punct: ">", digit: None },
    AztecTableEntry { upper: "Y", lower: "y", mixed: "~", punct: "?", digit: None },
    AztecTableEntry { upper: "Z", lower: "z", mixed: "\u{7f}", punct: "[", digit: None },
    AztecTableEntry { upper: "L/L", lower: "U/S", mixed: "L/L", punct: "]", digit: None },
    AztecTableEntry { upper: "M/L", lower: "M/L", mixed: "U/L", punct: "{", digit: None },
    AztecTableEntry { upper: "D/L", lower: "D/L", mixed: "P/L", punct: "}", digit: None },
    AztecTableEntry { upper: "B/S", lower: "B/S", mixed: "B/S", punct: "U/L", digit: None },
];

/// Lookup helper for the five Aztec shift/latch character tables.
pub struct TableManager;

impl TableManager {
    /// Returns the character for `index` in the selected `mode` table.
    ///
    /// # Errors
    /// [`AztecDecoderError::SymbolDecode`] if `index` is outside 0-31 or
    /// undefined in the chosen table.
    pub fn get_char(index: u32, mode: AztecTableType) -> Result<&'static str> {
        let entry = MAPPING
            .get(index as usize)
            .ok_or_else(|| AztecDecoderError::SymbolDecode {
                message: format!("symbol index {index} outside 0-31 range"),
            })?;
        let char = match mode {
            AztecTableType::Upper => Some(entry.upper),
            AztecTableType::Lower => Some(entry.lower),
            AztecTableType::Mixed => Some(entry.mixed),
            AztecTableType::Punct => Some(entry.punct),
            AztecTableType::Digit => entry.digit,
        };
        char.ok_or_else(|| AztecDecoderError::SymbolDecode {
            message: format!("symbol {index} undefined in {mode:?} table"),
        })
    }

    /// Converts the first letter of a latch/shift token (`'U'`, `'L'`, ...)
    /// into the corresponding table type.
    ///
    /// # Errors
    /// [`AztecDecoderError::InvalidParameter`] if `token` is empty or its
    /// first letter is not one of U/L/M/P/D.
    pub fn letter_to_mode(token: &str) -> Result<AztecTableType> {
        let first = token.chars().next().ok_or_else(|| AztecDecoderError::InvalidParameter {
            message: "empty latch letter".to_string(),
        })?;
        match first.to_ascii_uppercase() {
            'U' => Ok(AztecTableType::Upper),
            'L' => Ok(AztecTableType::Lower),
            'M' => Ok(AztecTableType::Mixed),
            'P' => Ok(AztecTableType::Punct),
            'D' => Ok(AztecTableType::Digit),
            _ => Err(AztecDecoderError::InvalidParameter {
                message: format!("unknown latch letter '{token}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_a_is_index_two() {
        assert_eq!(TableManager::get_char(2, AztecTableType::Upper).unwrap(), "A");
    }

    #[test]
    fn digit_table_undefined_past_fifteen() {
        assert!(TableManager::get_char(16, AztecTableType::Digit).is_err());
    }

    #[test]
    fn letter_to_mode_is_case_insensitive() {
        assert_eq!(TableManager::letter_to_mode("m").unwrap(), AztecTableType::Mixed);
        assert_eq!(TableManager::letter_to_mode("D/L").unwrap(), AztecTableType::Digit);
    }

    #[test]
    fn letter_to_mode_rejects_unknown() {
        assert!(TableManager::letter_to_mode("X").is_err());
        assert!(TableManager::letter_to_mode("").is_err());
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        assert!(TableManager::get_char(32, AztecTableType::Upper).is_err());
    }
}
