//! Aztec Code related enumerations.

/// Physical Aztec symbol variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AztecType {
    /// Up to 2 data layers, no reference grid, smaller bull's-eye.
    Compact,
    /// 3-32 data layers, reference grid every 16 cells.
    Full,
}

/// Direction in which the spiral is currently read.
///
/// The spiral starts at the upper-left corner and begins reading in the
/// `Bottom` direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingDirection {
    /// Reading vertically from the top to the bottom.
    Bottom,
    /// Reading a horizontal strip from left to right on the right side.
    Right,
    /// Reading vertically from the bottom to the top.
    Top,
    /// Reading a horizontal strip from right to left on the left side.
    Left,
}

/// Character tables used by the text state machine.
///
/// The decoder switches between these tables using shift/latch instructions
/// embedded in the bit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AztecTableType {
    /// Upper-case letters A-Z plus space.
    Upper,
    /// Lower-case letters a-z plus space.
    Lower,
    /// Control codes and miscellaneous characters.
    Mixed,
    /// Punctuation set.
    Punct,
    /// Numerals 0-9, space, and shift/latch tokens.
    Digit,
}
