use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the spatial cue grid.
pub const GRID_SIZE: u8 = 3;

/// Spoken-letter alphabet, matching the cue set the announcer can speak.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A cell in the 3x3 spatial grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPos {
    pub row: u8,
    pub col: u8,
}

impl GridPos {
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
        Self { row, col }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An auditory cue, stored as an index into [`ALPHABET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol(u8);

impl Symbol {
    pub fn new(idx: u8) -> Self {
        debug_assert!((idx as usize) < ALPHABET.len());
        Self(idx)
    }

    pub fn from_index(idx: u8) -> Option<Self> {
        if (idx as usize) < ALPHABET.len() {
            Some(Self(idx))
        } else {
            None
        }
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn as_char(&self) -> char {
        ALPHABET[self.0 as usize] as char
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One round's pair of cues. Immutable once drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StimulusPair {
    pub position: GridPos,
    pub symbol: Symbol,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_roundtrip() {
        let s = Symbol::from_index(0).unwrap();
        assert_eq!(s.as_char(), 'A');
        let z = Symbol::from_index(25).unwrap();
        assert_eq!(z.as_char(), 'Z');
        assert!(Symbol::from_index(26).is_none());
    }

    #[test]
    fn grid_pos_display() {
        assert_eq!(GridPos::new(1, 2).to_string(), "(1, 2)");
    }
}
