/// 8x8 two-color mask used by pattern fills

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub const PATTERN_SIZE: usize = 8;

/// Each row is a bitmask; bit `7 - x` set means column `x` takes the primary color.
///
/// Lookups are anchored to absolute buffer coordinates so neighbouring fills
/// tile seamlessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PatternMatrix {
    rows: [u8; PATTERN_SIZE],
}

impl PatternMatrix {
    pub const fn from_bits(rows: [u8; PATTERN_SIZE]) -> Self {
        Self { rows }
    }

    /// Parse eight rows of eight `0`/`1` characters
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        if rows.len() != PATTERN_SIZE {
            return Err(Error::InvalidArgument(format!(
                "pattern needs {} rows, got {}",
                PATTERN_SIZE,
                rows.len()
            )));
        }
        let mut bits = [0u8; PATTERN_SIZE];
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != PATTERN_SIZE {
                return Err(Error::InvalidArgument(format!(
                    "pattern row {} must have {} cells, got '{}'",
                    y, PATTERN_SIZE, row
                )));
            }
            for (x, cell) in row.chars().enumerate() {
                match cell {
                    '1' => bits[y] |= 0x80 >> x,
                    '0' => {}
                    other => {
                        return Err(Error::InvalidArgument(format!(
                            "pattern cell ({}, {}) must be 0 or 1, got '{}'",
                            x, y, other
                        )))
                    }
                }
            }
        }
        Ok(Self { rows: bits })
    }

    /// Alternating single-pixel dither
    pub const fn checkerboard() -> Self {
        Self::from_bits([0xAA, 0x55, 0xAA, 0x55, 0xAA, 0x55, 0xAA, 0x55])
    }

    /// Every cell primary
    pub const fn solid() -> Self {
        Self::from_bits([0xFF; PATTERN_SIZE])
    }

    /// Whether buffer pixel `(x, y)` takes the primary color
    #[inline]
    pub fn is_primary(&self, x: i32, y: i32) -> bool {
        let col = x.rem_euclid(PATTERN_SIZE as i32) as u32;
        let row = y.rem_euclid(PATTERN_SIZE as i32) as usize;
        self.rows[row] & (0x80 >> col) != 0
    }

    pub fn to_rows(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|bits| format!("{:08b}", bits))
            .collect()
    }
}

impl Default for PatternMatrix {
    fn default() -> Self {
        Self::checkerboard()
    }
}

impl TryFrom<Vec<String>> for PatternMatrix {
    type Error = Error;

    fn try_from(rows: Vec<String>) -> Result<Self> {
        Self::from_rows(rows.as_slice())
    }
}

impl From<PatternMatrix> for Vec<String> {
    fn from(p: PatternMatrix) -> Self {
        p.to_rows()
    }
}
