//! Custom grayscale tables
//!
//! The SSD1322 maps each 4-bit pixel value to a pulse width through a
//! 16-entry table. Every entry must be at most 180; the controller also
//! expects the entries to increase, but that is advisory and not checked
//! on upload.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Entries in a grayscale table
pub const GRAYSCALE_LEVELS: usize = 16;

/// Largest pulse width the controller accepts for one level
pub const MAX_GRAYSCALE_VALUE: u8 = 180;

/// First out-of-range entry of a rejected table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GrayscaleError {
    /// Position in the table (0-15)
    pub index: usize,
    /// Offending value (> 180)
    pub value: u8,
}

/// 16 pulse widths, one per 4-bit brightness level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GrayscaleTable(pub [u8; GRAYSCALE_LEVELS]);

impl GrayscaleTable {
    /// Wrap raw levels without checking them
    pub const fn new(levels: [u8; GRAYSCALE_LEVELS]) -> Self {
        Self(levels)
    }

    /// Levels spread evenly from 0 to 180
    pub const fn linear() -> Self {
        let mut levels = [0u8; GRAYSCALE_LEVELS];
        let mut i = 0;
        while i < GRAYSCALE_LEVELS {
            levels[i] = (i as u8) * (MAX_GRAYSCALE_VALUE / 15);
            i += 1;
        }
        Self(levels)
    }

    /// The raw levels
    pub const fn levels(&self) -> &[u8; GRAYSCALE_LEVELS] {
        &self.0
    }

    /// Check every entry against the controller limit
    pub fn validate(&self) -> Result<(), GrayscaleError> {
        match self
            .0
            .iter()
            .enumerate()
            .find(|&(_, &value)| value > MAX_GRAYSCALE_VALUE)
        {
            Some((index, &value)) => Err(GrayscaleError { index, value }),
            None => Ok(()),
        }
    }

    /// Whether each level is strictly brighter than the one before
    pub fn is_monotonic(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0] < pair[1])
    }
}

impl From<[u8; GRAYSCALE_LEVELS]> for GrayscaleTable {
    fn from(levels: [u8; GRAYSCALE_LEVELS]) -> Self {
        Self(levels)
    }
}
