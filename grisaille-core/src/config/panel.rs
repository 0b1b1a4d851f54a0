//! Panel geometry and SSD1322 power-up parameters

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::framebuffer::{buffer_size, PANEL_HEIGHT, PANEL_WIDTH};

/// GDDRAM column of the panel's first segment
///
/// 256-pixel modules are wired to the middle of the controller's 480-pixel
/// column range, 28 column addresses (112 pixels) in.
pub const DEFAULT_COLUMN_OFFSET: u8 = 28;

/// Pixels per GDDRAM column address
pub const PIXELS_PER_COLUMN: u16 = 4;

/// Panel geometry and initialization parameters
///
/// `Default` reproduces the power-up sequence for the common 256x64
/// SSD1322 module; most boards only ever touch the contrast fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Visible width in pixels
    pub width: u16,
    /// Visible height in pixels
    pub height: u16,
    /// Bias added to every column address sent to the controller
    pub column_offset: u8,
    /// Front clock divider / oscillator frequency (0xB3)
    pub clock_divider: u8,
    /// Multiplex ratio, rows - 1 (0xCA)
    pub mux_ratio: u8,
    /// Vertical display offset (0xA2)
    pub display_offset: u8,
    /// Display start line (0xA1)
    pub start_line: u8,
    /// Remap and dual COM line mode (0xA0)
    pub remap: [u8; 2],
    /// GPIO configuration (0xB5)
    pub gpio: u8,
    /// Function selection, internal VDD regulator (0xAB)
    pub function_select: u8,
    /// Display enhancement A, external VSL (0xB4)
    pub display_enhancement_a: [u8; 2],
    /// Segment contrast current (0xC1)
    pub contrast_current: u8,
    /// Master contrast current, 0-15 (0xC7)
    pub master_contrast: u8,
    /// Phase 1/2 length (0xB1)
    pub phase_length: u8,
    /// Display enhancement B (0xD1)
    pub display_enhancement_b: [u8; 2],
    /// First pre-charge voltage (0xBB)
    pub precharge_voltage: u8,
    /// Second pre-charge period (0xB6)
    pub second_precharge: u8,
    /// COM deselect voltage level (0xBE)
    pub vcomh: u8,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelConfig {
    /// Parameters for a 256x64 module
    pub const fn new() -> Self {
        Self {
            width: PANEL_WIDTH,
            height: PANEL_HEIGHT,
            column_offset: DEFAULT_COLUMN_OFFSET,
            clock_divider: 0x91,
            mux_ratio: 0x3F,
            display_offset: 0x00,
            start_line: 0x00,
            remap: [0x14, 0x11],
            gpio: 0x00,
            function_select: 0x01,
            display_enhancement_a: [0xA0, 0xFD],
            contrast_current: 0xFF,
            master_contrast: 0x0F,
            phase_length: 0xE2,
            display_enhancement_b: [0x82, 0x20],
            precharge_voltage: 0x1F,
            second_precharge: 0x08,
            vcomh: 0x07,
        }
    }

    /// Bytes in one full frame
    pub const fn frame_size(&self) -> usize {
        buffer_size(self.width, self.height)
    }

    /// Bytes per panel row in a packed buffer
    pub const fn row_stride(&self) -> usize {
        self.width as usize / 2
    }

    /// Last GDDRAM column address covering the panel (before offset)
    pub const fn end_column(&self) -> u8 {
        self.width.div_ceil(PIXELS_PER_COLUMN).saturating_sub(1) as u8
    }

    /// Last row address covering the panel
    pub const fn end_row(&self) -> u8 {
        self.height.saturating_sub(1) as u8
    }
}
