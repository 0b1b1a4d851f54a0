//! Frame transfer geometry
//!
//! A frame push always programs the full panel window and streams exactly
//! one panel's worth of bytes. With an oversized framebuffer the bytes can
//! start at an offset, which is how scrolling is done.

use core::ops::Range;

use grisaille_core::PanelConfig;

/// Controller addressing window, in GDDRAM column units (4 pixels each) and
/// rows. Columns are not yet biased by the panel's column offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    pub start_column: u8,
    pub end_column: u8,
    pub start_row: u8,
    pub end_row: u8,
}

impl Window {
    /// The whole visible panel
    pub const fn full(config: &PanelConfig) -> Self {
        Self {
            start_column: 0,
            end_column: config.end_column(),
            start_row: 0,
            end_row: config.end_row(),
        }
    }
}

/// Bytes of the framebuffer streamed by a push from `(origin_x, origin_y)`
///
/// The offset is `origin_y` panel rows plus `origin_x` bytes; `origin_x`
/// counts bytes (two pixels each), not pixels. Returns `None` when the
/// region would end past `buffer_len`.
pub fn frame_region(
    config: &PanelConfig,
    buffer_len: usize,
    origin_x: u16,
    origin_y: u16,
) -> Option<Range<usize>> {
    let start = origin_y as usize * config.row_stride() + origin_x as usize;
    let end = start.checked_add(config.frame_size())?;
    (end <= buffer_len).then_some(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_window_for_default_panel() {
        let window = Window::full(&PanelConfig::default());
        assert_eq!(
            window,
            Window {
                start_column: 0,
                end_column: 63,
                start_row: 0,
                end_row: 63,
            }
        );
    }

    #[test]
    fn test_region_at_origin() {
        let config = PanelConfig::default();
        assert_eq!(frame_region(&config, 8192, 0, 0), Some(0..8192));
    }

    #[test]
    fn test_region_scrolled_down_tall_buffer() {
        // 256x256 buffer, scrolled 10 rows
        let config = PanelConfig::default();
        let region = frame_region(&config, 32768, 0, 10);
        assert_eq!(region, Some(1280..1280 + 8192));
    }

    #[test]
    fn test_region_past_end() {
        let config = PanelConfig::default();
        assert_eq!(frame_region(&config, 8192, 1, 0), None);
        assert_eq!(frame_region(&config, 8192, 0, 1), None);
        assert_eq!(frame_region(&config, 100, 0, 0), None);
    }

    proptest! {
        #[test]
        fn prop_region_always_panel_sized(
            rows in 64usize..512,
            origin_x in 0u16..256,
            origin_y in 0u16..512,
        ) {
            let config = PanelConfig::default();
            let len = rows * 128;
            if let Some(region) = frame_region(&config, len, origin_x, origin_y) {
                prop_assert_eq!(region.len(), 8192);
                prop_assert!(region.end <= len);
                prop_assert_eq!(region.start, origin_y as usize * 128 + origin_x as usize);
            }
        }
    }
}
