//! Driver errors

use grisaille_core::GrayscaleError;

/// Errors from display operations
///
/// `E` is the transport's error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError<E> {
    /// Pin or bus operation failed; the controller state is unknown
    Transport(E),
    /// A grayscale level exceeds 180; nothing was sent
    GrayscaleOutOfRange {
        /// Position of the first bad level
        index: usize,
        /// Its value
        value: u8,
    },
    /// The requested frame region runs past the end of the framebuffer
    RegionOutOfBounds,
}

impl<E> From<GrayscaleError> for DriverError<E> {
    fn from(e: GrayscaleError) -> Self {
        DriverError::GrayscaleOutOfRange {
            index: e.index,
            value: e.value,
        }
    }
}

impl<E> DriverError<E> {
    /// Whether the failure came from the transport
    pub fn is_transport(&self) -> bool {
        matches!(self, DriverError::Transport(_))
    }
}
