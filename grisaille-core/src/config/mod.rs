//! Configuration types
//!
//! Panel geometry, controller power-up parameters and grayscale tables.
//! With the `serde` feature these load from host-side config files.

pub mod grayscale;
pub mod panel;

pub use grayscale::{GrayscaleError, GrayscaleTable, GRAYSCALE_LEVELS, MAX_GRAYSCALE_VALUE};
pub use panel::PanelConfig;
