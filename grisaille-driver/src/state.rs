//! Controller power state

/// Power state of the controller as last commanded
///
/// Display modes (normal, inverted, forced on/off) are tracked separately;
/// they apply in any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// After power-up, after a transport failure, or before `initialize`
    /// has finished
    #[default]
    Reset,
    /// Initialized, panel dark (sleep mode on)
    Asleep,
    /// Initialized, panel driven
    Awake,
}

impl PowerState {
    /// Whether `initialize` has completed since the last failure
    pub fn is_initialized(self) -> bool {
        !matches!(self, PowerState::Reset)
    }
}
