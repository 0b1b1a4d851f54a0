//! SSD1322 command set
//!
//! Every controller command is one opcode byte sent with D/C low, followed
//! by zero or more parameter bytes sent with D/C high. [`Command`] gives
//! each one a typed form; the blocking and async drivers both encode through
//! it, so they emit identical byte streams.

use grisaille_core::config::GRAYSCALE_LEVELS;
use grisaille_core::{GrayscaleTable, PanelConfig};
use heapless::Vec;

/// Raw SSD1322 opcodes
pub mod cmd {
    /// Enable the uploaded grayscale table
    pub const ENABLE_GRAYSCALE_TABLE: u8 = 0x00;
    /// Column address window (2 params)
    pub const SET_COLUMN_ADDR: u8 = 0x15;
    /// Start writing pixel data to GDDRAM
    pub const WRITE_RAM: u8 = 0x5C;
    /// Row address window (2 params)
    pub const SET_ROW_ADDR: u8 = 0x75;
    /// Remap and dual COM line mode (2 params)
    pub const SET_REMAP: u8 = 0xA0;
    /// Display start line
    pub const SET_START_LINE: u8 = 0xA1;
    /// Vertical display offset
    pub const SET_DISPLAY_OFFSET: u8 = 0xA2;
    /// All pixels off, GDDRAM ignored
    pub const DISPLAY_ALL_OFF: u8 = 0xA4;
    /// All pixels at full brightness, GDDRAM ignored
    pub const DISPLAY_ALL_ON: u8 = 0xA5;
    /// Show GDDRAM as written
    pub const DISPLAY_NORMAL: u8 = 0xA6;
    /// Show GDDRAM inverted
    pub const DISPLAY_INVERTED: u8 = 0xA7;
    /// Leave partial display mode
    pub const EXIT_PARTIAL_DISPLAY: u8 = 0xA9;
    /// Function selection (VDD regulator)
    pub const FUNCTION_SELECT: u8 = 0xAB;
    /// Sleep mode on (display off)
    pub const SLEEP_ON: u8 = 0xAE;
    /// Sleep mode off (display on)
    pub const SLEEP_OFF: u8 = 0xAF;
    /// Phase 1/2 length
    pub const SET_PHASE_LENGTH: u8 = 0xB1;
    /// Front clock divider / oscillator frequency
    pub const SET_CLOCK_DIVIDER: u8 = 0xB3;
    /// Display enhancement A (2 params)
    pub const DISPLAY_ENHANCEMENT_A: u8 = 0xB4;
    /// GPIO configuration
    pub const SET_GPIO: u8 = 0xB5;
    /// Second pre-charge period
    pub const SET_SECOND_PRECHARGE: u8 = 0xB6;
    /// Custom grayscale table (16 params)
    pub const SET_GRAYSCALE_TABLE: u8 = 0xB8;
    /// Built-in linear grayscale table
    pub const DEFAULT_GRAYSCALE_TABLE: u8 = 0xB9;
    /// Pre-charge voltage
    pub const SET_PRECHARGE_VOLTAGE: u8 = 0xBB;
    /// COM deselect voltage
    pub const SET_VCOMH: u8 = 0xBE;
    /// Segment contrast current
    pub const SET_CONTRAST_CURRENT: u8 = 0xC1;
    /// Master contrast current
    pub const MASTER_CONTRAST_CURRENT: u8 = 0xC7;
    /// Multiplex ratio
    pub const SET_MUX_RATIO: u8 = 0xCA;
    /// Display enhancement B (2 params)
    pub const DISPLAY_ENHANCEMENT_B: u8 = 0xD1;
    /// Command lock
    pub const SET_COMMAND_LOCK: u8 = 0xFD;
}

/// Parameter byte for [`Command::CommandLock`] that unlocks the interface
pub const COMMAND_UNLOCK: u8 = 0x12;

/// Most parameter bytes any command takes
pub const MAX_PARAMS: usize = GRAYSCALE_LEVELS;

/// Encoded parameter bytes of one command
pub type Params = Vec<u8, MAX_PARAMS>;

/// How GDDRAM content reaches the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Pixels as written
    #[default]
    Normal,
    /// Pixels inverted
    Inverted,
    /// Every pixel at full brightness
    ForceOn,
    /// Every pixel off
    ForceOff,
}

impl DisplayMode {
    /// Opcode that selects this mode
    pub const fn opcode(self) -> u8 {
        match self {
            DisplayMode::Normal => cmd::DISPLAY_NORMAL,
            DisplayMode::Inverted => cmd::DISPLAY_INVERTED,
            DisplayMode::ForceOn => cmd::DISPLAY_ALL_ON,
            DisplayMode::ForceOff => cmd::DISPLAY_ALL_OFF,
        }
    }
}

/// One SSD1322 command with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Unlock (0x12) or lock (0x16) the command interface
    CommandLock(u8),
    /// Sleep mode on, panel dark
    SleepOn,
    /// Sleep mode off, panel lit
    SleepOff,
    /// Front clock divider and oscillator frequency
    ClockDivider(u8),
    /// Number of active rows minus one
    MuxRatio(u8),
    /// Vertical scroll of the mapping between GDDRAM and COM lines
    DisplayOffset(u8),
    /// GDDRAM row shown on the first COM line
    StartLine(u8),
    /// Address increment, nibble and COM remapping
    Remap([u8; 2]),
    /// GPIO pin configuration
    Gpio(u8),
    /// VDD regulator selection
    FunctionSelect(u8),
    /// External VSL and enhanced low-gray quality
    DisplayEnhancementA([u8; 2]),
    /// Segment output current
    ContrastCurrent(u8),
    /// Master current attenuation, 0-15
    MasterContrast(u8),
    /// Restore the built-in grayscale table
    DefaultGrayscale,
    /// Custom grayscale table
    GrayscaleTable(GrayscaleTable),
    /// Activate the custom grayscale table
    EnableGrayscale,
    /// Phase 1 and phase 2 lengths
    PhaseLength(u8),
    /// Driving scheme enhancement
    DisplayEnhancementB([u8; 2]),
    /// First pre-charge voltage
    PrechargeVoltage(u8),
    /// Second pre-charge period
    SecondPrecharge(u8),
    /// COM deselect voltage level
    Vcomh(u8),
    /// Display mode
    Mode(DisplayMode),
    /// Leave partial display mode
    ExitPartialDisplay,
    /// Column window, already biased by the column offset
    ColumnAddress { start: u8, end: u8 },
    /// Row window
    RowAddress { start: u8, end: u8 },
    /// Begin GDDRAM write
    WriteRam,
}

impl Command {
    /// Opcode byte
    pub const fn opcode(&self) -> u8 {
        match self {
            Command::CommandLock(_) => cmd::SET_COMMAND_LOCK,
            Command::SleepOn => cmd::SLEEP_ON,
            Command::SleepOff => cmd::SLEEP_OFF,
            Command::ClockDivider(_) => cmd::SET_CLOCK_DIVIDER,
            Command::MuxRatio(_) => cmd::SET_MUX_RATIO,
            Command::DisplayOffset(_) => cmd::SET_DISPLAY_OFFSET,
            Command::StartLine(_) => cmd::SET_START_LINE,
            Command::Remap(_) => cmd::SET_REMAP,
            Command::Gpio(_) => cmd::SET_GPIO,
            Command::FunctionSelect(_) => cmd::FUNCTION_SELECT,
            Command::DisplayEnhancementA(_) => cmd::DISPLAY_ENHANCEMENT_A,
            Command::ContrastCurrent(_) => cmd::SET_CONTRAST_CURRENT,
            Command::MasterContrast(_) => cmd::MASTER_CONTRAST_CURRENT,
            Command::DefaultGrayscale => cmd::DEFAULT_GRAYSCALE_TABLE,
            Command::GrayscaleTable(_) => cmd::SET_GRAYSCALE_TABLE,
            Command::EnableGrayscale => cmd::ENABLE_GRAYSCALE_TABLE,
            Command::PhaseLength(_) => cmd::SET_PHASE_LENGTH,
            Command::DisplayEnhancementB(_) => cmd::DISPLAY_ENHANCEMENT_B,
            Command::PrechargeVoltage(_) => cmd::SET_PRECHARGE_VOLTAGE,
            Command::SecondPrecharge(_) => cmd::SET_SECOND_PRECHARGE,
            Command::Vcomh(_) => cmd::SET_VCOMH,
            Command::Mode(mode) => mode.opcode(),
            Command::ExitPartialDisplay => cmd::EXIT_PARTIAL_DISPLAY,
            Command::ColumnAddress { .. } => cmd::SET_COLUMN_ADDR,
            Command::RowAddress { .. } => cmd::SET_ROW_ADDR,
            Command::WriteRam => cmd::WRITE_RAM,
        }
    }

    /// Parameter bytes, in transmission order
    pub fn params(&self) -> Params {
        let masked: u8;
        let window: [u8; 2];
        let bytes: &[u8] = match self {
            Command::CommandLock(v)
            | Command::ClockDivider(v)
            | Command::MuxRatio(v)
            | Command::DisplayOffset(v)
            | Command::StartLine(v)
            | Command::Gpio(v)
            | Command::FunctionSelect(v)
            | Command::ContrastCurrent(v)
            | Command::PhaseLength(v)
            | Command::PrechargeVoltage(v)
            | Command::SecondPrecharge(v)
            | Command::Vcomh(v) => core::slice::from_ref(v),
            Command::MasterContrast(v) => {
                // Upper nibble is reserved
                masked = v & 0x0F;
                core::slice::from_ref(&masked)
            }
            Command::Remap(pair)
            | Command::DisplayEnhancementA(pair)
            | Command::DisplayEnhancementB(pair) => pair,
            Command::GrayscaleTable(table) => table.levels(),
            Command::ColumnAddress { start, end } | Command::RowAddress { start, end } => {
                window = [*start, *end];
                &window
            }
            Command::SleepOn
            | Command::SleepOff
            | Command::DefaultGrayscale
            | Command::EnableGrayscale
            | Command::Mode(_)
            | Command::ExitPartialDisplay
            | Command::WriteRam => &[],
        };
        Params::from_slice(bytes).unwrap_or_default()
    }
}

/// The power-up command sequence for `config`
///
/// Runs between the hardware reset and the final sleep-off. The driver
/// sends these in order; `SleepOff` follows after a settling delay.
pub fn init_sequence(config: &PanelConfig) -> [Command; 20] {
    [
        Command::CommandLock(COMMAND_UNLOCK),
        Command::SleepOn,
        Command::ClockDivider(config.clock_divider),
        Command::MuxRatio(config.mux_ratio),
        Command::DisplayOffset(config.display_offset),
        Command::StartLine(config.start_line),
        Command::Remap(config.remap),
        Command::Gpio(config.gpio),
        Command::FunctionSelect(config.function_select),
        Command::DisplayEnhancementA(config.display_enhancement_a),
        Command::ContrastCurrent(config.contrast_current),
        Command::MasterContrast(config.master_contrast),
        Command::DefaultGrayscale,
        Command::PhaseLength(config.phase_length),
        Command::DisplayEnhancementB(config.display_enhancement_b),
        Command::PrechargeVoltage(config.precharge_voltage),
        Command::SecondPrecharge(config.second_precharge),
        Command::Vcomh(config.vcomh),
        Command::Mode(DisplayMode::Normal),
        Command::ExitPartialDisplay,
    ]
}
