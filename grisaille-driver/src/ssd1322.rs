//! Blocking SSD1322 driver
//!
//! Every operation decomposes into single-byte command and data writes,
//! each framed by its own chip-select pulse, except pixel data which is
//! streamed as one framed block. Any transport failure leaves the
//! controller in an unknown state, so the driver drops back to
//! [`PowerState::Reset`] and the caller must run [`Ssd1322::initialize`]
//! again. Nothing is retried.

use grisaille_core::{Framebuffer, GrayscaleTable, PanelConfig};
use grisaille_hal::{DcMode, Transport};

use crate::command::{init_sequence, Command, DisplayMode};
use crate::error::DriverError;
use crate::state::PowerState;
use crate::transfer::{frame_region, Window};

/// Reset pulse width
pub const RESET_PULSE_MS: u32 = 1;
/// Wait after releasing reset before the first command
pub const RESET_SETTLE_MS: u32 = 50;
/// Supply stabilization before switching the panel on
pub const VDD_STABILIZE_MS: u32 = 10;
/// Wait after switching the panel on
pub const POWER_ON_SETTLE_MS: u32 = 50;

/// SSD1322 over a blocking 4-wire transport
pub struct Ssd1322<T> {
    transport: T,
    config: PanelConfig,
    power: PowerState,
    mode: DisplayMode,
}

impl<T: Transport> Ssd1322<T> {
    /// Driver for a standard 256x64 module
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, PanelConfig::default())
    }

    /// Driver with custom geometry and power-up parameters
    pub fn with_config(transport: T, config: PanelConfig) -> Self {
        Self {
            transport,
            config,
            power: PowerState::Reset,
            mode: DisplayMode::Normal,
        }
    }

    /// Panel configuration in use
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Last commanded power state
    pub fn power_state(&self) -> PowerState {
        self.power
    }

    /// Last commanded display mode
    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    /// Send one opcode byte in its own chip-select frame
    pub fn send_command(&mut self, byte: u8) -> Result<(), DriverError<T::Error>> {
        let result = self.framed(DcMode::Command, &[byte]);
        self.check(result)
    }

    /// Send one parameter byte in its own chip-select frame
    pub fn send_data(&mut self, byte: u8) -> Result<(), DriverError<T::Error>> {
        let result = self.framed(DcMode::Data, &[byte]);
        self.check(result)
    }

    /// Send a command and its parameters, one frame per byte
    pub fn send(&mut self, command: Command) -> Result<(), DriverError<T::Error>> {
        self.send_command(command.opcode())?;
        for byte in command.params() {
            self.send_data(byte)?;
        }
        Ok(())
    }

    /// Reset and configure the controller, then switch the panel on
    ///
    /// The ordering and delays follow the controller's power sequencing
    /// requirements.
    pub fn initialize(&mut self) -> Result<(), DriverError<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ssd1322: initializing {=u16}x{=u16}",
            self.config.width,
            self.config.height
        );

        self.power = PowerState::Reset;

        let result = self.transport.reset_low();
        self.check(result)?;
        self.delay(RESET_PULSE_MS)?;
        let result = self.transport.reset_high();
        self.check(result)?;
        self.delay(RESET_SETTLE_MS)?;

        for command in init_sequence(&self.config) {
            self.send(command)?;
        }

        self.delay(VDD_STABILIZE_MS)?;
        self.send(Command::SleepOff)?;
        self.delay(POWER_ON_SETTLE_MS)?;

        self.power = PowerState::Awake;
        self.mode = DisplayMode::Normal;

        #[cfg(feature = "defmt")]
        defmt::debug!("ssd1322: panel on");

        Ok(())
    }

    /// Select normal, inverted, forced-on or forced-off display
    ///
    /// Forced modes ignore GDDRAM without discarding it.
    pub fn set_mode(&mut self, mode: DisplayMode) -> Result<(), DriverError<T::Error>> {
        self.send(Command::Mode(mode))?;
        self.mode = mode;

        #[cfg(feature = "defmt")]
        defmt::debug!("ssd1322: mode {}", mode);

        Ok(())
    }

    /// Enter sleep mode (panel off)
    pub fn sleep_on(&mut self) -> Result<(), DriverError<T::Error>> {
        self.send(Command::SleepOn)?;
        self.power = PowerState::Asleep;

        #[cfg(feature = "defmt")]
        defmt::debug!("ssd1322: asleep");

        Ok(())
    }

    /// Leave sleep mode (panel on)
    pub fn sleep_off(&mut self) -> Result<(), DriverError<T::Error>> {
        self.send(Command::SleepOff)?;
        self.power = PowerState::Awake;

        #[cfg(feature = "defmt")]
        defmt::debug!("ssd1322: awake");

        Ok(())
    }

    /// Segment contrast current
    pub fn set_contrast(&mut self, level: u8) -> Result<(), DriverError<T::Error>> {
        self.send(Command::ContrastCurrent(level))
    }

    /// Master contrast current; only the low 4 bits are used
    pub fn set_brightness(&mut self, level: u8) -> Result<(), DriverError<T::Error>> {
        self.send(Command::MasterContrast(level & 0x0F))
    }

    /// Upload and enable a custom grayscale table
    ///
    /// The whole table is checked first; if any level exceeds 180 nothing
    /// is sent.
    pub fn upload_grayscale(
        &mut self,
        table: &GrayscaleTable,
    ) -> Result<(), DriverError<T::Error>> {
        if let Err(e) = table.validate() {
            #[cfg(feature = "defmt")]
            defmt::warn!("ssd1322: grayscale level {} is {}, max 180", e.index, e.value);
            return Err(e.into());
        }

        self.send(Command::GrayscaleTable(*table))?;
        self.send(Command::EnableGrayscale)
    }

    /// Switch back to the built-in linear grayscale table
    pub fn reset_grayscale_to_default(&mut self) -> Result<(), DriverError<T::Error>> {
        self.send(Command::DefaultGrayscale)
    }

    /// Program the GDDRAM write window
    ///
    /// Columns are in 4-pixel units and are biased by the panel's column
    /// offset before sending; rows are sent as given.
    pub fn set_window(
        &mut self,
        start_column: u8,
        end_column: u8,
        start_row: u8,
        end_row: u8,
    ) -> Result<(), DriverError<T::Error>> {
        let offset = self.config.column_offset;
        self.send(Command::ColumnAddress {
            start: start_column.wrapping_add(offset),
            end: end_column.wrapping_add(offset),
        })?;
        self.send(Command::RowAddress {
            start: start_row,
            end: end_row,
        })
    }

    /// Start a GDDRAM write and stream `bytes` in a single frame
    pub fn transfer(&mut self, bytes: &[u8]) -> Result<(), DriverError<T::Error>> {
        self.send(Command::WriteRam)?;
        let result = self.framed(DcMode::Data, bytes);
        self.check(result)
    }

    /// Show `framebuffer` on the panel, starting `origin_y` rows and
    /// `origin_x` bytes into it
    ///
    /// Always programs the full panel window and sends one panel's worth of
    /// bytes. Fails with [`DriverError::RegionOutOfBounds`] before sending
    /// anything if that would read past the framebuffer's storage.
    pub fn push<B>(
        &mut self,
        framebuffer: &Framebuffer<B>,
        origin_x: u16,
        origin_y: u16,
    ) -> Result<(), DriverError<T::Error>>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        let bytes = framebuffer.as_bytes();
        let region = frame_region(&self.config, bytes.len(), origin_x, origin_y)
            .ok_or(DriverError::RegionOutOfBounds)?;

        let window = Window::full(&self.config);
        self.set_window(
            window.start_column,
            window.end_column,
            window.start_row,
            window.end_row,
        )?;
        self.transfer(&bytes[region])
    }

    fn framed(&mut self, mode: DcMode, bytes: &[u8]) -> Result<(), T::Error> {
        self.transport.chip_select_low()?;
        let result = self.write(mode, bytes);
        // Release CS even if the write failed
        let released = self.transport.chip_select_high();
        result.and(released)
    }

    fn write(&mut self, mode: DcMode, bytes: &[u8]) -> Result<(), T::Error> {
        match mode {
            DcMode::Command => self.transport.mode_command()?,
            DcMode::Data => self.transport.mode_data()?,
        }
        match bytes {
            [byte] => self.transport.transmit_byte(*byte),
            _ => self.transport.transmit_array(bytes),
        }
    }

    fn delay(&mut self, ms: u32) -> Result<(), DriverError<T::Error>> {
        let result = self.transport.delay_ms(ms);
        self.check(result)
    }

    fn check<R>(&mut self, result: Result<R, T::Error>) -> Result<R, DriverError<T::Error>> {
        result.map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("ssd1322: transport failure, controller needs initialize");
            self.power = PowerState::Reset;
            DriverError::Transport(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grisaille_core::{Rasterizer, PANEL_BUFFER_SIZE};
    use grisaille_hal::{Event, MockError, MockTransport, Write};
    use std::vec;
    use std::vec::Vec;

    fn awake() -> Ssd1322<MockTransport> {
        let mut display = Ssd1322::new(MockTransport::new());
        display.initialize().unwrap();
        display.transport.clear();
        display
    }

    #[test]
    fn test_command_and_data_framing() {
        let mut display = Ssd1322::new(MockTransport::new());
        display.send_command(0xA6).unwrap();
        display.send_data(0x12).unwrap();

        assert_eq!(
            display.transport.events(),
            [
                Event::ChipSelect(false),
                Event::Mode(DcMode::Command),
                Event::Byte(0xA6),
                Event::ChipSelect(true),
                Event::ChipSelect(false),
                Event::Mode(DcMode::Data),
                Event::Byte(0x12),
                Event::ChipSelect(true),
            ]
        );
    }

    #[test]
    fn test_initialize_sequence() {
        let mut display = Ssd1322::new(MockTransport::new());
        display.initialize().unwrap();

        let t = &display.transport;
        assert_eq!(
            &t.events()[..4],
            [
                Event::Reset(false),
                Event::Delay(1),
                Event::Reset(true),
                Event::Delay(50),
            ]
        );
        assert_eq!(t.delays(), [1, 50, 10, 50]);
        assert_eq!(
            t.commands(),
            [
                0xFD, 0xAE, 0xB3, 0xCA, 0xA2, 0xA1, 0xA0, 0xB5, 0xAB, 0xB4, 0xC1, 0xC7, 0xB9,
                0xB1, 0xD1, 0xBB, 0xB6, 0xBE, 0xA6, 0xA9, 0xAF,
            ]
        );
        assert_eq!(
            t.data(),
            [
                0x12, 0x91, 0x3F, 0x00, 0x00, 0x14, 0x11, 0x00, 0x01, 0xA0, 0xFD, 0xFF, 0x0F,
                0xE2, 0x82, 0x20, 0x1F, 0x08, 0x07,
            ]
        );
        // One frame per byte
        assert_eq!(t.transactions(), 21 + 19);

        // Panel switched on only after the 10 ms stabilization delay
        let events = t.events();
        let n = events.len();
        assert_eq!(events[n - 1], Event::Delay(50));
        assert_eq!(events[n - 3], Event::Byte(0xAF));
        assert_eq!(events[n - 6], Event::Delay(10));

        assert_eq!(display.power_state(), PowerState::Awake);
        assert_eq!(display.display_mode(), DisplayMode::Normal);
    }

    #[test]
    fn test_set_window_biases_columns() {
        let mut display = awake();
        display.set_window(0, 63, 0, 127).unwrap();

        assert_eq!(
            display.transport.writes(),
            [
                Write::Command(0x15),
                Write::Data(28),
                Write::Data(91),
                Write::Command(0x75),
                Write::Data(0),
                Write::Data(127),
            ]
        );
    }

    #[test]
    fn test_custom_column_offset() {
        let config = PanelConfig {
            column_offset: 0,
            ..PanelConfig::default()
        };
        let mut display = Ssd1322::with_config(MockTransport::new(), config);
        display.set_window(4, 10, 2, 3).unwrap();
        assert_eq!(display.transport.data(), [4, 10, 2, 3]);
    }

    #[test]
    fn test_modes_and_sleep() {
        let mut display = awake();
        display.set_mode(DisplayMode::Inverted).unwrap();
        display.set_mode(DisplayMode::ForceOn).unwrap();
        display.set_mode(DisplayMode::ForceOff).unwrap();
        display.sleep_on().unwrap();
        assert_eq!(display.power_state(), PowerState::Asleep);
        display.sleep_off().unwrap();
        display.set_mode(DisplayMode::Normal).unwrap();

        assert_eq!(display.transport.commands(), [0xA7, 0xA5, 0xA4, 0xAE, 0xAF, 0xA6]);
        assert!(display.transport.data().is_empty());
        assert_eq!(display.power_state(), PowerState::Awake);
        assert_eq!(display.display_mode(), DisplayMode::Normal);
    }

    #[test]
    fn test_contrast_and_brightness() {
        let mut display = awake();
        display.set_contrast(0x80).unwrap();
        display.set_brightness(0xFA).unwrap();

        assert_eq!(
            display.transport.writes(),
            [
                Write::Command(0xC1),
                Write::Data(0x80),
                Write::Command(0xC7),
                Write::Data(0x0A),
            ]
        );
    }

    #[test]
    fn test_grayscale_out_of_range_sends_nothing() {
        let mut display = awake();
        let mut levels = GrayscaleTable::linear().0;
        levels[7] = 181;

        let result = display.upload_grayscale(&GrayscaleTable::new(levels));
        assert_eq!(
            result,
            Err(DriverError::GrayscaleOutOfRange {
                index: 7,
                value: 181
            })
        );
        assert!(display.transport.events().is_empty());
        assert_eq!(display.power_state(), PowerState::Awake);
    }

    #[test]
    fn test_grayscale_upload() {
        let mut display = awake();
        let table = GrayscaleTable::linear();
        display.upload_grayscale(&table).unwrap();

        let writes = display.transport.writes();
        assert_eq!(writes.len(), 18);
        assert_eq!(writes[0], Write::Command(0xB8));
        let data: Vec<u8> = display.transport.data();
        assert_eq!(data, table.levels());
        assert_eq!(writes[17], Write::Command(0x00));
    }

    #[test]
    fn test_default_grayscale() {
        let mut display = awake();
        display.reset_grayscale_to_default().unwrap();
        assert_eq!(display.transport.writes(), [Write::Command(0xB9)]);
    }

    #[test]
    fn test_transfer_is_one_frame() {
        let mut display = awake();
        display.transfer(&[1, 2, 3, 4]).unwrap();

        assert_eq!(
            display.transport.events(),
            [
                Event::ChipSelect(false),
                Event::Mode(DcMode::Command),
                Event::Byte(0x5C),
                Event::ChipSelect(true),
                Event::ChipSelect(false),
                Event::Mode(DcMode::Data),
                Event::Array(vec![1, 2, 3, 4]),
                Event::ChipSelect(true),
            ]
        );
    }

    #[test]
    fn test_push_full_panel() {
        let mut display = awake();
        let mut fb = Framebuffer::panel([0u8; PANEL_BUFFER_SIZE]);
        fb.clear(0);
        fb.draw_rect_filled(10, 10, 20, 20, 15);
        display.push(&fb, 0, 0).unwrap();

        let t = &display.transport;
        assert_eq!(t.commands(), [0x15, 0x75, 0x5C]);
        assert_eq!(&t.data()[..4], [28, 91, 0, 63]);
        assert_eq!(t.data().len(), 4 + PANEL_BUFFER_SIZE);
        assert_eq!(&t.data()[4..], fb.as_bytes());
    }

    #[test]
    fn test_push_scrolled_tall_buffer() {
        let mut display = awake();
        let mut fb = Framebuffer::new(vec![0u8; 256 * 256 / 2], 256, 256);
        fb.set_pixel(0, 70, 0xF);
        display.push(&fb, 0, 70).unwrap();

        let data = display.transport.data();
        let frame = &data[4..];
        assert_eq!(frame.len(), 8192);
        // Row 70 of the buffer is the first row on the panel
        assert_eq!(frame[0], 0x0F);
        assert_eq!(frame, &fb.as_bytes()[70 * 128..70 * 128 + 8192]);
    }

    #[test]
    fn test_push_past_end_sends_nothing() {
        let mut display = awake();
        let fb = Framebuffer::panel([0u8; PANEL_BUFFER_SIZE]);

        assert_eq!(display.push(&fb, 0, 1), Err(DriverError::RegionOutOfBounds));
        assert!(display.transport.events().is_empty());
    }

    #[test]
    fn test_transport_failure_drops_to_reset() {
        let mut display = awake();
        display.transport.fail_after(1);

        assert_eq!(
            display.set_contrast(0x40),
            Err(DriverError::Transport(MockError))
        );
        assert_eq!(display.power_state(), PowerState::Reset);
        // Chip select was still released
        assert_eq!(
            display.transport.events().last(),
            Some(&Event::ChipSelect(true))
        );

        display.transport.heal();
        display.initialize().unwrap();
        assert_eq!(display.power_state(), PowerState::Awake);
    }

    #[test]
    fn test_failed_initialize_stays_in_reset() {
        let mut transport = MockTransport::new();
        transport.fail_after(5);
        let mut display = Ssd1322::new(transport);

        assert!(display.initialize().unwrap_err().is_transport());
        assert_eq!(display.power_state(), PowerState::Reset);
    }
}
