//! Async SSD1322 driver
//!
//! Same operations and byte stream as [`Ssd1322`](crate::Ssd1322), over a
//! transport whose bus writes and delays complete asynchronously (DMA).
//! [`Ssd1322Async::push`] borrows the framebuffer until the transfer has
//! completed, so it cannot be drawn into while bytes are in flight.

use grisaille_core::{Framebuffer, GrayscaleTable, PanelConfig};
use grisaille_hal::{AsyncTransport, DcMode};

use crate::command::{init_sequence, Command, DisplayMode};
use crate::error::DriverError;
use crate::ssd1322::{POWER_ON_SETTLE_MS, RESET_PULSE_MS, RESET_SETTLE_MS, VDD_STABILIZE_MS};
use crate::state::PowerState;
use crate::transfer::{frame_region, Window};

/// SSD1322 over a completion-notified 4-wire transport
pub struct Ssd1322Async<T> {
    transport: T,
    config: PanelConfig,
    power: PowerState,
    mode: DisplayMode,
}

impl<T: AsyncTransport> Ssd1322Async<T> {
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

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn power_state(&self) -> PowerState {
        self.power
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    /// Send one opcode byte in its own chip-select frame
    pub async fn send_command(&mut self, byte: u8) -> Result<(), DriverError<T::Error>> {
        let result = self.framed(DcMode::Command, &[byte]).await;
        self.check(result)
    }

    /// Send one parameter byte in its own chip-select frame
    pub async fn send_data(&mut self, byte: u8) -> Result<(), DriverError<T::Error>> {
        let result = self.framed(DcMode::Data, &[byte]).await;
        self.check(result)
    }

    /// Send a command and its parameters, one frame per byte
    pub async fn send(&mut self, command: Command) -> Result<(), DriverError<T::Error>> {
        self.send_command(command.opcode()).await?;
        for byte in command.params() {
            self.send_data(byte).await?;
        }
        Ok(())
    }

    /// Reset and configure the controller, then switch the panel on
    pub async fn initialize(&mut self) -> Result<(), DriverError<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ssd1322: initializing {=u16}x{=u16} (async)",
            self.config.width,
            self.config.height
        );

        self.power = PowerState::Reset;

        let result = self.transport.reset_low();
        self.check(result)?;
        self.delay(RESET_PULSE_MS).await?;
        let result = self.transport.reset_high();
        self.check(result)?;
        self.delay(RESET_SETTLE_MS).await?;

        for command in init_sequence(&self.config) {
            self.send(command).await?;
        }

        self.delay(VDD_STABILIZE_MS).await?;
        self.send(Command::SleepOff).await?;
        self.delay(POWER_ON_SETTLE_MS).await?;

        self.power = PowerState::Awake;
        self.mode = DisplayMode::Normal;
        Ok(())
    }

    /// Select normal, inverted, forced-on or forced-off display
    pub async fn set_mode(&mut self, mode: DisplayMode) -> Result<(), DriverError<T::Error>> {
        self.send(Command::Mode(mode)).await?;
        self.mode = mode;

        #[cfg(feature = "defmt")]
        defmt::debug!("ssd1322: mode {}", mode);

        Ok(())
    }

    /// Enter sleep mode (panel off)
    pub async fn sleep_on(&mut self) -> Result<(), DriverError<T::Error>> {
        self.send(Command::SleepOn).await?;
        self.power = PowerState::Asleep;

        #[cfg(feature = "defmt")]
        defmt::debug!("ssd1322: asleep");

        Ok(())
    }

    /// Leave sleep mode (panel on)
    pub async fn sleep_off(&mut self) -> Result<(), DriverError<T::Error>> {
        self.send(Command::SleepOff).await?;
        self.power = PowerState::Awake;

        #[cfg(feature = "defmt")]
        defmt::debug!("ssd1322: awake");

        Ok(())
    }

    pub async fn set_contrast(&mut self, level: u8) -> Result<(), DriverError<T::Error>> {
        self.send(Command::ContrastCurrent(level)).await
    }

    /// Master contrast current; only the low 4 bits are used
    pub async fn set_brightness(&mut self, level: u8) -> Result<(), DriverError<T::Error>> {
        self.send(Command::MasterContrast(level & 0x0F)).await
    }

    /// Upload and enable a custom grayscale table, checking it first
    pub async fn upload_grayscale(
        &mut self,
        table: &GrayscaleTable,
    ) -> Result<(), DriverError<T::Error>> {
        if let Err(e) = table.validate() {
            #[cfg(feature = "defmt")]
            defmt::warn!("ssd1322: grayscale level {} is {}, max 180", e.index, e.value);
            return Err(e.into());
        }

        self.send(Command::GrayscaleTable(*table)).await?;
        self.send(Command::EnableGrayscale).await
    }

    pub async fn reset_grayscale_to_default(&mut self) -> Result<(), DriverError<T::Error>> {
        self.send(Command::DefaultGrayscale).await
    }

    /// Program the GDDRAM write window (columns biased by the column offset)
    pub async fn set_window(
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
        })
        .await?;
        self.send(Command::RowAddress {
            start: start_row,
            end: end_row,
        })
        .await
    }

    /// Start a GDDRAM write and stream `bytes` in a single frame
    ///
    /// Resolves once the bus has finished with `bytes`.
    pub async fn transfer(&mut self, bytes: &[u8]) -> Result<(), DriverError<T::Error>> {
        self.send(Command::WriteRam).await?;
        let result = self.framed(DcMode::Data, bytes).await;
        self.check(result)
    }

    /// Show `framebuffer` on the panel, starting `origin_y` rows and
    /// `origin_x` bytes into it
    pub async fn push<B>(
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
        )
        .await?;
        self.transfer(&bytes[region]).await
    }

    async fn framed(&mut self, mode: DcMode, bytes: &[u8]) -> Result<(), T::Error> {
        self.transport.chip_select_low()?;
        let result = self.write(mode, bytes).await;
        let released = self.transport.chip_select_high();
        result.and(released)
    }

    async fn write(&mut self, mode: DcMode, bytes: &[u8]) -> Result<(), T::Error> {
        match mode {
            DcMode::Command => self.transport.mode_command()?,
            DcMode::Data => self.transport.mode_data()?,
        }
        match bytes {
            [byte] => self.transport.transmit_byte(*byte).await,
            _ => self.transport.transmit_array(bytes).await,
        }
    }

    async fn delay(&mut self, ms: u32) -> Result<(), DriverError<T::Error>> {
        let result = self.transport.delay_ms(ms).await;
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
