//! Recording transport for host-side tests
//!
//! [`MockTransport`] logs every line change, bus write and delay so tests can
//! assert the exact byte stream (and its chip-select framing) a driver
//! operation produces. It implements both [`Transport`] and
//! [`AsyncTransport`].

use std::vec::Vec;

use crate::transport::{AsyncTransport, DcMode, Transport};

/// Failure injected by [`MockTransport::fail_after`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MockError;

/// One recorded transport call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// CS driven (`true` = high / released)
    ChipSelect(bool),
    /// D/C driven
    Mode(DcMode),
    /// RST driven (`true` = high / released)
    Reset(bool),
    /// Single byte transmitted
    Byte(u8),
    /// Block transmitted
    Array(Vec<u8>),
    /// Delay requested
    Delay(u32),
}

/// A byte as seen by the controller: its value and the D/C level it was
/// clocked in with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    /// Opcode byte
    Command(u8),
    /// Parameter or pixel byte
    Data(u8),
}

/// Transport that records instead of driving hardware
#[derive(Debug, Default)]
pub struct MockTransport {
    events: Vec<Event>,
    /// Remaining transmit calls before failures start
    budget: Option<usize>,
}

impl MockTransport {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every transmit call after the first `calls` fail
    pub fn fail_after(&mut self, calls: usize) {
        self.budget = Some(calls);
    }

    /// Stop injecting failures
    pub fn heal(&mut self) {
        self.budget = None;
    }

    /// All recorded events, oldest first
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Bytes that reached the controller, tagged with the D/C level in
    /// effect and only counted while CS was asserted
    pub fn writes(&self) -> Vec<Write> {
        let mut selected = false;
        let mut mode = DcMode::Command;
        let mut out = Vec::new();

        let push = |byte: u8, mode: DcMode, out: &mut Vec<Write>| match mode {
            DcMode::Command => out.push(Write::Command(byte)),
            DcMode::Data => out.push(Write::Data(byte)),
        };

        for event in &self.events {
            match event {
                Event::ChipSelect(high) => selected = !high,
                Event::Mode(m) => mode = *m,
                Event::Byte(b) if selected => push(*b, mode, &mut out),
                Event::Array(bytes) if selected => {
                    for &b in bytes {
                        push(b, mode, &mut out);
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// Opcode bytes only
    pub fn commands(&self) -> Vec<u8> {
        self.writes()
            .into_iter()
            .filter_map(|w| match w {
                Write::Command(b) => Some(b),
                Write::Data(_) => None,
            })
            .collect()
    }

    /// Parameter and pixel bytes only
    pub fn data(&self) -> Vec<u8> {
        self.writes()
            .into_iter()
            .filter_map(|w| match w {
                Write::Data(b) => Some(b),
                Write::Command(_) => None,
            })
            .collect()
    }

    /// Number of chip-select framed transactions
    pub fn transactions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| **e == Event::ChipSelect(false))
            .count()
    }

    /// Delays requested, in order
    pub fn delays(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    fn spend(&mut self) -> Result<(), MockError> {
        match self.budget.as_mut() {
            Some(0) => Err(MockError),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn record_array(&mut self, bytes: &[u8]) -> Result<(), MockError> {
        self.spend()?;
        if bytes.len() == 1 {
            self.events.push(Event::Byte(bytes[0]));
        } else {
            self.events.push(Event::Array(bytes.to_vec()));
        }
        Ok(())
    }

    fn record(&mut self, event: Event) -> Result<(), MockError> {
        self.events.push(event);
        Ok(())
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    fn chip_select_low(&mut self) -> Result<(), MockError> {
        self.record(Event::ChipSelect(false))
    }

    fn chip_select_high(&mut self) -> Result<(), MockError> {
        self.record(Event::ChipSelect(true))
    }

    fn mode_command(&mut self) -> Result<(), MockError> {
        self.record(Event::Mode(DcMode::Command))
    }

    fn mode_data(&mut self) -> Result<(), MockError> {
        self.record(Event::Mode(DcMode::Data))
    }

    fn reset_low(&mut self) -> Result<(), MockError> {
        self.record(Event::Reset(false))
    }

    fn reset_high(&mut self) -> Result<(), MockError> {
        self.record(Event::Reset(true))
    }

    fn transmit_array(&mut self, bytes: &[u8]) -> Result<(), MockError> {
        self.record_array(bytes)
    }

    fn delay_ms(&mut self, ms: u32) -> Result<(), MockError> {
        self.record(Event::Delay(ms))
    }
}

impl AsyncTransport for MockTransport {
    type Error = MockError;

    fn chip_select_low(&mut self) -> Result<(), MockError> {
        self.record(Event::ChipSelect(false))
    }

    fn chip_select_high(&mut self) -> Result<(), MockError> {
        self.record(Event::ChipSelect(true))
    }

    fn mode_command(&mut self) -> Result<(), MockError> {
        self.record(Event::Mode(DcMode::Command))
    }

    fn mode_data(&mut self) -> Result<(), MockError> {
        self.record(Event::Mode(DcMode::Data))
    }

    fn reset_low(&mut self) -> Result<(), MockError> {
        self.record(Event::Reset(false))
    }

    fn reset_high(&mut self) -> Result<(), MockError> {
        self.record(Event::Reset(true))
    }

    async fn transmit_array(&mut self, bytes: &[u8]) -> Result<(), MockError> {
        self.record_array(bytes)
    }

    async fn delay_ms(&mut self, ms: u32) -> Result<(), MockError> {
        self.record(Event::Delay(ms))
    }
}
