//! Recording mocks for host tests
//!
//! Pins, SPI bus and delay all append to one shared event log so tests can
//! check framing (CS/DC levels around each byte) as well as payloads.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use lilguy_hal::{Delay, OutputPin, SpiBus};

/// Control lines the panel uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Cs,
    Dc,
    Rst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Level(Line, bool),
    Byte(u8),
    DelayMs(u32),
}

/// Whether a burst went out with DC low or high
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Command,
    Data,
}

/// Bytes sent during one CS assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Burst {
    pub kind: Kind,
    pub bytes: Vec<u8>,
}

/// A command byte with the data bursts that followed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    pub cmd: u8,
    pub data: Vec<u8>,
    /// Number of separate data bursts the data arrived in
    pub data_bursts: usize,
}

impl Op {
    /// Interpret the data as big-endian 16-bit words
    pub fn words(&self) -> Vec<u16> {
        self.data
            .chunks(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect()
    }
}

#[derive(Clone, Default)]
pub struct Wire {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Wire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, line: Line) -> MockPin {
        MockPin {
            line,
            high: true,
            wire: self.clone(),
        }
    }

    pub fn spi(&self) -> MockSpi {
        MockSpi {
            wire: self.clone(),
            fail_after: None,
        }
    }

    /// SPI bus that errors once `bytes` bytes have been accepted
    pub fn failing_spi(&self, bytes: usize) -> MockSpi {
        MockSpi {
            wire: self.clone(),
            fail_after: Some(bytes),
        }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay { wire: self.clone() }
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Every byte written, in order
    pub fn bytes(&self) -> Vec<u8> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Byte(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    /// Last level driven on a line (lines idle high)
    pub fn level(&self, line: Line) -> bool {
        self.events
            .borrow()
            .iter()
            .rev()
            .find_map(|e| match e {
                Event::Level(l, high) if *l == line => Some(*high),
                _ => None,
            })
            .unwrap_or(true)
    }

    /// Split the capture into CS-delimited bursts
    ///
    /// Panics if a byte is clocked out while CS is deasserted or if DC
    /// changes in the middle of a burst.
    pub fn bursts(&self) -> Vec<Burst> {
        let mut bursts = Vec::new();
        let mut cs_low = false;
        let mut dc_high = true;
        let mut current: Option<Burst> = None;

        for event in self.events.borrow().iter() {
            match *event {
                Event::Level(Line::Cs, high) => {
                    cs_low = !high;
                    if high {
                        if let Some(burst) = current.take() {
                            bursts.push(burst);
                        }
                    }
                }
                Event::Level(Line::Dc, high) => {
                    assert!(
                        current.is_none(),
                        "DC toggled in the middle of a burst"
                    );
                    dc_high = high;
                }
                Event::Level(Line::Rst, _) | Event::DelayMs(_) => {}
                Event::Byte(b) => {
                    assert!(cs_low, "byte 0x{:02X} sent with CS deasserted", b);
                    let kind = if dc_high { Kind::Data } else { Kind::Command };
                    current
                        .get_or_insert_with(|| Burst {
                            kind,
                            bytes: Vec::new(),
                        })
                        .bytes
                        .push(b);
                }
            }
        }
        assert!(current.is_none(), "capture ended with CS still asserted");
        bursts
    }

    /// Group bursts into commands and their data
    pub fn ops(&self) -> Vec<Op> {
        let mut ops: Vec<Op> = Vec::new();
        for burst in self.bursts() {
            match burst.kind {
                Kind::Command => {
                    for &cmd in &burst.bytes {
                        ops.push(Op {
                            cmd,
                            data: Vec::new(),
                            data_bursts: 0,
                        });
                    }
                }
                Kind::Data => {
                    let op = ops.last_mut().expect("data sent before any command");
                    op.data.extend_from_slice(&burst.bytes);
                    op.data_bursts += 1;
                }
            }
        }
        ops
    }

    /// Delays requested, in order
    pub fn delays(&self) -> Vec<u32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }
}

pub struct MockPin {
    line: Line,
    high: bool,
    wire: Wire,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
        self.wire.push(Event::Level(self.line, true));
    }

    fn set_low(&mut self) {
        self.high = false;
        self.wire.push(Event::Level(self.line, false));
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSpiError;

pub struct MockSpi {
    wire: Wire,
    fail_after: Option<usize>,
}

impl SpiBus for MockSpi {
    type Error = MockSpiError;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &b in data {
            if let Some(remaining) = self.fail_after.as_mut() {
                if *remaining == 0 {
                    return Err(MockSpiError);
                }
                *remaining -= 1;
            }
            self.wire.push(Event::Byte(b));
        }
        Ok(())
    }
}

pub struct MockDelay {
    wire: Wire,
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.wire.push(Event::DelayMs(ms));
    }
}

/// Panel-sized mock session: CS, DC and SPI on one wire
pub fn session(wire: &Wire) -> crate::bus::BusSession<MockSpi, MockPin, MockPin> {
    crate::bus::BusSession::new(wire.spi(), wire.pin(Line::Cs), wire.pin(Line::Dc))
}

pub type MockPanel = crate::panel::Panel<MockSpi, MockPin, MockPin, MockPin, MockDelay>;

/// 320x480 panel with every line on one wire
pub fn panel(wire: &Wire) -> MockPanel {
    crate::panel::Panel::new(
        session(wire),
        wire.pin(Line::Rst),
        wire.delay(),
        crate::panel::PanelConfig::default(),
    )
}
