//! # Memory Write Listeners
//!
//! Memory-mapped devices are modelled as observers of store instructions. A
//! listener watches an inclusive address range; when `CPU::write` stores into
//! that range the listener is told the address (the value is already in
//! memory, the listener reads it back if it cares).
//!
//! Regions are scanned in registration order and the first match wins, so
//! overlapping registrations are allowed but only the earliest one fires.
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use em6502::{CPU, MemoryRegion};
//!
//! let mut cpu = CPU::default();
//! let hits = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&hits);
//!
//! cpu.register_write_listener(MemoryRegion::new(0x0200, 0x05FF), move |addr: u16| {
//!     sink.borrow_mut().push(addr);
//! })
//! .unwrap();
//!
//! cpu.write(0x0210, 0x01);
//! cpu.write(0x0600, 0x01); // outside the region
//! assert_eq!(*hits.borrow(), vec![0x0210]);
//! ```

use std::fmt;

/// Maximum number of listeners a CPU accepts.
pub const MAX_WRITE_LISTENERS: usize = 5;

/// Inclusive address range watched by a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRegion {
    /// First watched address
    pub low: u16,
    /// Last watched address (inclusive)
    pub high: u16,
}

impl MemoryRegion {
    pub fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }

    /// Returns true if `addr` lies within `[low, high]`.
    pub fn contains(&self, addr: u16) -> bool {
        addr >= self.low && addr <= self.high
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:04X}-0x{:04X}", self.low, self.high)
    }
}

/// Receives notifications for stores into a watched region.
///
/// Observers run synchronously inside the store. They get no access to the
/// CPU, so they cannot re-enter the interpreter.
///
/// Any `FnMut(u16)` closure is an observer.
pub trait WriteObserver {
    /// Called after `addr` has been written.
    fn on_write(&mut self, addr: u16);
}

impl<F: FnMut(u16)> WriteObserver for F {
    fn on_write(&mut self, addr: u16) {
        self(addr)
    }
}

/// Error returned when listener registration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// All `MAX_WRITE_LISTENERS` slots are taken.
    RegistryFull {
        /// Region that could not be registered
        region: MemoryRegion,
    },
    /// `low` is greater than `high`.
    InvalidRange {
        /// The rejected region
        region: MemoryRegion,
    },
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ListenerError::RegistryFull { region } => write!(
                f,
                "Cannot watch {}: all {} write listener slots are in use",
                region, MAX_WRITE_LISTENERS
            ),
            ListenerError::InvalidRange { region } => write!(
                f,
                "Invalid listener region {}: low address is above high address",
                region
            ),
        }
    }
}

impl std::error::Error for ListenerError {}

struct Registration {
    region: MemoryRegion,
    observer: Box<dyn WriteObserver>,
}

/// Bounded, ordered registry of write listeners.
#[derive(Default)]
pub struct WriteListeners {
    entries: Vec<Registration>,
}

impl WriteListeners {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_WRITE_LISTENERS),
        }
    }

    /// Adds an observer for `region`.
    ///
    /// # Errors
    ///
    /// - `ListenerError::InvalidRange` if `region.low > region.high`
    /// - `ListenerError::RegistryFull` if `MAX_WRITE_LISTENERS` are already registered
    pub fn register(
        &mut self,
        region: MemoryRegion,
        observer: Box<dyn WriteObserver>,
    ) -> Result<(), ListenerError> {
        if region.low > region.high {
            return Err(ListenerError::InvalidRange { region });
        }
        if self.entries.len() >= MAX_WRITE_LISTENERS {
            return Err(ListenerError::RegistryFull { region });
        }

        self.entries.push(Registration { region, observer });
        Ok(())
    }

    /// Notifies the first observer whose region contains `addr`.
    ///
    /// Returns true if an observer was called.
    pub fn notify(&mut self, addr: u16) -> bool {
        match self.entries.iter_mut().find(|r| r.region.contains(addr)) {
            Some(registration) => {
                registration.observer.on_write(addr);
                true
            }
            None => false,
        }
    }

    /// Removes every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
