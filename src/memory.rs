//! Memory callback contract and a flat-memory convenience implementation
//!
//! The IRX core does not own memory. Every byte of traffic - instruction
//! fetch, loads/stores, stack pushes/pops, vector reads - passes through
//! a callback installed by the host via
//! [`Cpu::set_memory_callback`](crate::cpu::Cpu::set_memory_callback).
//! [`FlatMemory`] is the one concrete implementation this crate ships:
//! a 64 KiB array with no banking, used by both host binaries as their
//! ROM+RAM image.

use std::cell::RefCell;
use std::rc::Rc;

/// Which way a memory or bus transfer is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// A read: the callback's `value` argument is unused.
    Read,
    /// A write: the callback stores `value`; its return is ignored.
    Write,
}

/// `(direction, address, value) -> byte`. The one entry point for all
/// CPU memory traffic. For [`Direction::Read`], `value` is unused and
/// the return is the byte at `address`. For [`Direction::Write`],
/// `value` is stored and the return is ignored.
pub type MemoryCallback = Box<dyn FnMut(Direction, u16, u8) -> u8>;

/// The default callback installed by [`Cpu::new`](crate::cpu::Cpu::new):
/// reads always yield 0, writes are discarded. Guarantees the CPU always
/// makes progress even before a host installs a real handler.
pub fn default_callback() -> MemoryCallback {
    Box::new(|_direction, _address, _value| 0)
}

const MEMORY_SIZE: usize = 0x1_0000;

/// A flat 64 KiB memory image with no address decoding: every address
/// is a direct index. Used by the VM driver and terminal host as their
/// ROM+RAM backing store.
#[derive(Clone)]
pub struct FlatMemory {
    data: Rc<RefCell<[u8; MEMORY_SIZE]>>,
}

impl FlatMemory {
    /// Create a zero-filled 64 KiB image.
    pub fn new() -> Self {
        Self {
            data: Rc::new(RefCell::new([0u8; MEMORY_SIZE])),
        }
    }

    /// Copy `rom` into the image starting at address 0. The remainder of
    /// the image stays whatever it was (zero, for a freshly created
    /// image) and acts as RAM.
    ///
    /// # Errors
    /// Returns [`crate::error::IrxError::RomTooLarge`] if `rom` does not
    /// fit in the 64 KiB address space.
    pub fn load_rom(&self, rom: &[u8]) -> Result<(), crate::error::IrxError> {
        if rom.len() > MEMORY_SIZE {
            return Err(crate::error::IrxError::RomTooLarge {
                size: rom.len(),
                capacity: MEMORY_SIZE,
            });
        }
        self.data.borrow_mut()[..rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Read a single byte without going through the callback contract;
    /// useful for host-side dumps and vector seeding.
    pub fn peek(&self, addr: u16) -> u8 {
        self.data.borrow()[addr as usize]
    }

    /// Build the [`MemoryCallback`] closure over this image. The image
    /// can still be inspected with [`FlatMemory::peek`] afterwards since
    /// the backing storage is shared, not moved.
    pub fn callback(&self) -> MemoryCallback {
        let data = Rc::clone(&self.data);
        Box::new(move |direction, address, value| {
            let mut mem = data.borrow_mut();
            match direction {
                Direction::Read => mem[address as usize],
                Direction::Write => {
                    mem[address as usize] = value;
                    0
                }
            }
        })
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_callback_reads_zero_and_discards_writes() {
        let mut callback = default_callback();
        assert_eq!(callback(Direction::Read, 0x1234, 0), 0);
        assert_eq!(callback(Direction::Write, 0x1234, 0xFF), 0);
    }

    #[test]
    fn flat_memory_round_trips_through_callback() {
        let mem = FlatMemory::new();
        let mut callback = mem.callback();
        callback(Direction::Write, 0x10, 0x42);
        assert_eq!(callback(Direction::Read, 0x10, 0), 0x42);
        assert_eq!(mem.peek(0x10), 0x42);
    }

    #[test]
    fn load_rom_seeds_low_memory_and_leaves_the_rest_zero() {
        let mem = FlatMemory::new();
        mem.load_rom(&[0xAA, 0xBB]).unwrap();
        assert_eq!(mem.peek(0), 0xAA);
        assert_eq!(mem.peek(1), 0xBB);
        assert_eq!(mem.peek(2), 0);
    }

    #[test]
    fn oversized_rom_is_rejected() {
        let mem = FlatMemory::new();
        let huge = vec![0u8; MEMORY_SIZE + 1];
        assert!(mem.load_rom(&huge).is_err());
    }
}
