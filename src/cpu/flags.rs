//! IRX CPU flag bit definitions
//!
//! Flag bit positions in the `F` (flags) register. Bits not listed here
//! (U2, U) are reserved/unused and are never written by an instruction.

/// Carry / borrow flag (bit 0)
pub const C: u8 = 0b0000_0001;
/// Zero flag (bit 1) - last result is zero
pub const Z: u8 = 0b0000_0010;
/// Interrupt-enable flag (bit 2)
pub const I: u8 = 0b0000_0100;
/// Reserved (bit 3)
pub const U2: u8 = 0b0000_1000;
/// Software break flag (bit 4)
pub const BRK: u8 = 0b0001_0000;
/// Unused (bit 5)
pub const U: u8 = 0b0010_0000;
/// Negative flag (bit 6) - bit 7 of the last result
pub const N: u8 = 0b0100_0000;
/// Signed overflow flag (bit 7)
pub const O: u8 = 0b1000_0000;
