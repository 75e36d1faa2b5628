//! Host-facing error type
//!
//! The CPU core itself is exception-free: decode faults, division by
//! zero, and stack wraparound are all resolved internally and never
//! surface as a `Result`. This type exists for
//! the boundary operations a *host* can get wrong - an oversized ROM, a
//! terminal that refuses to go into raw mode - which the `irx-vm` and
//! `irx-term` binaries propagate with `?` and report before exiting.

use thiserror::Error;

/// Errors a host embedding the IRX core can encounter.
#[derive(Debug, Error)]
pub enum IrxError {
    /// A ROM image did not fit in the flat 64 KiB memory image.
    #[error("ROM is {size} bytes, which exceeds the {capacity}-byte address space")]
    RomTooLarge {
        /// Size of the ROM that was rejected.
        size: usize,
        /// Capacity of the memory image.
        capacity: usize,
    },

    /// Reading the ROM file from disk failed.
    #[error("failed to read ROM file {path}: {source}")]
    RomRead {
        /// Path that could not be read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The terminal host could not configure the controlling TTY.
    #[error("failed to configure terminal: {0}")]
    Terminal(#[source] std::io::Error),
}
