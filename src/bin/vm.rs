//! Flat-image VM driver
//!
//! Loads a ROM into a 64 KiB flat memory image, seeds IP from the reset
//! vector, and steps the core until it halts. No bus device handlers are
//! bound - DATA_IN/DATA_OUT are no-ops for this binary.

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use irx::cpu::RESET_VECTOR;
use irx::{Cpu, FlatMemory, IrxError};

/// Run an IRX ROM image to completion.
#[derive(Parser, Debug)]
#[command(name = "irx-vm", version, about)]
struct Args {
    /// Path to the ROM image to load at address 0.
    rom: String,
}

fn run(args: Args) -> Result<(), IrxError> {
    let bytes = fs::read(&args.rom).map_err(|source| IrxError::RomRead {
        path: args.rom.clone(),
        source,
    })?;

    let mem = FlatMemory::new();
    mem.load_rom(&bytes)?;

    let mut cpu = Cpu::new();
    cpu.set_memory_callback(mem.callback());

    let reset_lo = mem.peek(RESET_VECTOR) as u16;
    let reset_hi = mem.peek(RESET_VECTOR + 1) as u16;
    cpu.ip = reset_lo | (reset_hi << 8);
    log::info!("seeded IP from reset vector: {:#06x}", cpu.ip);

    let mut steps = 0u64;
    while cpu.step() {
        steps += 1;
    }

    log::info!(
        "halted after {} steps: ip={:#06x} f={:#04x} ipend={} registers={:02x?}",
        steps,
        cpu.ip,
        cpu.f,
        cpu.ipend,
        cpu.registers,
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
