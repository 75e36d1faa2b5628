//! IRX CPU test suite

use super::*;
use crate::memory::FlatMemory;

mod instructions;

/// Build a CPU backed by a [`FlatMemory`] image seeded with `rom` at
/// address 0. The image is returned alongside so tests can inspect RAM
/// or seed vectors after construction.
fn cpu_with_rom(rom: &[u8]) -> (Cpu, FlatMemory) {
    let mem = FlatMemory::new();
    mem.load_rom(rom).unwrap();
    let mut cpu = Cpu::new();
    cpu.set_memory_callback(mem.callback());
    (cpu, mem)
}

/// Encode one instruction byte from an opcode and a 0-7 field.
fn inst(opcode: u8, field: u8) -> u8 {
    (opcode & 0x1F) | ((field & 0x07) << 5)
}

/// Step until halted or `max_steps` is exceeded (a safety net against an
/// infinite loop in a broken test program, not a feature under test).
fn run_until_halted(cpu: &mut Cpu, max_steps: usize) {
    for _ in 0..max_steps {
        if !cpu.step() {
            return;
        }
    }
    panic!("program did not halt within {max_steps} steps");
}
