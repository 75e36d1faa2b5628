//! Interactive serial terminal host
//!
//! Embeds the core as a tiny serial console: stdin feeds an interrupt
//! per byte, a demo ROM echoes each byte back out through bus slot 0,
//! and Ctrl+Q requests shutdown. This is the one binary in the
//! repository that touches OS-level terminal and thread APIs - the
//! core library itself never does.

use std::collections::VecDeque;
use std::io::Write;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use irx::cpu::RESET_VECTOR;
use irx::{Cpu, Direction, FlatMemory, IrxError};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const CTRL_Q: u8 = 0x11;

/// Matches `term.c`: reset vector -> interrupt vector -> a main loop that
/// sets the interrupt-enable flag and spins in place, plus an interrupt
/// routine that clears `IPend`, reads the incoming byte, stashes a copy
/// in B, and writes it back out.
const DEMO_ROM: [u8; 15] = [
    0x04, 0x00, // reset vector -> 0x0004
    0x0A, 0x00, // interrupt vector -> 0x000A
    0x5E, // SEF 2            (enable interrupts)
    0xF0, 0x00, // SET SP, 0
    0x19, 0x07, 0x00, // JMP 0x0007       (spin on this instruction)
    0xA1, // SYS 5            (clear IPend)
    0x61, // SYS 3            (DATA_IN -> A)
    0x37, // COPY_OUT 1       (B <- A, a side copy)
    0x81, // SYS 4            (DATA_OUT <- A)
    0x3B, // RET 1            (interrupt return)
];

/// State shared between the main thread (which owns the `Cpu`) and the
/// background stdin reader.
struct Shared {
    inbox: Mutex<VecDeque<u8>>,
    pending_interrupts: AtomicU8,
    running: AtomicBool,
}

/// Restores the terminal's prior mode when dropped, including on panic.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, IrxError> {
        enable_raw_mode().map_err(IrxError::Terminal)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Translate a crossterm key event into the raw byte the guest would have
/// seen from a plain serial line, if there is one.
fn key_to_byte(code: KeyCode, modifiers: KeyModifiers) -> Option<u8> {
    match code {
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::CONTROL) => {
            Some((c.to_ascii_uppercase() as u8) & 0x1f)
        }
        KeyCode::Char(c) => Some(c as u8),
        KeyCode::Enter => Some(b'\r'),
        KeyCode::Tab => Some(b'\t'),
        KeyCode::Backspace => Some(0x08),
        KeyCode::Esc => Some(0x1b),
        _ => None,
    }
}

fn spawn_stdin_reader(shared: Arc<Shared>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while shared.running.load(Ordering::Relaxed) {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(_) => break,
            }
            let Ok(Event::Key(key)) = event::read() else {
                continue;
            };
            let Some(byte) = key_to_byte(key.code, key.modifiers) else {
                continue;
            };
            if byte == CTRL_Q {
                shared.running.store(false, Ordering::Relaxed);
                break;
            }
            shared.inbox.lock().unwrap().push_back(byte);
            shared.pending_interrupts.fetch_add(1, Ordering::Relaxed);
        }
    })
}

fn bind_serial(cpu: &mut Cpu, shared: Arc<Shared>) {
    cpu.bus_mut().bind(
        0,
        Box::new(move |direction, value| match direction {
            Direction::Read => shared.inbox.lock().unwrap().pop_front().unwrap_or(0),
            Direction::Write => {
                let mut stdout = std::io::stdout();
                let _ = stdout.write_all(&[value]);
                let _ = stdout.flush();
                0
            }
        }),
    );
}

fn run() -> Result<(), IrxError> {
    let _raw_mode = RawModeGuard::enter()?;

    let shared = Arc::new(Shared {
        inbox: Mutex::new(VecDeque::new()),
        pending_interrupts: AtomicU8::new(0),
        running: AtomicBool::new(true),
    });

    let reader = spawn_stdin_reader(Arc::clone(&shared));

    let mem = FlatMemory::new();
    mem.load_rom(&DEMO_ROM)?;
    let mut cpu = Cpu::new();
    cpu.set_memory_callback(mem.callback());
    bind_serial(&mut cpu, Arc::clone(&shared));

    let reset_lo = mem.peek(RESET_VECTOR) as u16;
    let reset_hi = mem.peek(RESET_VECTOR + 1) as u16;
    cpu.ip = reset_lo | (reset_hi << 8);
    log::info!("terminal host ready, Ctrl+Q to quit");

    while shared.running.load(Ordering::Relaxed) {
        let pending = shared.pending_interrupts.swap(0, Ordering::Relaxed);
        for _ in 0..pending {
            cpu.raise_interrupt();
        }
        if !cpu.step() {
            break;
        }
    }

    shared.running.store(false, Ordering::Relaxed);
    let _ = reader.join();
    log::info!(
        "halted: ip={:#06x} f={:#04x} registers={:02x?}",
        cpu.ip,
        cpu.f,
        cpu.registers
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
