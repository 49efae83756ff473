//! CLI driver: load an iNES ROM and run it on the emulator core until the
//! CPU halts.
//!
//! Usage: arness NESROM
//!
//! Exit codes:
//!   0 - clean termination (KIL opcode; orderly halt)
//!   1 - usage error (missing ROM path argument)
//!   2 - ROM load failure (bad magic, truncated file, unsupported mapper)
//!   3 - CPU halted on an unimplemented opcode

use std::fs;
use std::process::ExitCode;

use arness::cartridge::Cartridge;
use arness::orchestrator::{Machine, StopReason};

fn usage() -> ExitCode {
    eprintln!("Usage: arness NESROM");
    ExitCode::from(1)
}

fn main() -> ExitCode {
    let mut args = std::env::args();
    let _argv0 = args.next();
    let path = match args.next() {
        Some(p) => p,
        None => return usage(),
    };

    let bytes = match fs::read(&path) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Failed to read {path}: {e}");
            return ExitCode::from(2);
        }
    };

    let cartridge = match Cartridge::from_ines_bytes(&bytes) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load ROM {path}: {e}");
            return ExitCode::from(2);
        }
    };

    let mut machine = Machine::new(cartridge);
    machine.power_up();
    println!("ROM loaded: {path}");
    println!("Reset vector: PC={:#06x}", machine.cpu.pc());

    match machine.run() {
        StopReason::Kil { opcode } => {
            println!(
                "CPU halted on KIL opcode {opcode:#04x} at PC={:#06x}",
                machine.cpu.pc()
            );
            ExitCode::SUCCESS
        }
        StopReason::Unimplemented { opcode, pc } => {
            eprintln!("CPU halted on unimplemented opcode {opcode:#04x} at PC={pc:#06x}");
            ExitCode::from(3)
        }
        StopReason::Requested => ExitCode::SUCCESS,
    }
}
