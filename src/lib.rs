#![doc = r#"
Rustendo library crate.

This crate exposes the emulator core modules for use by binaries and tests.

Modules:
- apu: APU register stub and basic frame IRQ behavior
- bus: Bus facade coordinating CPU/PPU/APU/Controllers and timing
- cartridge: iNES v1 loader and cartridge metadata; constructs a Mapper
- controller: NES controller abstraction
- cpu: 6502/2A03 CPU core (registers, addressing, dispatch, cycle accounting)
- mapper: Mapper bank-window primitives shared by all boards
- mappers: per-board mapper implementations (NROM, CNROM, AXROM, MMC1)
- orchestrator: power-up/reset/run lifecycle tying CPU, Bus, and cartridge together
- ppu: PPU register interface, OAM handling, simple timing and NMI latch
- ppu_bus: read-only view of PPU-addressable memory the PPU borrows from Bus

In tests, shared iNES builders are available under `crate::test_utils`.
"#]

// Core emulator modules
pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod mapper;
pub mod mappers;
pub mod orchestrator;
pub mod ppu;
pub mod ppu_bus;

// Re-export commonly used types at the crate root for convenience.
pub use bus::bus_impl;
pub use bus::Bus;
pub use cartridge::Cartridge;
pub use cpu::Cpu;
pub use orchestrator::{Machine, StopReason};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
