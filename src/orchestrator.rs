/*!
orchestrator - Ties the CPU, Bus (with its PPU/APU/mapper peers), and a
loaded cartridge into a runnable machine.

Overview
========
`Machine` owns the `Cpu` and `Bus` and drives the top-level sequencing a
real NES performs at power-on and during normal operation:

  power_up  - zero internal RAM, stamp it with the documented cold-boot
              pattern, seed CPU flags to the settled post-reset value, then
              run the reset sequence.
  reset     - re-read the reset vector and resume from it (warm reset:
              A/X/Y survive, SP drops by 3, I is set).
  run       - step the CPU until it halts (KIL, an unimplemented opcode) or
              an externally-injected stop request arrives.

Per-cycle PPU/APU sequencing itself is not re-driven here: `Bus::tick`
already steps the PPU three times and the APU once for every CPU cycle the
just-executed instruction consumed, so cycle-level ordering between chips
falls out of `Cpu::step` calling `bus.tick(cycles)` internally. This
orchestrator only owns the coarser instruction-at-a-time loop and the
power-up/reset/halt lifecycle around it.
*/

use crate::bus_impl::Bus;
use crate::cartridge::Cartridge;
use crate::cpu::core::Cpu;
use crate::cpu::state::HaltReason;

/// Why `Machine::run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A KIL/JAM opcode locked the CPU (orderly halt).
    Kil { opcode: u8 },
    /// No dispatcher recognized the opcode.
    Unimplemented { opcode: u8, pc: u16 },
    /// `Machine::request_stop` was called (e.g. a frame budget or UI quit).
    Requested,
}

pub struct Machine {
    pub cpu: Cpu,
    pub bus: Bus,
    active: bool,
}

impl Machine {
    /// Construct a machine with a cartridge already attached to its bus.
    pub fn new(cartridge: Cartridge) -> Self {
        let mut bus = Bus::new();
        bus.attach_cartridge(cartridge);
        Self {
            cpu: Cpu::new(),
            bus,
            active: false,
        }
    }

    /// Power-on sequence (spec 4.4): seed RAM with the cold-boot pattern,
    /// set CPU flags to 0x34 (UNUSED | BREAK | IRQ_DISABLE), then trigger
    /// reset, which loads PC from the reset vector.
    pub fn power_up(&mut self) {
        self.bus.power_up_ram();
        self.cpu.reset(&mut self.bus);
        self.active = true;
    }

    /// Re-read the reset vector on a running machine (warm reset): A/X/Y
    /// survive, SP drops by 3 without a bus write, I is set.
    pub fn reset(&mut self) {
        self.cpu.warm_reset(&mut self.bus);
        self.active = true;
    }

    /// Clear the run flag from outside the loop (e.g. a UI quit request).
    pub fn request_stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active && !self.cpu.is_halted()
    }

    /// Run instructions until the CPU halts or `request_stop` is called.
    /// Returns why the loop stopped.
    pub fn run(&mut self) -> StopReason {
        loop {
            if !self.active {
                return StopReason::Requested;
            }
            self.cpu.step(&mut self.bus);
            if self.cpu.is_halted() {
                self.active = false;
                return match self.cpu.halt_reason() {
                    Some(HaltReason::Kil { opcode }) => StopReason::Kil { opcode },
                    Some(HaltReason::Unimplemented { opcode, pc }) => {
                        StopReason::Unimplemented { opcode, pc }
                    }
                    None => StopReason::Requested,
                };
            }
        }
    }

    /// Run up to `max_instructions` steps, stopping early on halt. Useful
    /// for tests and frame-paced hosts that want to bound a single call.
    pub fn run_for(&mut self, max_instructions: usize) -> StopReason {
        for _ in 0..max_instructions {
            if !self.active {
                return StopReason::Requested;
            }
            self.cpu.step(&mut self.bus);
            if self.cpu.is_halted() {
                self.active = false;
                return match self.cpu.halt_reason() {
                    Some(HaltReason::Kil { opcode }) => StopReason::Kil { opcode },
                    Some(HaltReason::Unimplemented { opcode, pc }) => {
                        StopReason::Unimplemented { opcode, pc }
                    }
                    None => StopReason::Requested,
                };
            }
        }
        StopReason::Requested
    }
}
