/*!
unofficial.rs - Unofficial/undocumented opcode family handler

Overview
========
Covers the subset of undocumented 6502 opcodes that real cartridge test ROMs
rely on: NOP-equivalents that read (and discard) an operand using an
otherwise-official addressing mode, and the KIL/JAM opcodes that lock the
CPU.

  Implied NOP    0x1A/0x3A/0x5A/0x7A/0xDA/0xFA
  DOP (skip 1)   immediate:    0x80/0x82/0x89/0xC2/0xE2
                 zeropage:     0x04/0x44/0x64
                 zeropage,X:   0x14/0x34/0x54/0x74/0xD4/0xF4
  TOP (skip 2)   absolute:     0x0C
                 absolute,X:   0x1C/0x3C/0x5C/0x7C/0xDC/0xFC
  KIL            0x02/0x12/0x22/0x32/0x42/0x52/0x62/0x72/0x92/0xB2/0xD2/0xF2

Responsibilities
================
- DOP/TOP perform the operand fetch (and, for the indexed forms, the memory
  read) with the correct addressing-mode side effects, then discard the
  value. This matters for test ROMs that check the no-op doesn't crash and
  that page-cross timing still applies to the absolute,X forms.
- KIL halts the CPU (matches the real hardware's JAM behavior of never
  fetching another opcode) and reports zero cycles, consistent with
  `cycles::base_cycles`.

Non-Responsibilities
====================
- Does not compute base cycles (caller already did via `base_cycles`).
- Does not tick the bus (fallback dispatcher finalizes timing).
*/

#![allow(dead_code)]

use crate::bus_impl::Bus;
use crate::cpu::regs::CpuRegs;

use crate::cpu::addressing::{addr_abs_x_pc, addr_zp, addr_zp_x, fetch_byte, fetch_word};

/// Attempt to execute an unofficial no-op or KIL opcode.
///
/// Returns:
///   true  - opcode handled here
///   false - not part of this family; caller should continue dispatch
pub(super) fn handle<C: CpuRegs>(opcode: u8, cpu: &mut C, bus: &mut Bus, cycles: &mut u32) -> bool {
    match opcode {
        // Implied-mode NOPs: no operand, no side effect.
        0x1A | 0x3A | 0x5A | 0x7A | 0xDA | 0xFA => {}

        // DOP immediate: read and discard the next instruction byte.
        0x80 | 0x82 | 0x89 | 0xC2 | 0xE2 => {
            fetch_byte(cpu, bus);
        }

        // DOP zeropage: read and discard.
        0x04 | 0x44 | 0x64 => {
            let addr = addr_zp(cpu, bus);
            bus.read(addr);
        }

        // DOP zeropage,X: read and discard.
        0x14 | 0x34 | 0x54 | 0x74 | 0xD4 | 0xF4 => {
            let addr = addr_zp_x(cpu, bus);
            bus.read(addr);
        }

        // TOP absolute: read and discard.
        0x0C => {
            let addr = fetch_word(cpu, bus);
            bus.read(addr);
        }

        // TOP absolute,X: read and discard; page-cross adds a cycle.
        0x1C | 0x3C | 0x5C | 0x7C | 0xDC | 0xFC => {
            let (addr, crossed) = addr_abs_x_pc(cpu, bus);
            bus.read(addr);
            if crossed {
                *cycles += 1;
            }
        }

        // KIL/JAM: lock the CPU.
        0x02 | 0x12 | 0x22 | 0x32 | 0x42 | 0x52 | 0x62 | 0x72 | 0x92 | 0xB2 | 0xD2 | 0xF2 => {
            cpu.set_halt_reason(crate::cpu::state::HaltReason::Kil { opcode });
        }

        _ => return false,
    }
    true
}
