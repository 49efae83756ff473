//! MMC1 (mapper 1).
//!
//! A serial shift-register interface: each write to $8000-$FFFF carries one
//! data bit in bit 0. Bit 7 of the written value is a reset flag that clears
//! the shift register and write count and forces control into 16 KiB PRG
//! mode with the low bank fixed (`control |= 0x0C`). After five data writes
//! the accumulated 5-bit value latches into one of four registers selected
//! by the *address* of the fifth write (bits 13-14): control, CHR0, CHR1, or
//! PRG. Every latched write recomputes the PRG and CHR bank-window tables
//! from the current register contents.
//!
//! Deferred / simplified relative to real hardware: PRG-RAM disable (reg3
//! bit 4) is not enforced, and large board variants (SUROM/SOROM) that page
//! CHR0's top bit into PRG-ROM are not modeled.

use crate::mapper::{Mapper, MapperKind, MapperMirroring};

/// The four 5-bit MMC1 registers plus the in-flight shift register.
#[derive(Copy, Clone, Debug, Default)]
pub struct Mmc1Regs {
    shift: u8,
    shift_count: u8,
    control: u8,
    chr0: u8,
    chr1: u8,
    prg: u8,
}

pub fn new(prg_rom: Vec<u8>, prg_ram: Vec<u8>, chr: Vec<u8>, chr_is_ram: bool) -> Mapper {
    let regs = Mmc1Regs {
        control: 0x0C,
        ..Default::default()
    };
    let mut mapper = Mapper::new(prg_rom, chr, chr_is_ram, prg_ram, MapperKind::Mmc1(regs));
    apply_prg(&mut mapper, regs);
    apply_chr(&mut mapper, regs);
    mapper
}

pub(crate) fn reset(mapper: &mut Mapper) {
    let regs = Mmc1Regs {
        control: 0x0C,
        ..Default::default()
    };
    mapper.kind = MapperKind::Mmc1(regs);
    apply_prg(mapper, regs);
    apply_chr(mapper, regs);
}

pub(crate) fn mirroring(regs: Mmc1Regs) -> MapperMirroring {
    match regs.control & 0x03 {
        0 => MapperMirroring::SingleScreenLower,
        1 => MapperMirroring::SingleScreenUpper,
        2 => MapperMirroring::Vertical,
        _ => MapperMirroring::Horizontal,
    }
}

pub(crate) fn write(mapper: &mut Mapper, addr: u16, value: u8) {
    let mut regs = match mapper.kind {
        MapperKind::Mmc1(r) => r,
        _ => return,
    };

    if value & 0x80 != 0 {
        regs.shift = 0;
        regs.shift_count = 0;
        regs.control |= 0x0C;
        mapper.kind = MapperKind::Mmc1(regs);
        apply_prg(mapper, regs);
        return;
    }

    regs.shift |= (value & 1) << regs.shift_count;
    regs.shift_count += 1;

    if regs.shift_count < 5 {
        mapper.kind = MapperKind::Mmc1(regs);
        return;
    }

    let value5 = regs.shift & 0x1F;
    match addr {
        0x8000..=0x9FFF => regs.control = value5,
        0xA000..=0xBFFF => regs.chr0 = value5,
        0xC000..=0xDFFF => regs.chr1 = value5,
        0xE000..=0xFFFF => regs.prg = value5,
        _ => {}
    }
    regs.shift = 0;
    regs.shift_count = 0;
    mapper.kind = MapperKind::Mmc1(regs);
    apply_prg(mapper, regs);
    apply_chr(mapper, regs);
}

fn apply_prg(mapper: &mut Mapper, regs: Mmc1Regs) {
    let prg_size_16k = (regs.control & 0x08) != 0;
    if !prg_size_16k {
        let bank = ((regs.prg & 0x0E) >> 1) as i64;
        mapper.assign_prg_window(0x8000, 32 * 1024, bank);
        return;
    }
    let fix_low = (regs.control & 0x04) == 0;
    let bank = (regs.prg & 0x0F) as i64;
    if fix_low {
        mapper.assign_prg_window(0x8000, 16 * 1024, 0);
        mapper.assign_prg_window(0xC000, 16 * 1024, bank);
    } else {
        mapper.assign_prg_window(0x8000, 16 * 1024, bank);
        mapper.assign_prg_window(0xC000, 16 * 1024, -1);
    }
}

fn apply_chr(mapper: &mut Mapper, regs: Mmc1Regs) {
    let chr_4k_mode = (regs.control & 0x10) != 0;
    if !chr_4k_mode {
        let bank = (regs.chr0 >> 1) as i64;
        mapper.assign_chr_window(0x0000, 8 * 1024, bank);
    } else {
        mapper.assign_chr_window(0x0000, 4 * 1024, regs.chr0 as i64);
        mapper.assign_chr_window(0x1000, 4 * 1024, regs.chr1 as i64);
    }
}
