//! AxROM (mapper 7).
//!
//! A single write anywhere in $8000-$FFFF carries the format `xxxM xPPP`:
//! `PPP` selects which 32 KiB PRG bank is mapped across the whole CPU
//! window, and `M` selects which VRAM page single-screen mirroring uses.
//! CHR is always 8 KiB of RAM with no further banking.

use crate::mapper::{Mapper, MapperKind};

pub fn new(prg_rom: Vec<u8>) -> Mapper {
    let chr = vec![0u8; 8 * 1024];
    let mut mapper = Mapper::new(
        prg_rom,
        chr,
        true,
        Vec::new(),
        MapperKind::Axrom { mirror_upper: false },
    );
    init_banks(&mut mapper);
    mapper
}

pub(crate) fn init_banks(mapper: &mut Mapper) {
    mapper.assign_prg_window(0x8000, 32 * 1024, 0);
    mapper.assign_chr_window(0x0000, 8 * 1024, 0);
}

pub(crate) fn write(mapper: &mut Mapper, value: u8) {
    let bank = (value & 0x07) as i64;
    mapper.assign_prg_window(0x8000, 32 * 1024, bank);
    if let MapperKind::Axrom { mirror_upper } = &mut mapper.kind {
        *mirror_upper = (value & 0x10) != 0;
    }
}
