//! CNROM (mapper 3).
//!
//! PRG mapping is fixed exactly like NROM (writes to $8000-$FFFF are
//! bus-conflict no-ops). Any write selects the single 8 KiB CHR bank shown
//! through the fixed $0000-$1FFF window; only the low bits needed to
//! address the cartridge's CHR banks matter, the rest are bus noise, so the
//! raw written byte is passed straight to the bank-assignment primitive,
//! which folds it modulo the CHR size.

use crate::mapper::{Mapper, MapperKind};

pub fn new(prg_rom: Vec<u8>, chr: Vec<u8>, chr_is_ram: bool) -> Mapper {
    let mut mapper = Mapper::new(prg_rom, chr, chr_is_ram, Vec::new(), MapperKind::Cnrom);
    init_banks(&mut mapper);
    mapper
}

pub(crate) fn init_banks(mapper: &mut Mapper) {
    mapper.assign_prg_window(0x8000, 32 * 1024, 0);
    mapper.assign_chr_window(0x0000, 8 * 1024, 0);
}

pub(crate) fn write(mapper: &mut Mapper, value: u8) {
    mapper.assign_chr_window(0x0000, 8 * 1024, value as i64);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chr_with_bank_markers(banks: usize) -> Vec<u8> {
        let mut chr = vec![0u8; banks * 8 * 1024];
        for (i, bank) in chr.chunks_mut(8 * 1024).enumerate() {
            bank[0] = i as u8;
        }
        chr
    }

    #[test]
    fn chr_write_selects_bank() {
        let mut m = new(vec![0; 32 * 1024], chr_with_bank_markers(4), false);
        assert_eq!(m.ppu_read(0x0000), 0);
        m.cpu_write(0x8000, 2);
        assert_eq!(m.ppu_read(0x0000), 2);
        m.cpu_write(0xC000, 3);
        assert_eq!(m.ppu_read(0x0000), 3);
    }

    #[test]
    fn prg_writes_still_ignored() {
        let mut m = new(vec![0xAA; 32 * 1024], chr_with_bank_markers(2), false);
        let before = m.cpu_read(0x8000);
        m.cpu_write(0x8000, 1); // selects CHR bank, not a PRG write
        assert_eq!(m.cpu_read(0x8000), before);
    }
}
