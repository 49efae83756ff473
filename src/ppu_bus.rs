//! Read-only view of PPU-addressable memory (pattern tables, nametables,
//! palette RAM) that `Ppu::tick`/`Ppu::render_frame` need for fetches.
//!
//! `Bus` owns cartridge CHR (via the mapper), nametable RAM, and palette RAM,
//! so the PPU borrows that state through this trait rather than holding its
//! own copy.

pub trait PpuBus {
    fn ppu_read(&self, addr: u16) -> u8;
}
