#![doc = r#"
Bus: the shared address space CPU, PPU, APU, controllers, and the cartridge
mapper all read and write through.
"#]

pub mod bus_impl {
    include!("bus_impl.rs");
}
pub use bus_impl::Bus;
