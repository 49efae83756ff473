/*
Module: mappers

Declares one submodule per supported cartridge board and re-exports their
constructors. Each submodule owns its bank-switch write semantics and, where
relevant, its own register state (carried in `Mapper::kind`); the shared
bank-window plumbing lives in `crate::mapper`.

Implemented:
- NROM (Mapper 0)
- MMC1 (Mapper 1)
- CNROM (Mapper 3)
- AxROM (Mapper 7)
*/

pub mod axrom;
pub mod cnrom;
pub mod mmc1;
pub mod nrom;

pub use axrom::new as new_axrom;
pub use cnrom::new as new_cnrom;
pub use mmc1::new as new_mmc1;
pub use nrom::new as new_nrom;
