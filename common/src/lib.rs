#![deny(unsafe_code)]

pub mod terrain;
pub mod vol;
pub mod volumes;

pub use self::vol::{ReadVol, VolError, WriteVol};
