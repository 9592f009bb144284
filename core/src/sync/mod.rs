//! sync/mod.rs
//! Start/end markers around the data run so a decoder can find it in a
//! longer observation, plus the optional advisory metadata block.

pub mod types;
pub mod wrap;
pub mod unwrap;

pub use types::*;
pub use wrap::*;
pub use unwrap::*;
