//! Type definitions shared by providers and the dump/restore engines

mod dump_types;
mod value;

pub use dump_types::*;
pub use value::*;
