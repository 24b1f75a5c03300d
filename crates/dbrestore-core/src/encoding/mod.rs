//! Value codec: lossless JSON representation of column values
//!
//! JSON has no native way to carry binary data, instants, integers wider than
//! 64 bits, exact decimals, or structured values that must stay distinct from
//! plain objects. Those values are written as a tagged wrapper:
//!
//! ```json
//! { "__type": "bytes", "value": "3q2+7w==" }
//! ```
//!
//! Everything else (numbers, strings, booleans, arrays, null) is written as-is.
//! Decoding inverts the mapping by tag; unknown tags degrade to their payload
//! so dumps produced by newer versions still restore.

mod decode;
mod encode;
mod wrapper;

pub use decode::{decode_row, decode_value};
pub use encode::{encode_row, encode_value};
pub use wrapper::{EncodedValue, TYPE_TAG, VALUE_KEY};
