//! Decode embedded JavaScript runtime values into statically shaped Rust
//! data structures.
//!
//! The crate is a decode-on-demand adapter over a dynamic value graph. A
//! [`ValueAccess`] implementation supplies classification and read
//! primitives over opaque, borrowed value handles; the [`Decoder`] hands a
//! target type exactly the view its shape asks for: a [`KeyedContainer`]
//! for named fields, an [`UnkeyedContainer`] for sequential elements, or a
//! [`SingleValueContainer`] for one scalar. [`Decoder`] also implements
//! [`serde::de::Deserializer`], so `#[derive(Deserialize)]` types decode
//! directly:
//!
//! ```
//! use jsde::memory::MemoryEnv;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Point {
//! 	x: f64,
//! 	y: f64,
//! }
//!
//! let mut env = MemoryEnv::new();
//! let x = env.number(1.0);
//! let y = env.string("2.5");
//! let root = env.object(&[("x", x), ("y", y)]);
//!
//! let point: Point = jsde::decode(&env, root).unwrap();
//! assert_eq!(point.y, 2.5);
//! ```
//!
//! Decoding is fully synchronous and single-threaded; value handles are
//! borrowed and never stored past the decode call that produced them. Any
//! failure aborts the decode of the whole root value and reports the coding
//! path at the failure point.

mod access;
mod coerce;
mod de;
mod decoder;
mod error;
mod keyed;
pub mod memory;
mod path;
mod single;
mod unkeyed;

/// Value access layer contract, classification tags, and host faults.
pub use access::{HostError, ValueAccess, ValueType};
/// Decode entry points, options, and caller-supplied context.
pub use decoder::{DecodeOptions, Decoder, MissingKeyPolicy, UserInfo, decode, decode_with};
/// Error and result aliases.
pub use error::{DecodeError, Result};
/// Named-field container view.
pub use keyed::KeyedContainer;
/// Diagnostic decode location types.
pub use path::{CodingPath, PathSegment};
/// Single-scalar container view.
pub use single::SingleValueContainer;
/// Sequential container view.
pub use unkeyed::UnkeyedContainer;
