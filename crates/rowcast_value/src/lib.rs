//! Typed value domain for the rowcast marshalling engine.
//!
//! Raw input arrives as `serde_json::Value` (database rows, HTTP bodies, RPC
//! arguments all flatten to it); unmarshalling produces the [`Value`] enum
//! defined here. The split mirrors the two sides of the engine's contract:
//! loose on the way in, typed on the way out.
//!
//! # Modules
//!
//! - [`value`]: the canonical [`Value`] enum and the order-preserving
//!   [`Record`] container
//! - [`raw`]: truthiness over the raw input domain
//! - [`render`]: JSON text rendering, including the big-integer-as-string
//!   policy (JSON has no unbounded-integer literal)

pub mod raw;
pub mod render;
pub mod value;

pub use render::{to_json_string, to_json_value};
pub use value::{Record, Value};
