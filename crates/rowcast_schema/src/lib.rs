//! Schema-driven marshalling: loose values in, typed records out.
//!
//! # Philosophy: the schema is the contract
//!
//! A schema is a tree of [`Field`]s describing the shape a caller expects
//! from externally-sourced data (database rows, JSON payloads, RPC
//! arguments). Unmarshalling walks the schema, applies each field's
//! null/default policy, and converts what remains. There are no silent
//! fallbacks: a mandatory field with no value fails, a value a converter
//! cannot read fails, and both failures name the exact path.
//!
//! Schemas are built once and shared read-only; unmarshalling is pure
//! computation, safe to run concurrently against the same schema.
//!
//! ```
//! use rowcast_schema::{unmarshal, Field};
//! use serde_json::json;
//!
//! let schema = Field::object([
//!     ("id", Field::integer().required()),
//!     ("name", Field::text()),
//!     ("createdAt", Field::timestamp()),
//! ]);
//!
//! // DB rows usually arrive underscore-cased; the key matcher covers that.
//! let row = json!({"id": "7", "name": "ada", "created_at": "1990-03-11"});
//! let record = unmarshal(&schema, &row)?;
//! assert_eq!(record.as_record().unwrap().get("id").unwrap().as_i64(), Some(7));
//! # Ok::<(), rowcast_schema::UnmarshalError>(())
//! ```
//!
//! # Modules
//!
//! - [`field`]: schema nodes and constructors
//! - [`defaults`]: the three-outcome null-replacement policy
//! - [`engine`]: the recursive unmarshalling algorithm and key matcher
//! - [`convert`]: per-kind scalar conversions
//! - [`interface`]: function fields for describing operation signatures
//! - [`error`]: the failure surface

pub mod convert;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod field;
pub mod interface;

pub use convert::timestamp_expecting_now;
pub use defaults::{DefaultRule, Resolved};
pub use engine::{unmarshal, unmarshal_record};
pub use error::UnmarshalError;
pub use field::{Field, FieldKind};
pub use interface::{FunctionField, Interface};

// The typed output domain lives in its own crate; re-export the common names
// so most callers depend on this crate alone.
pub use rowcast_value::{Record, Value};
