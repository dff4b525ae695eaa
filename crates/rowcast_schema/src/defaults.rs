//! Null-replacement policy for schema fields.
//!
//! Every field carries a [`DefaultRule`]; the engine consults it exactly when
//! the raw input is absent-like. Resolution has three outcomes, modeled as a
//! closed sum rather than a sentinel object: a concrete replacement value,
//! null, or "absence is forbidden here".

use std::fmt;
use std::sync::Arc;

use rowcast_value::Value;

/// Outcome of resolving a field's default.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// Replace the absent input with this value.
    Value(Value),
    /// The field is nullable and stays null.
    Null,
    /// Absence is an error for this field.
    Forbidden,
}

impl Resolved {
    pub fn is_null(&self) -> bool {
        matches!(self, Resolved::Null)
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Resolved::Forbidden)
    }

    // A produced Value::Null means the same thing as Null; collapse the two
    // so the object emission rule sees one spelling of "defaults to null".
    fn normalized(self) -> Resolved {
        match self {
            Resolved::Value(Value::Null) => Resolved::Null,
            other => other,
        }
    }
}

type Producer = Arc<dyn Fn() -> Resolved + Send + Sync>;

/// A field's default policy: a fixed outcome, or a producer invoked on every
/// resolution (lazy defaults such as "current timestamp"). Fixed at schema
/// construction, shared freely across concurrent unmarshal calls.
#[derive(Clone)]
pub enum DefaultRule {
    Constant(Resolved),
    Producer(Producer),
}

impl DefaultRule {
    /// Nullable field: absence resolves to null.
    pub fn null() -> Self {
        DefaultRule::Constant(Resolved::Null)
    }

    /// Mandatory field: absence is an error.
    pub fn forbidden() -> Self {
        DefaultRule::Constant(Resolved::Forbidden)
    }

    /// Fixed replacement value for absent input.
    pub fn value(value: impl Into<Value>) -> Self {
        DefaultRule::Constant(Resolved::Value(value.into()))
    }

    /// Recomputed on every resolution.
    pub fn with(producer: impl Fn() -> Resolved + Send + Sync + 'static) -> Self {
        DefaultRule::Producer(Arc::new(producer))
    }

    pub fn resolve(&self) -> Resolved {
        match self {
            DefaultRule::Constant(resolved) => resolved.clone().normalized(),
            DefaultRule::Producer(producer) => producer().normalized(),
        }
    }
}

impl fmt::Debug for DefaultRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultRule::Constant(resolved) => f.debug_tuple("Constant").field(resolved).finish(),
            DefaultRule::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}
