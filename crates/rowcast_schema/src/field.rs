//! Schema nodes.
//!
//! A schema is a tree of [`Field`]s built once at startup and shared
//! read-only across calls. Each field pairs a kind (which conversion applies)
//! with a default rule (what absence means). Kinds form a closed enum; the
//! engine dispatches on it exhaustively rather than through dynamic dispatch.

use rowcast_value::Value;
use serde_json::Value as Raw;

use crate::defaults::{DefaultRule, Resolved};
use crate::engine;
use crate::error::UnmarshalError;

/// One node in a schema tree.
#[derive(Debug, Clone)]
pub struct Field {
    kind: FieldKind,
    default: DefaultRule,
}

/// The closed set of field kinds.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Integer,
    Float,
    BigInt,
    Text,
    Boolean,
    Timestamp,
    Json,
    Void,
    /// Homogeneous sequence of one element schema.
    Array(Box<Field>),
    /// Named mapping of nested fields, in declaration order.
    Object(Vec<(String, Field)>),
}

impl FieldKind {
    /// Short name, used in conversion diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::BigInt => "big integer",
            FieldKind::Text => "text",
            FieldKind::Boolean => "boolean",
            FieldKind::Timestamp => "timestamp",
            FieldKind::Json => "json",
            FieldKind::Void => "void",
            FieldKind::Array(_) => "array",
            FieldKind::Object(_) => "object",
        }
    }
}

impl Field {
    fn new(kind: FieldKind) -> Self {
        Field {
            kind,
            default: DefaultRule::null(),
        }
    }

    pub fn integer() -> Self {
        Field::new(FieldKind::Integer)
    }

    pub fn float() -> Self {
        Field::new(FieldKind::Float)
    }

    pub fn big_integer() -> Self {
        Field::new(FieldKind::BigInt)
    }

    pub fn text() -> Self {
        Field::new(FieldKind::Text)
    }

    pub fn boolean() -> Self {
        Field::new(FieldKind::Boolean)
    }

    pub fn timestamp() -> Self {
        Field::new(FieldKind::Timestamp)
    }

    /// Structured blob: JSON text is parsed, structured input passes through.
    pub fn json() -> Self {
        Field::new(FieldKind::Json)
    }

    /// Carries no value; converts to [`Value::Unit`].
    pub fn void() -> Self {
        Field::new(FieldKind::Void)
    }

    pub fn array(element: Field) -> Self {
        Field::new(FieldKind::Array(Box::new(element)))
    }

    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Field)>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, field)| (name.into(), field))
            .collect();
        Field::new(FieldKind::Object(fields))
    }

    /// Mark the field mandatory: absent input becomes an error.
    pub fn required(mut self) -> Self {
        self.default = DefaultRule::forbidden();
        self
    }

    /// Fixed replacement for absent input.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultRule::value(value);
        self
    }

    /// Lazily computed default, re-evaluated on every resolution.
    pub fn default_with(
        mut self,
        producer: impl Fn() -> Resolved + Send + Sync + 'static,
    ) -> Self {
        self.default = DefaultRule::with(producer);
        self
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn default_rule(&self) -> &DefaultRule {
        &self.default
    }

    /// Unmarshal a raw value against this field. Equivalent to
    /// [`engine::unmarshal`] with this field as the schema root.
    pub fn unmarshal(&self, raw: &Raw) -> Result<Value, UnmarshalError> {
        engine::unmarshal(self, raw)
    }
}
