//! Unmarshalling failures.
//!
//! Two kinds only. A mandatory field resolving to nothing is a
//! [`UnmarshalError::NullNotAllowed`]; everything a converter rejects is a
//! [`UnmarshalError::Conversion`]. There is no partial-success mode: the
//! first failing field aborts the whole call. Callers needing per-subtree
//! failure isolation unmarshal the subtrees independently.

use thiserror::Error;

/// Why an unmarshal call failed.
///
/// `path` is the `::`-delimited breadcrumb to the failing schema node, e.g.
/// `::items::0::unJour`. It exists for diagnostics only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnmarshalError {
    /// A field whose default is forbidden received no value.
    #[error("null value is not allowed for the field {path}")]
    NullNotAllowed { path: String },

    /// A present raw value could not be converted to the field's type.
    #[error("cannot convert value at {path} into {expected}: {raw}")]
    Conversion {
        path: String,
        expected: &'static str,
        raw: String,
    },
}

impl UnmarshalError {
    pub(crate) fn null_not_allowed(path: &str) -> Self {
        UnmarshalError::NullNotAllowed {
            path: path.to_string(),
        }
    }

    pub(crate) fn conversion(path: &str, expected: &'static str, raw: &serde_json::Value) -> Self {
        UnmarshalError::Conversion {
            path: path.to_string(),
            expected,
            raw: render_raw(raw),
        }
    }

    /// Breadcrumb of the failing field.
    pub fn path(&self) -> &str {
        match self {
            UnmarshalError::NullNotAllowed { path } => path,
            UnmarshalError::Conversion { path, .. } => path,
        }
    }
}

// Raw values can be arbitrarily large payloads; keep messages bounded.
const MAX_RAW_PREVIEW: usize = 120;

fn render_raw(raw: &serde_json::Value) -> String {
    let mut text = raw.to_string();
    if text.len() > MAX_RAW_PREVIEW {
        let mut cut = MAX_RAW_PREVIEW;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    text
}
