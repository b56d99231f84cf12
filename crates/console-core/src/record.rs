// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Record model shared by the list and mapping engines.
//!
//! The engines never assume a schema beyond the record id: fields are read
//! through [`Record::field`], by name, as borrowed [`FieldValue`]s.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable unique identifier of a record.
pub type RecordId = String;

/// Name of a record field (column key, search field).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(Cow<'static, str>);

impl FieldName {
    /// Field name backed by a static string (usable in page descriptors).
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for FieldName {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a host view (list page, mapping page).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(Cow<'static, str>);

impl ViewId {
    /// View id backed by a static string.
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Borrow the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ViewId {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Borrowed value of a primitive record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// String field.
    Text(&'a str),
    /// Boolean field.
    Flag(bool),
    /// Numeric field.
    Number(f64),
}

impl FieldValue<'_> {
    /// Text payload, if this is a string field.
    pub const fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(*s),
            Self::Flag(_) | Self::Number(_) => None,
        }
    }

    const fn kind_rank(&self) -> u8 {
        match self {
            Self::Text(_) => 0,
            Self::Number(_) => 1,
            Self::Flag(_) => 2,
        }
    }

    /// Total order used for column sorting.
    ///
    /// Text is lexicographic, numbers use IEEE total order, `false < true`.
    /// Mixed kinds order Text < Number < Flag.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Flag(a), Self::Flag(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

/// An entity shown by the console.
pub trait Record {
    /// Stable unique identifier.
    fn id(&self) -> &str;
    /// Read a named field. `None` when the record has no such field.
    fn field(&self, name: &FieldName) -> Option<FieldValue<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn field(&self, name: &FieldName) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

/// Audit metadata supplied by the host and displayed as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    /// Who created the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Creation timestamp, host formatted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
    /// Last edit timestamp, host formatted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}
