use std::{borrow::Cow, collections::BTreeMap};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Build a singleton [`HeaderSet`] usable in `static` and `const` items.
#[macro_export]
macro_rules! header {
    ($key:expr, $value:expr $(,)?) => {{
        const ENTRIES: &[$crate::model::HeaderEntry] =
            &[$crate::model::HeaderEntry::from_static($key, $value)];
        $crate::model::HeaderSet::from_static(ENTRIES)
    }};
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HeaderEntry {
    key: Cow<'static, str>,
    value: Cow<'static, str>,
}

impl HeaderEntry {
    pub const fn from_static(key: &'static str, value: &'static str) -> Self {
        Self {
            key: Cow::Borrowed(key),
            value: Cow::Borrowed(value),
        }
    }

    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Cow::Owned(key.into()),
            value: Cow::Owned(value.into()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Header values as the edge platform lays them out: a list of
/// `{key, value}` objects per lowercase header name.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(transparent)]
pub struct HeaderSet(Cow<'static, [HeaderEntry]>);

impl HeaderSet {
    pub const fn from_static(entries: &'static [HeaderEntry]) -> Self {
        Self(Cow::Borrowed(entries))
    }

    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self(Cow::Owned(vec![HeaderEntry::new(key, value)]))
    }

    pub fn entries(&self) -> &[HeaderEntry] {
        &self.0
    }

    pub fn first(&self) -> Option<&HeaderEntry> {
        self.0.first()
    }
}

pub type ResponseHeaders = BTreeMap<String, HeaderSet>;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct EdgeResponse {
    pub headers: ResponseHeaders,

    // status, statusDescription and whatever else the platform sends
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CfPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<EdgeResponse>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct EdgeRecord {
    pub cf: CfPayload,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct EdgeEvent {
    #[serde(rename = "Records")]
    pub records: Vec<EdgeRecord>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EdgeEvent {
    /// Event with a single record wrapping `response`.
    pub fn with_response(response: EdgeResponse) -> Self {
        Self {
            records: vec![EdgeRecord {
                cf: CfPayload {
                    response: Some(response),
                    extra: Map::new(),
                },
                extra: Map::new(),
            }],
            extra: Map::new(),
        }
    }
}
