use bigdecimal::BigDecimal;
use modeldump_types::{PrimaryKey, Temporal};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A field value as read from an entity, before dump normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
    Temporal(Temporal),
    Decimal(BigDecimal),
    Json(serde_json::Value),
    File(FileRef),
    /// Raw foreign key of a to-one relation.
    Key(PrimaryKey),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Temporal(t) => write!(f, "{t}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Json(v) => write!(f, "{v}"),
            Self::File(file) => f.write_str(&file.name),
            Self::Key(pk) => write!(f, "{pk}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Temporal> for FieldValue {
    fn from(t: Temporal) -> Self {
        Self::Temporal(t)
    }
}

impl From<BigDecimal> for FieldValue {
    fn from(d: BigDecimal) -> Self {
        Self::Decimal(d)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A stored file reference.
///
/// `url` is the locally served URL, `cloud_url` the URL of an uploaded copy
/// in remote storage. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_url: Option<String>,
}

impl FileRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_cloud_url(mut self, url: impl Into<String>) -> Self {
        self.cloud_url = Some(url.into());
        self
    }

    /// True when no file is stored.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// The URL to hand out, if any.
    ///
    /// With `prefer_cloud` the cloud copy wins, falling back to the local
    /// URL. Without it only the local URL is considered. Empty strings count
    /// as missing.
    pub fn resolved_url(&self, prefer_cloud: bool) -> Option<&str> {
        let local = self.url.as_deref().filter(|u| !u.is_empty());
        if prefer_cloud {
            let cloud = self.cloud_url.as_deref().filter(|u| !u.is_empty());
            cloud.or(local)
        } else {
            local
        }
    }
}
