//! Wire types exchanged with the web client.
//!
//! A cell is either a bare JSON scalar or an envelope: a JSON object whose
//! `$type` discriminator names the category of the payload.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Key of the envelope discriminator.
pub const VALUE_TYPE_ATTR: &str = "$type";

pub const VALUE_TYPE_COLLECTION: &str = "collection";
pub const VALUE_TYPE_MAP: &str = "map";
pub const VALUE_TYPE_DOCUMENT: &str = "document";
pub const VALUE_TYPE_CONTENT: &str = "content";
pub const VALUE_TYPE_GEOMETRY: &str = "geometry";

pub const ATTR_TEXT: &str = "text";
pub const ATTR_BINARY: &str = "binary";

/// Display-mode flag threaded through every encode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Tabular result set view.
    #[default]
    Resultset,
    /// Document view.
    Document,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resultset => "resultset",
            Self::Document => "document",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resultset" => Ok(Self::Resultset),
            "document" => Ok(Self::Document),
            other => Err(format!(
                "unknown data format '{}' (expected 'resultset' or 'document')",
                other
            )),
        }
    }
}

/// An encoded cell: a plain scalar or a tagged envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WebCellValue {
    /// A non-scalar value wrapped in an envelope.
    Envelope(WebEnvelope),
    /// A JSON scalar emitted as-is.
    Scalar(Value),
}

impl WebCellValue {
    /// The JSON `null` scalar.
    pub fn null() -> Self {
        Self::Scalar(Value::Null)
    }

    /// Returns `true` if the value carries a discriminator.
    pub fn is_envelope(&self) -> bool {
        matches!(self, Self::Envelope(_))
    }

    /// Returns the envelope discriminator, or `None` for scalars.
    pub fn value_type(&self) -> Option<&'static str> {
        match self {
            Self::Envelope(envelope) => Some(envelope.value_type()),
            Self::Scalar(_) => None,
        }
    }

    /// Converts to a generic JSON value.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl From<WebEnvelope> for WebCellValue {
    fn from(envelope: WebEnvelope) -> Self {
        Self::Envelope(envelope)
    }
}

impl From<Value> for WebCellValue {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

/// Envelope variants, tagged by `$type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type", rename_all = "lowercase")]
pub enum WebEnvelope {
    Collection(CollectionEnvelope),
    Map(CompositeEnvelope),
    Document(DocumentEnvelope),
    Content(ContentEnvelope),
    Geometry(GeometryEnvelope),
}

impl WebEnvelope {
    /// Returns the discriminator value.
    pub fn value_type(&self) -> &'static str {
        match self {
            Self::Collection(_) => VALUE_TYPE_COLLECTION,
            Self::Map(_) => VALUE_TYPE_MAP,
            Self::Document(_) => VALUE_TYPE_DOCUMENT,
            Self::Content(_) => VALUE_TYPE_CONTENT,
            Self::Geometry(_) => VALUE_TYPE_GEOMETRY,
        }
    }
}

/// Items of an array value, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionEnvelope {
    pub value: Vec<WebCellValue>,
}

/// Attributes of a struct value, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeEnvelope {
    pub value: WebAttributes,
}

/// A serialized document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEnvelope {
    pub id: String,
    pub content_type: String,
    /// Always empty: document properties are not exported.
    #[serde(default)]
    pub properties: Map<String, Value>,
    pub data: String,
}

/// A CLOB or BLOB.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEnvelope {
    /// Present only for binary content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<BinaryPayload>,
    /// Full text, or a character projection of the full binary payload.
    pub text: Option<String>,
    pub content_type: String,
    /// Stored length, independent of any truncation of `binary`.
    pub content_length: u64,
}

/// The `binary` field of a content envelope.
///
/// `true` marks binary content whose payload could not be read; otherwise
/// the field holds the (possibly truncated) payload in standard base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryPayload {
    Detected,
    Inline(String),
}

impl Serialize for BinaryPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Detected => serializer.serialize_bool(true),
            Self::Inline(base64) => serializer.serialize_str(base64),
        }
    }
}

impl<'de> Deserialize<'de> for BinaryPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BinaryPayloadVisitor;

        impl<'de> Visitor<'de> for BinaryPayloadVisitor {
            type Value = BinaryPayload;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("`true` or a base64 string")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<BinaryPayload, E> {
                if value {
                    Ok(BinaryPayload::Detected)
                } else {
                    Err(E::invalid_value(de::Unexpected::Bool(false), &self))
                }
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<BinaryPayload, E> {
                Ok(BinaryPayload::Inline(value.to_string()))
            }
        }

        deserializer.deserialize_any(BinaryPayloadVisitor)
    }
}

/// A spatial value with an optional map projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryEnvelope {
    pub srid: i32,
    pub text: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Text of the geometry reprojected to SRID 4326, when that differs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_text: Option<String>,
}

/// Ordered attribute name to encoded value mapping.
///
/// Serializes as a JSON object whose key order is the insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebAttributes(Vec<(String, WebCellValue)>);

impl WebAttributes {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Inserts an attribute. A repeated name replaces the earlier value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: WebCellValue) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&WebCellValue> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Attribute names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for WebAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WebAttributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WebAttributesVisitor;

        impl<'de> Visitor<'de> for WebAttributesVisitor {
            type Value = WebAttributes;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of attribute names to cell values")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<WebAttributes, A::Error> {
                let mut attributes = WebAttributes::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, WebCellValue>()? {
                    attributes.insert(name, value);
                }
                Ok(attributes)
            }
        }

        deserializer.deserialize_map(WebAttributesVisitor)
    }
}
