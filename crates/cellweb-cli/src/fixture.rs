//! Fixture files describing typed result rows.
//!
//! A fixture is a JSON object with the column types and the rows to encode:
//!
//! ```json
//! {
//!   "columns": [
//!     { "name": "id", "kind": "numeric" },
//!     { "name": "tags", "kind": "array", "component": { "name": "text", "kind": "string" } }
//!   ],
//!   "rows": [
//!     [1, { "kind": "array", "items": ["a", "b"] }]
//!   ]
//! }
//! ```
//!
//! Plain JSON scalars become scalar cells. Objects carrying a `kind` tag
//! become driver values of that kind.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cellweb_core::memory::{
    MemoryCollection, MemoryComposite, MemoryContent, MemoryDocument, MemoryGeometry, OpaqueValue,
};
use cellweb_core::{CellValue, Temporal, TypeDescriptor};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{CliError, CliResult};

/// A fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    /// Declared column types.
    #[serde(default)]
    pub columns: Vec<TypeDescriptor>,
    /// Result rows.
    pub rows: Vec<Vec<FixtureValue>>,
}

impl Fixture {
    /// Reads a fixture from a JSON file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses a fixture from JSON text.
    pub fn parse(content: &str) -> CliResult<Self> {
        serde_json::from_str(content).map_err(|e| CliError::Fixture(e.to_string()))
    }

    /// Builds the cell values of every row.
    pub fn cells(&self) -> CliResult<Vec<Vec<CellValue>>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(FixtureValue::to_cell).collect())
            .collect()
    }
}

/// One cell of a fixture row.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FixtureValue {
    /// A driver value described by its `kind`.
    Typed(TypedValue),
    /// A bare JSON value.
    Plain(Value),
}

/// Driver values a fixture can describe.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypedValue {
    Array {
        #[serde(default = "TypeDescriptor::unknown")]
        component: TypeDescriptor,
        items: Vec<FixtureValue>,
    },
    Struct {
        attributes: Vec<FixtureAttribute>,
    },
    Document {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        content_type: Option<String>,
        data: Value,
    },
    Text {
        text: String,
        #[serde(default)]
        content_type: Option<String>,
    },
    Binary {
        /// Standard base64; absent for an unreadable payload.
        #[serde(default)]
        base64: Option<String>,
        #[serde(default)]
        content_type: Option<String>,
    },
    Geometry {
        srid: i32,
        wkt: String,
        #[serde(default)]
        properties: Map<String, Value>,
    },
    Temporal {
        value: Temporal,
    },
    Opaque {
        text: String,
        #[serde(default)]
        complex: bool,
        #[serde(default)]
        null: bool,
    },
}

/// A named attribute of a struct fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureAttribute {
    pub name: String,
    #[serde(rename = "type", default = "TypeDescriptor::unknown")]
    pub data_type: TypeDescriptor,
    pub value: FixtureValue,
}

impl FixtureValue {
    /// Builds the cell value this fixture describes.
    pub fn to_cell(&self) -> CliResult<CellValue> {
        match self {
            Self::Plain(value) => plain_cell(value),
            Self::Typed(typed) => typed.to_cell(),
        }
    }
}

impl TypedValue {
    fn to_cell(&self) -> CliResult<CellValue> {
        let cell = match self {
            Self::Array { component, items } => {
                let items = items
                    .iter()
                    .map(FixtureValue::to_cell)
                    .collect::<CliResult<Vec<_>>>()?;
                CellValue::driver(MemoryCollection::new(component.clone(), items))
            }
            Self::Struct { attributes } => {
                let mut composite = MemoryComposite::new();
                for attribute in attributes {
                    composite = composite.with_attribute(
                        attribute.name.as_str(),
                        attribute.data_type.clone(),
                        attribute.value.to_cell()?,
                    );
                }
                CellValue::driver(composite)
            }
            Self::Document {
                id,
                content_type,
                data,
            } => {
                let mut document = MemoryDocument::new(id.clone(), data.clone());
                if let Some(content_type) = content_type {
                    document = document.with_content_type(content_type.as_str());
                }
                CellValue::driver(document)
            }
            Self::Text { text, content_type } => {
                let content = MemoryContent::text(text.as_str());
                CellValue::driver(with_content_type(content, content_type.as_deref()))
            }
            Self::Binary {
                base64,
                content_type,
            } => {
                let content = match base64 {
                    Some(encoded) => {
                        let bytes = STANDARD
                            .decode(encoded)
                            .map_err(|e| CliError::Fixture(format!("invalid base64: {}", e)))?;
                        MemoryContent::binary(bytes)
                    }
                    None => MemoryContent::empty_binary(),
                };
                CellValue::driver(with_content_type(content, content_type.as_deref()))
            }
            Self::Geometry {
                srid,
                wkt,
                properties,
            } => {
                let geometry = properties
                    .iter()
                    .fold(MemoryGeometry::new(*srid, wkt.as_str()), |g, (k, v)| {
                        g.with_property(k.as_str(), v.clone())
                    });
                CellValue::driver(geometry)
            }
            Self::Temporal { value } => CellValue::Temporal(*value),
            Self::Opaque {
                text,
                complex,
                null,
            } => {
                let value = if *null {
                    OpaqueValue::null()
                } else if *complex {
                    OpaqueValue::complex(text.as_str())
                } else {
                    OpaqueValue::new(text.as_str())
                };
                CellValue::driver(value)
            }
        };
        Ok(cell)
    }
}

fn with_content_type(content: MemoryContent, content_type: Option<&str>) -> MemoryContent {
    match content_type {
        Some(content_type) => content.with_content_type(content_type),
        None => content,
    }
}

fn plain_cell(value: &Value) -> CliResult<CellValue> {
    let cell = match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => CellValue::Integer(i),
            (None, Some(x)) if n.is_f64() => CellValue::Float(x),
            _ => {
                return Err(CliError::Fixture(format!(
                    "integer {} does not fit in a 64-bit signed cell",
                    n
                )));
            }
        },
        Value::String(s) => CellValue::Text(s.clone()),
        Value::Array(items) => {
            let items = items.iter().map(plain_cell).collect::<CliResult<Vec<_>>>()?;
            CellValue::driver(MemoryCollection::new(TypeDescriptor::unknown(), items))
        }
        Value::Object(_) => {
            return Err(CliError::Fixture(
                "objects need a \"kind\" to describe a driver value".to_string(),
            ));
        }
    };
    Ok(cell)
}
