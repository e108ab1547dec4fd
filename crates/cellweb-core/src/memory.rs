//! In-memory driver values.
//!
//! Concrete implementations of the capability traits backed by owned data,
//! for fixtures, tests and tools that build result sets without a live
//! driver.

use std::fmt;
use std::io::Write;

use serde_json::{Map, Value};

use crate::error::{DriverError, DriverResult};
use crate::monitor::ProgressMonitor;
use crate::value::{
    AttributeDescriptor, CellValue, Charset, Collection, Composite, Content, Document,
    DriverValue, Geometry, Reprojection, Reprojector, TypeDescriptor,
};

/// An array value.
#[derive(Debug, Clone)]
pub struct MemoryCollection {
    component: TypeDescriptor,
    items: Vec<CellValue>,
}

impl MemoryCollection {
    pub fn new(component: TypeDescriptor, items: Vec<CellValue>) -> Self {
        Self { component, items }
    }
}

impl fmt::Display for MemoryCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

impl Collection for MemoryCollection {
    fn component_type(&self) -> &TypeDescriptor {
        &self.component
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item(&self, index: usize) -> Option<&CellValue> {
        self.items.get(index)
    }
}

impl DriverValue for MemoryCollection {
    fn as_collection(&self) -> Option<&dyn Collection> {
        Some(self)
    }
}

/// A struct value with ordered attributes.
#[derive(Debug, Clone, Default)]
pub struct MemoryComposite {
    attributes: Vec<AttributeDescriptor>,
    values: Vec<CellValue>,
}

impl MemoryComposite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append an attribute and its value.
    ///
    /// An attribute with the same name as an earlier one replaces its value
    /// and keeps its original position.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        data_type: TypeDescriptor,
        value: impl Into<CellValue>,
    ) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter().position(|a| a.name == name) {
            Some(index) => self.values[index] = value,
            None => {
                self.attributes.push(AttributeDescriptor::new(name, data_type));
                self.values.push(value);
            }
        }
        self
    }
}

impl fmt::Display for MemoryComposite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

impl Composite for MemoryComposite {
    fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    fn attribute_value(&self, attribute: &AttributeDescriptor) -> Option<&CellValue> {
        self.attributes
            .iter()
            .position(|a| a.name == attribute.name)
            .and_then(|index| self.values.get(index))
    }
}

impl DriverValue for MemoryComposite {
    fn as_composite(&self) -> Option<&dyn Composite> {
        Some(self)
    }
}

/// A JSON document.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    id: Option<String>,
    content_type: String,
    data: Value,
}

impl MemoryDocument {
    /// Creates an `application/json` document.
    pub fn new(id: Option<String>, data: Value) -> Self {
        Self {
            id,
            content_type: "application/json".to_string(),
            data,
        }
    }

    /// Builder: override the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

impl fmt::Display for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

impl Document for MemoryDocument {
    fn document_id(&self) -> Option<String> {
        self.id.clone()
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn serialize_document(
        &self,
        monitor: &ProgressMonitor,
        sink: &mut dyn Write,
        _charset: Charset,
    ) -> DriverResult<()> {
        monitor.check_canceled()?;
        serde_json::to_writer(sink, &self.data)
            .map_err(|e| DriverError::io("failed to write document").with_source(e))
    }
}

impl DriverValue for MemoryDocument {
    fn as_document(&self) -> Option<&dyn Document> {
        Some(self)
    }
}

/// Payload of a [`MemoryContent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentData {
    Text(Option<String>),
    Binary(Option<Vec<u8>>),
}

/// A CLOB or BLOB.
#[derive(Debug, Clone)]
pub struct MemoryContent {
    content_type: String,
    data: ContentData,
}

impl MemoryContent {
    /// Creates a `text/plain` content value.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text/plain".to_string(),
            data: ContentData::Text(Some(text.into())),
        }
    }

    /// Creates an `application/octet-stream` content value.
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: "application/octet-stream".to_string(),
            data: ContentData::Binary(Some(bytes.into())),
        }
    }

    /// Creates a binary content value whose payload cannot be read.
    pub fn empty_binary() -> Self {
        Self {
            content_type: "application/octet-stream".to_string(),
            data: ContentData::Binary(None),
        }
    }

    /// Builder: override the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

impl fmt::Display for MemoryContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            ContentData::Text(Some(text)) => write!(f, "{}", text),
            ContentData::Binary(Some(bytes)) => write!(f, "[{} bytes]", bytes.len()),
            _ => Ok(()),
        }
    }
}

impl Content for MemoryContent {
    fn is_text(&self) -> bool {
        matches!(self.data, ContentData::Text(_))
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn content_length(&self) -> u64 {
        match &self.data {
            ContentData::Text(Some(text)) => text.len() as u64,
            ContentData::Binary(Some(bytes)) => bytes.len() as u64,
            _ => 0,
        }
    }

    fn string_value(&self, monitor: &ProgressMonitor) -> DriverResult<Option<String>> {
        monitor.check_canceled()?;
        Ok(match &self.data {
            ContentData::Text(text) => text.clone(),
            ContentData::Binary(bytes) => bytes
                .as_ref()
                .map(|b| String::from_utf8_lossy(b).into_owned()),
        })
    }

    fn binary_value(&self, monitor: &ProgressMonitor) -> DriverResult<Option<Vec<u8>>> {
        monitor.check_canceled()?;
        Ok(match &self.data {
            ContentData::Text(text) => text.as_ref().map(|t| t.as_bytes().to_vec()),
            ContentData::Binary(bytes) => bytes.clone(),
        })
    }
}

impl DriverValue for MemoryContent {
    fn as_content(&self) -> Option<&dyn Content> {
        Some(self)
    }
}

/// A geometry held as well-known text.
#[derive(Debug, Clone)]
pub struct MemoryGeometry {
    srid: i32,
    wkt: String,
    properties: Map<String, Value>,
}

impl MemoryGeometry {
    pub fn new(srid: i32, wkt: impl Into<String>) -> Self {
        Self {
            srid,
            wkt: wkt.into(),
            properties: Map::new(),
        }
    }

    /// Builder: attach a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for MemoryGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wkt)
    }
}

impl Geometry for MemoryGeometry {
    fn srid(&self) -> i32 {
        self.srid
    }

    fn text(&self) -> String {
        self.wkt.clone()
    }

    fn properties(&self) -> Map<String, Value> {
        self.properties.clone()
    }
}

impl DriverValue for MemoryGeometry {
    fn as_geometry(&self) -> Option<&dyn Geometry> {
        Some(self)
    }
}

/// A driver value the codec has no category for.
#[derive(Debug, Clone)]
pub struct OpaqueValue {
    text: String,
    complex: bool,
    null: bool,
}

impl OpaqueValue {
    /// A simple value rendered through its text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            complex: false,
            null: false,
        }
    }

    /// A complex value that is neither a collection nor a composite.
    pub fn complex(text: impl Into<String>) -> Self {
        Self {
            complex: true,
            ..Self::new(text)
        }
    }

    /// A driver value reporting SQL NULL.
    pub fn null() -> Self {
        Self {
            null: true,
            ..Self::new("")
        }
    }
}

impl fmt::Display for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl DriverValue for OpaqueValue {
    fn is_null(&self) -> bool {
        self.null
    }

    fn is_complex(&self) -> bool {
        self.complex
    }
}

/// Reprojector that never transforms anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReprojection;

impl Reprojector for NoReprojection {
    fn transform_to_srid(
        &self,
        _geometry: &dyn Geometry,
        _srid: i32,
    ) -> DriverResult<Reprojection> {
        Ok(Reprojection::Unchanged)
    }
}

/// Reprojector that relabels coordinates with the target SRID.
///
/// Coordinates are copied as-is. Geometries already in the target system
/// are reported unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SridRelabel;

impl Reprojector for SridRelabel {
    fn transform_to_srid(&self, geometry: &dyn Geometry, srid: i32) -> DriverResult<Reprojection> {
        if geometry.srid() == srid {
            return Ok(Reprojection::Unchanged);
        }
        let mut relabeled = MemoryGeometry::new(srid, geometry.text());
        relabeled.properties = geometry.properties();
        Ok(Reprojection::Transformed(Box::new(relabeled)))
    }
}
