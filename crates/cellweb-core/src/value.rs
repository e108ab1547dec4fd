//! Driver-side cell values and the capabilities the codec dispatches on.
//!
//! The value space a driver can hand back is open-ended. Ordinary scalars and
//! temporals are closed variants of [`CellValue`]; everything else arrives as a
//! [`DriverValue`] trait object that advertises the categories it supports
//! through the `as_*` capability accessors.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DriverResult;
use crate::monitor::ProgressMonitor;
use crate::time::Temporal;

/// Spatial reference id of WGS 84, the canonical system for map display.
pub const SRID_4326: i32 = 4326;

/// Coarse classification of a declared data type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// The driver did not report a kind.
    #[default]
    Unknown,
    Boolean,
    Numeric,
    String,
    Datetime,
    Binary,
    Content,
    Array,
    Struct,
    Document,
    Geometry,
    Object,
}

/// Declared type of a column, collection component, or composite attribute.
///
/// Type descriptors come from the driver layer; the codec only reads them to
/// thread type information into nested encodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Driver type name (e.g. `int4`, `_text`, `address`).
    pub name: String,
    /// Coarse kind of the type.
    #[serde(default)]
    pub kind: DataKind,
    /// Component type for collection types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Box<TypeDescriptor>>,
    /// Declared attributes, in order, for composite types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeDescriptor>,
}

impl TypeDescriptor {
    /// Creates a descriptor with the given name and kind.
    pub fn new(name: impl Into<String>, kind: DataKind) -> Self {
        Self {
            name: name.into(),
            kind,
            component: None,
            attributes: Vec::new(),
        }
    }

    /// Creates a descriptor for a type the driver could not describe.
    pub fn unknown() -> Self {
        Self::new("unknown", DataKind::Unknown)
    }

    /// Creates a collection type with the given component type.
    pub fn array_of(name: impl Into<String>, component: TypeDescriptor) -> Self {
        Self {
            component: Some(Box::new(component)),
            ..Self::new(name, DataKind::Array)
        }
    }

    /// Creates a composite type with no attributes yet.
    pub fn structure(name: impl Into<String>) -> Self {
        Self::new(name, DataKind::Struct)
    }

    /// Builder: append a declared attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, data_type: TypeDescriptor) -> Self {
        self.attributes.push(AttributeDescriptor::new(name, data_type));
        self
    }
}

/// A named, typed attribute of a composite type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// Attribute name, unique within its composite.
    pub name: String,
    /// Declared type of the attribute.
    #[serde(rename = "type")]
    pub data_type: TypeDescriptor,
}

impl AttributeDescriptor {
    /// Creates a new attribute descriptor.
    pub fn new(name: impl Into<String>, data_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A single cell value produced by a query result.
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// A date, time or timestamp.
    Temporal(Temporal),
    /// A driver-defined value; see [`DriverValue`].
    Driver(Arc<dyn DriverValue>),
}

impl CellValue {
    /// Wraps a driver value.
    pub fn driver<V: DriverValue + 'static>(value: V) -> Self {
        Self::Driver(Arc::new(value))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => write!(f, "{}", s),
            Self::Temporal(t) => write!(f, "{}", t.to_iso_string()),
            Self::Driver(value) => write!(f, "{}", value),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Temporal> for CellValue {
    fn from(t: Temporal) -> Self {
        Self::Temporal(t)
    }
}

/// A driver-defined value and the categories it can be viewed as.
///
/// Every capability defaults to absent. The codec checks them in a fixed
/// order (document, complex, geometry, content) and falls back to the
/// `Display` form when none applies.
pub trait DriverValue: fmt::Debug + fmt::Display + Send + Sync {
    /// Whether the driver reports this value as SQL NULL.
    fn is_null(&self) -> bool {
        false
    }

    fn as_document(&self) -> Option<&dyn Document> {
        None
    }

    /// Whether this is a complex (nested) value.
    ///
    /// Complex values that are neither collections nor composites are
    /// rendered as plain strings.
    fn is_complex(&self) -> bool {
        self.as_collection().is_some() || self.as_composite().is_some()
    }

    fn as_collection(&self) -> Option<&dyn Collection> {
        None
    }

    fn as_composite(&self) -> Option<&dyn Composite> {
        None
    }

    fn as_geometry(&self) -> Option<&dyn Geometry> {
        None
    }

    fn as_content(&self) -> Option<&dyn Content> {
        None
    }
}

/// An ordered, indexed sequence of values sharing one component type.
pub trait Collection {
    /// Declared type of every item.
    fn component_type(&self) -> &TypeDescriptor;

    /// Number of items.
    fn item_count(&self) -> usize;

    /// Item at `index`, for `index` in `0..item_count()`.
    fn item(&self, index: usize) -> Option<&CellValue>;
}

/// A struct-like value with named, ordered attributes.
pub trait Composite {
    /// Declared attributes in declaration order.
    fn attributes(&self) -> &[AttributeDescriptor];

    /// Current value of `attribute`, if set.
    fn attribute_value(&self, attribute: &AttributeDescriptor) -> Option<&CellValue>;
}

/// Character set requested from a document serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
}

/// A semi-structured document that can serialize itself.
pub trait Document {
    /// Identity of the document, if it has one.
    fn document_id(&self) -> Option<String>;

    /// MIME type of the serialized form.
    fn content_type(&self) -> &str;

    /// Writes the document to `sink` in `charset`.
    ///
    /// Implementations should observe `monitor` and fail with a canceled
    /// error when cancellation is requested.
    fn serialize_document(
        &self,
        monitor: &ProgressMonitor,
        sink: &mut dyn Write,
        charset: Charset,
    ) -> DriverResult<()>;
}

/// A large text (CLOB) or binary (BLOB) payload.
pub trait Content {
    /// Whether the payload is character data.
    fn is_text(&self) -> bool;

    /// MIME type of the payload.
    fn content_type(&self) -> &str;

    /// Length of the full payload as stored, before any truncation.
    fn content_length(&self) -> u64;

    /// Reads the full payload as a string.
    fn string_value(&self, monitor: &ProgressMonitor) -> DriverResult<Option<String>>;

    /// Reads the full payload as bytes.
    fn binary_value(&self, monitor: &ProgressMonitor) -> DriverResult<Option<Vec<u8>>>;
}

/// A spatial value.
pub trait Geometry: Send + Sync {
    /// Spatial reference id of the coordinates.
    fn srid(&self) -> i32;

    /// Well-known text form.
    fn text(&self) -> String;

    /// Driver-specific properties attached to the geometry.
    fn properties(&self) -> Map<String, Value>;
}

/// Outcome of a reprojection request.
pub enum Reprojection {
    /// The geometry is already in the target system; nothing new was produced.
    Unchanged,
    /// A new geometry in the target system.
    Transformed(Box<dyn Geometry>),
}

impl fmt::Debug for Reprojection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => write!(f, "Unchanged"),
            Self::Transformed(geometry) => f
                .debug_struct("Transformed")
                .field("srid", &geometry.srid())
                .field("text", &geometry.text())
                .finish(),
        }
    }
}

/// Projects geometries between spatial reference systems.
pub trait Reprojector: Send + Sync {
    /// Transforms `geometry` into `srid`.
    fn transform_to_srid(&self, geometry: &dyn Geometry, srid: i32) -> DriverResult<Reprojection>;
}
