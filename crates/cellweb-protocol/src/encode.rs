//! Cell value encoder.
//!
//! [`CellEncoder::encode`] turns one driver cell into its wire form. Scalars
//! pass through, temporals become ISO-8601 strings and driver values are
//! dispatched on their capabilities, in this order:
//!
//! 1. null driver values encode as `null`
//! 2. documents → `document` envelope
//! 3. complex values → `collection` / `map` envelope, or their string form
//! 4. geometries → `geometry` envelope
//! 5. contents → `content` envelope
//! 6. anything else → its string form
//!
//! The encoder holds no mutable state and can be shared across threads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cellweb_core::memory::NoReprojection;
use cellweb_core::{
    CellValue, Charset, Content, Document, DriverError, DriverValue, Geometry, ProgressMonitor,
    Reprojection, Reprojector, SRID_4326, TypeDescriptor,
};
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::error::{CodecError, CodecResult};
use crate::types::{
    BinaryPayload, CollectionEnvelope, CompositeEnvelope, ContentEnvelope, DataFormat,
    DocumentEnvelope, GeometryEnvelope, WebAttributes, WebCellValue, WebEnvelope,
};

/// Bytes of a binary payload kept when it is cut down to a preview.
pub const BINARY_PREVIEW_LENGTH: usize = 255;

/// Largest binary payload inlined in full.
pub const BINARY_MAX_LENGTH: usize = 1024 * 1024;

/// Encodes driver cell values into [`WebCellValue`]s.
#[derive(Clone, Copy)]
pub struct CellEncoder<'a> {
    reprojector: &'a dyn Reprojector,
    format: DataFormat,
}

impl CellEncoder<'static> {
    /// Creates an encoder that never reprojects geometries.
    pub fn new() -> Self {
        Self {
            reprojector: &NoReprojection,
            format: DataFormat::default(),
        }
    }
}

impl Default for CellEncoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CellEncoder<'a> {
    /// Builder: use `reprojector` to compute geometry map projections.
    pub fn with_reprojector<'b>(self, reprojector: &'b dyn Reprojector) -> CellEncoder<'b> {
        CellEncoder {
            reprojector,
            format: self.format,
        }
    }

    /// Builder: set the display mode.
    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }

    /// Returns the display mode threaded through nested encodes.
    pub fn format(&self) -> DataFormat {
        self.format
    }

    /// Encodes one cell value of declared type `data_type`.
    ///
    /// Nested values are encoded with their component or attribute types.
    /// The first nested failure aborts the whole call.
    pub fn encode(
        &self,
        monitor: &ProgressMonitor,
        data_type: &TypeDescriptor,
        value: &CellValue,
    ) -> CodecResult<WebCellValue> {
        let encoded = match value {
            CellValue::Null => WebCellValue::null(),
            CellValue::Bool(b) => Value::Bool(*b).into(),
            CellValue::Integer(i) => Value::from(*i).into(),
            CellValue::Float(x) => float_value(*x).into(),
            CellValue::Text(s) => Value::String(s.clone()).into(),
            CellValue::Temporal(t) => Value::String(t.to_iso_string()).into(),
            CellValue::Driver(driver_value) => {
                debug!(
                    type_name = %data_type.name,
                    format = %self.format,
                    "encoding driver value"
                );
                self.encode_driver_value(monitor, driver_value.as_ref())?
            }
        };
        Ok(encoded)
    }

    /// Encodes a result row, cell by cell, against its column types.
    ///
    /// Missing trailing cells encode as `null`; cells beyond the known
    /// columns are encoded with an unknown type. A failure is reported with
    /// the index of the cell that produced it.
    pub fn encode_row(
        &self,
        monitor: &ProgressMonitor,
        columns: &[TypeDescriptor],
        row: &[CellValue],
    ) -> CodecResult<Vec<WebCellValue>> {
        let unknown = TypeDescriptor::unknown();
        let width = columns.len().max(row.len());
        (0..width)
            .map(|index| {
                let Some(value) = row.get(index) else {
                    return Ok(WebCellValue::null());
                };
                let data_type = columns.get(index).unwrap_or(&unknown);
                self.encode(monitor, data_type, value)
                    .map_err(|e| e.at_index(index))
            })
            .collect()
    }

    fn encode_driver_value(
        &self,
        monitor: &ProgressMonitor,
        value: &dyn DriverValue,
    ) -> CodecResult<WebCellValue> {
        if value.is_null() {
            return Ok(WebCellValue::null());
        }
        if let Some(document) = value.as_document() {
            return Ok(WebEnvelope::Document(self.encode_document(monitor, document)?).into());
        }
        if value.is_complex() {
            return self.encode_complex(monitor, value);
        }
        if let Some(geometry) = value.as_geometry() {
            return Ok(WebEnvelope::Geometry(self.encode_geometry(geometry)).into());
        }
        if let Some(content) = value.as_content() {
            return Ok(WebEnvelope::Content(self.encode_content(monitor, content)?).into());
        }
        Ok(Value::String(value.to_string()).into())
    }

    fn encode_complex(
        &self,
        monitor: &ProgressMonitor,
        value: &dyn DriverValue,
    ) -> CodecResult<WebCellValue> {
        if let Some(collection) = value.as_collection() {
            let component = collection.component_type();
            let items = (0..collection.item_count())
                .map(|index| match collection.item(index) {
                    Some(item) => self.encode(monitor, component, item),
                    None => Ok(WebCellValue::null()),
                })
                .collect::<CodecResult<Vec<_>>>()?;
            return Ok(WebEnvelope::Collection(CollectionEnvelope { value: items }).into());
        }

        if let Some(composite) = value.as_composite() {
            let attributes = composite.attributes();
            let mut encoded = WebAttributes::with_capacity(attributes.len());
            for attribute in attributes {
                let attribute_value = match composite.attribute_value(attribute) {
                    Some(v) => self.encode(monitor, &attribute.data_type, v)?,
                    None => WebCellValue::null(),
                };
                encoded.insert(attribute.name.as_str(), attribute_value);
            }
            return Ok(WebEnvelope::Map(CompositeEnvelope { value: encoded }).into());
        }

        Ok(Value::String(value.to_string()).into())
    }

    fn encode_document(
        &self,
        monitor: &ProgressMonitor,
        document: &dyn Document,
    ) -> CodecResult<DocumentEnvelope> {
        let mut buffer = Vec::new();
        monitor
            .check_canceled()
            .and_then(|()| document.serialize_document(monitor, &mut buffer, Charset::Utf8))
            .map_err(|e| {
                warn!(error = %e, "document serialization failed");
                CodecError::serialization("error serializing document", e)
            })?;

        Ok(DocumentEnvelope {
            id: document.document_id().unwrap_or_default(),
            content_type: document.content_type().to_string(),
            properties: Map::new(),
            data: String::from_utf8_lossy(&buffer).into_owned(),
        })
    }

    fn encode_content(
        &self,
        monitor: &ProgressMonitor,
        content: &dyn Content,
    ) -> CodecResult<ContentEnvelope> {
        let read_failed = |e: DriverError| {
            warn!(error = %e, "content extraction failed");
            CodecError::serialization("error reading content", e)
        };
        monitor.check_canceled().map_err(read_failed)?;

        let (binary, text) = if content.is_text() {
            let text = content.string_value(monitor).map_err(read_failed)?;
            (None, text)
        } else {
            match content.binary_value(monitor).map_err(read_failed)? {
                Some(bytes) => {
                    let preview = &bytes[..bytes.len().min(BINARY_PREVIEW_LENGTH)];
                    // Oversized payloads are cut to the preview bound, not the max bound.
                    let inline = if bytes.len() > BINARY_MAX_LENGTH {
                        preview
                    } else {
                        &bytes[..]
                    };
                    let payload = BinaryPayload::Inline(STANDARD.encode(inline));
                    (Some(payload), Some(binary_to_string(&bytes)))
                }
                None => (Some(BinaryPayload::Detected), None),
            }
        };

        Ok(ContentEnvelope {
            binary,
            text,
            content_type: content.content_type().to_string(),
            content_length: content.content_length(),
        })
    }

    fn encode_geometry(&self, geometry: &dyn Geometry) -> GeometryEnvelope {
        // Reprojection is best effort: any failure only drops mapText.
        let map_text = match self.reprojector.transform_to_srid(geometry, SRID_4326) {
            Ok(Reprojection::Transformed(projected)) => Some(projected.text()),
            Ok(Reprojection::Unchanged) => None,
            Err(e) => {
                debug!(srid = geometry.srid(), error = %e, "geometry reprojection failed");
                None
            }
        };

        GeometryEnvelope {
            srid: geometry.srid(),
            text: geometry.text(),
            properties: geometry.properties(),
            map_text,
        }
    }
}

/// Renders each byte of `bytes` as one character.
///
/// Bytes below `0x80` keep their code point; a byte `b` read as a negative
/// signed value maps to code point `127 - b`, so `0xFF` becomes `U+0080` and
/// `0x80` becomes `U+00FF`.
pub fn binary_to_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            let signed = b as i8;
            if signed < 0 {
                char::from((127 - i16::from(signed)) as u8)
            } else {
                char::from(b)
            }
        })
        .collect()
}

fn float_value(x: f64) -> Value {
    Number::from_f64(x)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(x.to_string()))
}
