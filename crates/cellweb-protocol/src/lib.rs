//! Web wire format for database cell values.
//!
//! Cells are encoded into JSON for a browser client. Scalars are emitted
//! bare; everything else is wrapped in an envelope tagged by `$type`:
//!
//! | `$type`      | Source value                      |
//! |--------------|-----------------------------------|
//! | `collection` | array                             |
//! | `map`        | struct                            |
//! | `document`   | semi-structured document          |
//! | `content`    | CLOB / BLOB                       |
//! | `geometry`   | spatial value                     |
//!
//! Edits coming back from the client are decoded with [`make_plain_value`],
//! which only accepts plain values and text content.
//!
//! # Example
//!
//! ```rust
//! use cellweb_core::{CellValue, ProgressMonitor, TypeDescriptor};
//! use cellweb_core::memory::MemoryContent;
//! use cellweb_protocol::{CellEncoder, make_plain_value};
//!
//! let monitor = ProgressMonitor::new();
//! let cell = CellValue::driver(MemoryContent::text("hello"));
//! let encoded = CellEncoder::new()
//!     .encode(&monitor, &TypeDescriptor::unknown(), &cell)
//!     .unwrap();
//! assert_eq!(encoded.value_type(), Some("content"));
//!
//! let plain = make_plain_value(encoded.to_json().unwrap()).unwrap();
//! assert_eq!(plain, "hello");
//! ```

mod decode;
mod encode;
mod error;
mod types;

pub use decode::{decode_row, make_plain_value};
pub use encode::{BINARY_MAX_LENGTH, BINARY_PREVIEW_LENGTH, CellEncoder, binary_to_string};
pub use error::{CodecError, CodecResult, EditSubject};
pub use types::{
    ATTR_BINARY, ATTR_TEXT, BinaryPayload, CollectionEnvelope, CompositeEnvelope,
    ContentEnvelope, DataFormat, DocumentEnvelope, GeometryEnvelope, VALUE_TYPE_ATTR,
    VALUE_TYPE_COLLECTION, VALUE_TYPE_CONTENT, VALUE_TYPE_DOCUMENT, VALUE_TYPE_GEOMETRY,
    VALUE_TYPE_MAP, WebAttributes, WebCellValue, WebEnvelope,
};
