//! Driver value model for the cellweb codec: cell values, capability traits,
//! the session progress monitor, temporal formatting and tracing setup.

pub mod error;
pub mod memory;
pub mod monitor;
pub mod time;
pub mod tracing;
pub mod value;

pub use error::{DriverError, DriverErrorCode, DriverResult};
pub use monitor::ProgressMonitor;
pub use time::{ISO_DATE_FORMAT, Temporal, format_iso};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use value::{
    AttributeDescriptor, CellValue, Charset, Collection, Composite, Content, DataKind, Document,
    DriverValue, Geometry, Reprojection, Reprojector, SRID_4326, TypeDescriptor,
};
