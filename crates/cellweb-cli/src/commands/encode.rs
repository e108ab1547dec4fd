//! Encode command.

use std::path::Path;

use cellweb_core::ProgressMonitor;
use cellweb_protocol::{CellEncoder, DataFormat};
use serde_json::Value;
use tracing::{debug, info};

use crate::cli::OutputOptions;
use crate::error::{CliError, CliResult};
use crate::fixture::Fixture;

/// Encode every row of the fixture at `file` and print the result.
pub fn run(file: &Path, options: OutputOptions) -> CliResult<()> {
    let fixture = Fixture::load(file)?;
    let encoded = encode_fixture(&fixture, options.format)?;
    println!("{}", super::render_json(&encoded, options.pretty)?);
    Ok(())
}

/// Encodes all fixture rows into a JSON array of rows.
pub fn encode_fixture(fixture: &Fixture, format: DataFormat) -> CliResult<Value> {
    let monitor = ProgressMonitor::new();
    let encoder = CellEncoder::new().with_format(format);
    let cells = fixture.cells()?;

    let mut rows = Vec::with_capacity(cells.len());
    for (index, row) in cells.iter().enumerate() {
        let encoded = encoder
            .encode_row(&monitor, &fixture.columns, row)
            .map_err(|source| CliError::Row { index, source })?;
        debug!(row = index, cells = encoded.len(), "encoded row");
        rows.push(serde_json::to_value(encoded)?);
    }
    info!(rows = rows.len(), format = %format, "encoded fixture");

    Ok(Value::Array(rows))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    fn encode(fixture: &str) -> CliResult<Value> {
        encode_fixture(&Fixture::parse(fixture)?, DataFormat::Resultset)
    }

    #[test]
    fn encodes_rows_against_columns() {
        let encoded = encode(
            r#"{
                "columns": [
                    {"name": "id", "kind": "numeric"},
                    {
                        "name": "tags",
                        "kind": "array",
                        "component": {"name": "text", "kind": "string"}
                    },
                    {"name": "note", "kind": "content"}
                ],
                "rows": [
                    [1, {"kind": "array", "items": ["a", "b"]}, {"kind": "text", "text": "hi"}],
                    [2]
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            encoded,
            json!([
                [
                    1,
                    {"$type": "collection", "value": ["a", "b"]},
                    {
                        "$type": "content",
                        "text": "hi",
                        "contentType": "text/plain",
                        "contentLength": 2
                    }
                ],
                [2, null, null]
            ])
        );
    }

    #[test]
    fn document_and_geometry_cells() {
        let encoded = encode(
            r#"{"rows": [[
                {"kind": "document", "id": "d1", "data": {"k": 1}},
                {"kind": "geometry", "srid": 4326, "wkt": "POINT (1 2)"}
            ]]}"#,
        )
        .unwrap();

        assert_eq!(
            encoded[0][0],
            json!({
                "$type": "document",
                "id": "d1",
                "contentType": "application/json",
                "properties": {},
                "data": "{\"k\":1}"
            })
        );
        assert_eq!(
            encoded[0][1],
            json!({"$type": "geometry", "srid": 4326, "text": "POINT (1 2)", "properties": {}})
        );
    }

    #[test]
    fn run_reads_fixture_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"rows": [["x"]]}}"#).unwrap();
        let options = OutputOptions {
            pretty: false,
            format: DataFormat::Document,
        };
        run(file.path(), options).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let options = OutputOptions {
            pretty: true,
            format: DataFormat::Resultset,
        };
        let err = run(&dir.path().join("missing.json"), options).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
