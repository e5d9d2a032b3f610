//! JSON array files.
//!
//! Each call opens, fully reads or writes, and closes the file before
//! returning. Writes are not atomic: a failure part-way through can leave a
//! truncated file behind.

use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use shopkeep_core::document::json_type;
use shopkeep_core::{Document, RecordError, RecordResult};

/// Read a file holding a JSON array and return its elements.
pub fn read_array(path: &Path) -> RecordResult<Vec<Value>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(RecordError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(RecordError::io(path, e)),
    };

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
        RecordError::format(format!("{} is not valid JSON: {e}", path.display()))
    })?;

    match value {
        Value::Array(items) => Ok(items),
        other => Err(RecordError::format(format!(
            "{} must hold a JSON array, found {}",
            path.display(),
            json_type(&other)
        ))),
    }
}

/// Write documents as a pretty-printed JSON array (4-space indent), replacing any existing file.
pub fn write_array(path: &Path, documents: Vec<Document>) -> RecordResult<()> {
    let value = Value::Array(documents.into_iter().map(Value::Object).collect());

    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .map_err(|e| RecordError::format(format!("failed to encode {}: {e}", path.display())))?;
    buf.push(b'\n');

    std::fs::write(path, buf).map_err(|e| RecordError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempFile;
    use serde_json::json;

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let tmp = TempFile::new("missing");
        assert!(matches!(read_array(tmp.path()), Err(RecordError::FileNotFound(p)) if p == tmp.path()));
    }

    #[test]
    fn invalid_json_and_non_arrays_are_format_errors() {
        let tmp = TempFile::new("garbage");
        std::fs::write(tmp.path(), "[{\"tipo\": ").unwrap();
        assert!(matches!(read_array(tmp.path()), Err(RecordError::Format(_))));

        std::fs::write(tmp.path(), r#"{"tipo": "VentaOnline"}"#).unwrap();
        let err = read_array(tmp.path()).unwrap_err();
        assert!(matches!(err, RecordError::Format(msg) if msg.contains("found object")));
    }

    #[test]
    fn non_utf8_contents_are_a_format_error() {
        let tmp = TempFile::new("latin1");
        std::fs::write(tmp.path(), b"[\"\xff\xfe\"]").unwrap();
        assert!(matches!(read_array(tmp.path()), Err(RecordError::Format(_))));
    }

    #[test]
    fn writes_indented_array() {
        let tmp = TempFile::new("pretty");
        let doc = match json!({ "tipo": "VentaLocal", "cliente": "Ana" }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        write_array(tmp.path(), vec![doc]).unwrap();

        let text = std::fs::read_to_string(tmp.path()).unwrap();
        assert!(text.starts_with("[\n    {\n        \"tipo\": \"VentaLocal\""));
        assert_eq!(read_array(tmp.path()).unwrap().len(), 1);
    }

    #[test]
    fn write_into_missing_directory_is_an_io_error() {
        let path = std::env::temp_dir()
            .join(format!("shopkeep-missing-dir-{}", uuid::Uuid::now_v7()))
            .join("ventas.json");
        assert!(matches!(write_array(&path, vec![]), Err(RecordError::Io { .. })));
    }
}
