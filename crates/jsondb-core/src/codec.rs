use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::StoreError;

/// File extension of a stored record.
pub const RECORD_EXTENSION: &str = "json";

/// Suffix appended to a record's file name while it is being written.
pub const TEMP_SUFFIX: &str = ".temp";

/// Encode a value as tab-indented JSON terminated by a single newline.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| StoreError::Serialization(format!("Failed to marshal JSON: {}", e)))?;
    buf.push(b'\n');
    Ok(buf)
}

/// Decode a stored record into `T`.
pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(data).map_err(|e| {
        StoreError::Deserialization(format!("Failed to unmarshal JSON: {}", e))
    })
}
