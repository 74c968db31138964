//! Translation between wire values and stored column values.
//!
//! Flags are stored as `0`/`1` integers and string lists as JSON text.

use rusqlite::types::Type;

use crate::error::Result;

#[must_use]
pub fn encode_flag(value: bool) -> i64 {
    i64::from(value)
}

#[must_use]
pub fn decode_flag(value: i64) -> bool {
    value != 0
}

/// Absent and `null` lists are both stored as `[]`.
pub fn encode_list(items: Option<&[String]>) -> Result<String> {
    Ok(serde_json::to_string(items.unwrap_or_default())?)
}

/// Decodes a stored list column. NULL and empty text decode to an empty
/// list; anything else must be a JSON array of strings.
pub fn decode_list(text: Option<&str>) -> serde_json::Result<Vec<String>> {
    match text {
        None => Ok(Vec::new()),
        Some(s) if s.trim().is_empty() => Ok(Vec::new()),
        Some(s) => serde_json::from_str(s),
    }
}

/// Reads a list column from a row, reporting a malformed value as a
/// conversion failure on that column.
pub(crate) fn list_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let text: Option<String> = row.get(idx)?;
    decode_list(text.as_deref())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn flag_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<bool> {
    row.get::<_, i64>(idx).map(decode_flag)
}
