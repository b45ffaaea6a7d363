//! Reversible mapping between entity ids and blob file names
//!
//! Entity ids use `::` as a namespace separator (`AWS::S3::Bucket`),
//! which is not safe in file names on every platform. Blobs are stored
//! as `<id with :: replaced by -->.json`; the inverse mapping recovers
//! the exact id. The mapping is bijective because validated id segments
//! never contain `-` (see `mirror-remote`'s id validation).

/// File extension for stored blobs
pub const BLOB_EXTENSION: &str = ".json";

/// Separator used in entity ids
pub const ID_SEPARATOR: &str = "::";

/// Separator used in blob file names
pub const FILE_SEPARATOR: &str = "--";

/// Derive the blob file name for an entity id.
///
/// `AWS::S3::Bucket` becomes `AWS--S3--Bucket.json`.
pub fn entity_file_name(id: &str) -> String {
    format!("{}{}", id.replace(ID_SEPARATOR, FILE_SEPARATOR), BLOB_EXTENSION)
}

/// Recover the entity id from a blob file name.
///
/// Returns `None` for files that do not carry the blob extension
/// (lock droppings, editor artifacts and the like are skipped when
/// listing a store directory).
pub fn entity_id_from_file_name(name: &str) -> Option<String> {
    let stem = name.strip_suffix(BLOB_EXTENSION)?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.replace(FILE_SEPARATOR, ID_SEPARATOR))
}
