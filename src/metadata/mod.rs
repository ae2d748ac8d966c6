//! Row metadata
//!
//! Maps a row type to its logical collection name (the entity set used in
//! resource paths) and extracts a row's unique identifier.

mod macros;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::errors::{DataverseError, Result};

/// A record of a remote table.
///
/// Implement by hand or with [`table_row!`](crate::table_row).
pub trait TableRow: Serialize + DeserializeOwned + Send + Sync {
    /// Logical (singular) name of the table, e.g. `account`
    fn logical_name() -> &'static str;

    /// Logical collection name of the table, e.g. `accounts`
    fn logical_collection_name() -> &'static str;

    /// Primary key of this row, absent for rows not yet created
    fn row_id(&self) -> Option<Uuid>;
}

/// Resolve the collection name of `T`
pub fn collection_name<T: TableRow>() -> Result<&'static str> {
    let name = T::logical_collection_name();
    if !is_valid_collection_name(name) {
        return Err(DataverseError::MissingMetadata {
            type_name: std::any::type_name::<T>(),
            attribute: "logical collection name",
        });
    }
    Ok(name)
}

/// Resolve the identifier of `row`
pub fn row_id<T: TableRow>(row: &T) -> Result<Uuid> {
    row.row_id().ok_or(DataverseError::MissingMetadata {
        type_name: std::any::type_name::<T>(),
        attribute: "row id",
    })
}

/// Keyed resource path `{collection}({id})`
pub fn keyed_path<T: TableRow>(row: &T) -> Result<String> {
    Ok(format!("{}({})", collection_name::<T>()?, row_id(row)?))
}

// Entity set names are OData identifiers; anything else would corrupt the path.
pub(crate) fn is_valid_collection_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
